//! Discrete topology commands: closest-edge insertion, radius removal.
//!
//! Both commands run outside the drag loop and shift vertex indices,
//! so they drop the current selection before mutating.
//!
//! Code cross-refs: `geom::closest_point_on_segment`, `shape::Polygon`

use nalgebra::Vector2;
use tracing::{debug, warn};

use super::EditorSession;
use crate::geom::{closest_point_on_segment, dist_sq};

impl EditorSession {
    /// Insert a vertex at the midpoint of the closest edge across all
    /// polygons.
    ///
    /// Tracks the global minimum over every polygon and every cyclic
    /// edge `(i, (i+1) % n)`; the new vertex lands at index
    /// `(i+1) % n`, shifting subsequent indices up by one. Returns the
    /// `(shape id, inserted index)` pair, or `None` when the session
    /// holds no polygon.
    pub fn insert_vertex_at(&mut self, world: Vector2<f64>) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for (id, shape) in self.shapes.iter().enumerate() {
            let Some(poly) = shape.as_polygon() else {
                continue;
            };
            let local = shape.to_local(world);
            let n = poly.vertex_count();
            for i in 0..n {
                let q = closest_point_on_segment(local, poly.vertex(i), poly.vertex((i + 1) % n));
                let d_sq = dist_sq(local, q);
                if best.map_or(true, |(_, _, b)| d_sq < b) {
                    best = Some((id, i, d_sq));
                }
            }
        }
        let (id, edge, _) = best?;
        // Index shift ahead: held vertex handles would dangle.
        self.clear_selection();
        let poly = self.shapes[id]
            .as_polygon_mut()
            .expect("winning shape is a polygon");
        let n = poly.vertex_count();
        let mid = (poly.vertex(edge) + poly.vertex((edge + 1) % n)) * 0.5;
        let at = (edge + 1) % n;
        poly.insert_vertex(at, mid);
        debug!(shape = id, index = at, "vertex inserted");
        Some((id, at))
    }

    /// Remove every vertex within `radius` of the world point, across
    /// all polygons. Returns the number of vertices removed.
    ///
    /// Matched indices are processed in descending order so a removal
    /// never shifts a not-yet-processed match. Removals that would
    /// cross the 3-vertex floor are skipped with a notice; remaining
    /// matches (and other shapes) still proceed.
    pub fn remove_vertices_at(&mut self, world: Vector2<f64>, radius: f64) -> usize {
        self.clear_selection();
        let mut removed = 0;
        for id in 0..self.shapes.len() {
            let Some(hits) = self.shapes[id].vertices_within(world, radius) else {
                continue;
            };
            let mut indices = hits.indices;
            indices.sort_unstable_by(|a, b| b.cmp(a));
            let poly = self.shapes[id]
                .as_polygon_mut()
                .expect("hit shape is a polygon");
            for i in indices {
                if poly.remove_vertex(i) {
                    removed += 1;
                } else {
                    warn!(shape = id, index = i, "at vertex floor; removal skipped");
                }
            }
        }
        removed
    }
}
