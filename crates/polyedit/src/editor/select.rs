//! Selection building, drag targets, and cross-shape vertex snapping.
//!
//! Why a sum type
//! - The selection mixes whole shapes and single vertices; a tagged
//!   `Pick` makes the drag dispatch exhaustive instead of a loose
//!   union, and the compiler checks both arms.
//!
//! Code cross-refs: `EditorSession`, `shape::Shape::vertices_within`

use nalgebra::Vector2;
use tracing::debug;

use super::EditorSession;
use crate::geom::dist_sq;

/// One selectable unit: a whole shape or a single polygon vertex.
///
/// Vertex picks are `(shape id, vertex index)` handles into the
/// session's shape list. They are re-derived on every pointer-down and
/// invalidated by any topology mutation; the session clears the
/// selection on insert/remove/shape-removal for exactly that reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick {
    Shape(usize),
    Vertex { shape: usize, index: usize },
}

impl EditorSession {
    /// Rebuild the selection for a pointer-down at world point `p`.
    ///
    /// Per shape: vertex hits win; a shape with no vertex in range
    /// falls back to its containment test and is picked whole, with
    /// offset `origin - pointer`. One gesture may select vertices of
    /// several shapes at once.
    pub(crate) fn build_selection(&mut self, p: Vector2<f64>) {
        self.clear_selection();
        let radius = self.cfg.hit_radius;
        for (id, shape) in self.shapes.iter().enumerate() {
            if let Some(hits) = shape.vertices_within(p, radius) {
                for (index, offset) in hits.indices.into_iter().zip(hits.offsets) {
                    self.selection.push(Pick::Vertex { shape: id, index });
                    self.offsets.push(offset);
                }
            } else if shape.contains_point(p) {
                self.selection.push(Pick::Shape(id));
                self.offsets.push(shape.transform.position - p);
            }
        }
        debug_assert_eq!(self.selection.len(), self.offsets.len());
        debug!(picks = self.selection.len(), "selection built");
    }

    /// Apply a drag update for the world pointer position `p`.
    ///
    /// Each pick targets `p + offset`. Vertex targets optionally snap
    /// to the nearest vertex of any other polygon; squared distances
    /// compare against the squared snap radius throughout. Targets are
    /// computed against the pre-move state, then applied.
    pub(crate) fn drag_update(&mut self, p: Vector2<f64>) {
        debug_assert_eq!(self.selection.len(), self.offsets.len());
        let snap_r_sq = self.cfg.snap_radius * self.cfg.snap_radius;
        let mut moves: Vec<(Pick, Vector2<f64>)> = Vec::with_capacity(self.selection.len());
        for (pick, offset) in self.selection.iter().zip(&self.offsets) {
            let mut target = p + offset;
            if self.cfg.snap_enabled {
                if let Pick::Vertex { shape, .. } = *pick {
                    if let Some((world, d_sq)) = self.nearest_foreign_vertex(target, shape) {
                        if d_sq < snap_r_sq {
                            target = world;
                        }
                    }
                }
            }
            moves.push((*pick, target));
        }
        for (pick, target) in moves {
            match pick {
                Pick::Shape(id) => self.shapes[id].transform.position = target,
                Pick::Vertex { shape, index } => {
                    let local = self.shapes[shape].to_local(target);
                    if let Some(poly) = self.shapes[shape].as_polygon_mut() {
                        poly.set_vertex(index, local);
                    }
                }
            }
        }
    }

    /// Nearest vertex (world position, squared distance) of any polygon
    /// other than `exclude` to the world-space candidate.
    fn nearest_foreign_vertex(
        &self,
        candidate: Vector2<f64>,
        exclude: usize,
    ) -> Option<(Vector2<f64>, f64)> {
        let mut best: Option<(Vector2<f64>, f64)> = None;
        for (id, shape) in self.shapes.iter().enumerate() {
            if id == exclude {
                continue;
            }
            let Some(poly) = shape.as_polygon() else {
                continue;
            };
            let local = shape.to_local(candidate);
            for i in 0..poly.vertex_count() {
                let d_sq = dist_sq(poly.vertex(i), local);
                if best.map_or(true, |(_, b)| d_sq < b) {
                    best = Some((shape.to_world(poly.vertex(i)), d_sq));
                }
            }
        }
        best
    }
}
