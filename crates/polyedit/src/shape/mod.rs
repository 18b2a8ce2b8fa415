//! Shapes and polygon vertex storage.
//!
//! Purpose
//! - A small tagged shape set (`ShapeKind`) with a shared rigid
//!   transform, plus the polygon vertex sequence the editor mutates.
//! - Vertex hit-testing (`Shape::vertices_within`) returns parallel
//!   index/offset sequences so drags anchor to the exact grab offset.
//!
//! Invariants
//! - `Polygon` holds a flat `[x0,y0,x1,y1,...]` sequence with at least
//!   3 vertices at all times once created. Vertex order is significant:
//!   vertex `i` connects to `(i+1) % n`.
//! - Vertex references are `(shape, index)` pairs held by the editor;
//!   any insertion/removal shifts indices and invalidates them, so the
//!   editor re-derives them per gesture and never keeps them across
//!   topology edits.
//!
//! Code cross-refs: `geom::Transform2`, `editor::Pick`, `persist`

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::geom::{closest_point_on_segment, dist_sq, vertex_centroid, Transform2};

pub mod rand;


/// Floor for polygon vertex removal; below this a polygon degenerates.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Ordered polygon vertex sequence in local coordinates.
///
/// Stored flat (`[x0,y0,x1,y1,...]`) to match the persisted level
/// format; accessors index pairs at `2*i`/`2*i+1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    verts: Vec<f64>,
}

impl Polygon {
    /// Build from vertex points. `None` below the 3-vertex floor.
    pub fn new(points: &[Vector2<f64>]) -> Option<Self> {
        if points.len() < MIN_POLYGON_VERTICES {
            return None;
        }
        let verts = points.iter().flat_map(|p| [p.x, p.y]).collect();
        Some(Self { verts })
    }

    /// Build from an already-flat coordinate sequence.
    pub fn from_flat(verts: Vec<f64>) -> Option<Self> {
        if verts.len() % 2 != 0 || verts.len() < 2 * MIN_POLYGON_VERTICES {
            return None;
        }
        Some(Self { verts })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.verts.len() / 2
    }

    /// Read vertex `i`. Out-of-range indices are a caller contract
    /// violation (asserted in debug, panics via slice indexing).
    #[inline]
    pub fn vertex(&self, i: usize) -> Vector2<f64> {
        debug_assert!(i < self.vertex_count(), "vertex index out of range");
        Vector2::new(self.verts[2 * i], self.verts[2 * i + 1])
    }

    /// Write vertex `i` in place; aliases the backing sequence, no copy.
    #[inline]
    pub fn set_vertex(&mut self, i: usize, v: Vector2<f64>) {
        debug_assert!(i < self.vertex_count(), "vertex index out of range");
        self.verts[2 * i] = v.x;
        self.verts[2 * i + 1] = v.y;
    }

    /// Insert a vertex before index `at` (`at == n` appends). Shifts
    /// all subsequent indices up by one.
    pub fn insert_vertex(&mut self, at: usize, v: Vector2<f64>) {
        debug_assert!(at <= self.vertex_count(), "insertion index out of range");
        self.verts.splice(2 * at..2 * at, [v.x, v.y]);
    }

    /// Remove vertex `at`. Refuses (returns `false`) at the 3-vertex
    /// floor; shifts subsequent indices down by one on success.
    pub fn remove_vertex(&mut self, at: usize) -> bool {
        debug_assert!(at < self.vertex_count(), "removal index out of range");
        if self.vertex_count() <= MIN_POLYGON_VERTICES {
            return false;
        }
        self.verts.drain(2 * at..2 * at + 2);
        true
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vector2<f64>> + '_ {
        self.verts.chunks_exact(2).map(|p| Vector2::new(p[0], p[1]))
    }

    #[inline]
    pub fn flat(&self) -> &[f64] {
        &self.verts
    }

    /// Vertex centroid in local coordinates.
    #[inline]
    pub fn centroid(&self) -> Vector2<f64> {
        // Non-empty by construction.
        vertex_centroid(&self.verts).unwrap_or_else(Vector2::zeros)
    }

    /// Even-odd ray crossing test against the local-frame point.
    pub(crate) fn contains_local(&self, p: Vector2<f64>) -> bool {
        let n = self.vertex_count();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertex(i);
            let vj = self.vertex(j);
            if (vi.y > p.y) != (vj.y > p.y)
                && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// Concrete shape kinds; the serde tag is the persisted discriminant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeKind {
    Circle {
        radius: f64,
    },
    Rect {
        width: f64,
        height: f64,
    },
    /// Thick line segment between two local endpoints.
    Segment {
        a: Vector2<f64>,
        b: Vector2<f64>,
        width: f64,
    },
    Polygon(Polygon),
}

/// A placeable level shape: kind + local→world transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub transform: Transform2,
    pub shape: ShapeKind,
}

/// Result of a vertex hit-test: matched indices (ascending) with the
/// parallel world-space offsets `vertex_world - query`.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexHits {
    pub indices: Vec<usize>,
    pub offsets: Vec<Vector2<f64>>,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            transform: Transform2::identity(),
            shape: kind,
        }
    }

    pub fn with_transform(kind: ShapeKind, transform: Transform2) -> Self {
        Self {
            transform,
            shape: kind,
        }
    }

    /// Polygon shape from vertex points; `None` below the vertex floor.
    pub fn polygon(points: &[Vector2<f64>]) -> Option<Self> {
        Polygon::new(points).map(|p| Self::new(ShapeKind::Polygon(p)))
    }

    pub fn circle(radius: f64) -> Self {
        Self::new(ShapeKind::Circle { radius })
    }

    pub fn rect(width: f64, height: f64) -> Self {
        Self::new(ShapeKind::Rect { width, height })
    }

    #[inline]
    pub fn to_world(&self, local: Vector2<f64>) -> Vector2<f64> {
        self.transform.to_world(local)
    }

    #[inline]
    pub fn to_local(&self, world: Vector2<f64>) -> Vector2<f64> {
        self.transform.to_local(world)
    }

    #[inline]
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match &self.shape {
            ShapeKind::Polygon(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn as_polygon_mut(&mut self) -> Option<&mut Polygon> {
        match &mut self.shape {
            ShapeKind::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Whole-shape containment test against a world point.
    pub fn contains_point(&self, world: Vector2<f64>) -> bool {
        let p = self.to_local(world);
        match &self.shape {
            ShapeKind::Circle { radius } => p.norm_squared() <= radius * radius,
            ShapeKind::Rect { width, height } => {
                p.x.abs() <= width * 0.5 && p.y.abs() <= height * 0.5
            }
            ShapeKind::Segment { a, b, width } => {
                let q = closest_point_on_segment(p, *a, *b);
                dist_sq(p, q) <= (width * 0.5) * (width * 0.5)
            }
            ShapeKind::Polygon(poly) => poly.contains_local(p),
        }
    }

    /// All polygon vertices within `radius` of the world point.
    ///
    /// `None` signals "no hit" (including non-polygon shapes). Several
    /// near-coincident vertices may match at once; all are returned, in
    /// vertex-index order. The transform is rigid, so the radius test
    /// runs in the local frame unchanged.
    pub fn vertices_within(&self, world: Vector2<f64>, radius: f64) -> Option<VertexHits> {
        let poly = self.as_polygon()?;
        let local = self.to_local(world);
        let r_sq = radius * radius;
        let mut indices = Vec::new();
        let mut offsets = Vec::new();
        for i in 0..poly.vertex_count() {
            if dist_sq(poly.vertex(i), local) < r_sq {
                indices.push(i);
                offsets.push(self.to_world(poly.vertex(i)) - world);
            }
        }
        if indices.is_empty() {
            None
        } else {
            Some(VertexHits { indices, offsets })
        }
    }
}
