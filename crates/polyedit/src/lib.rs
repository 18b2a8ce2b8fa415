//! Interactive polygon editing core for physics level authoring.
//!
//! The crate is the editor-side engine only: hit-testing, selection and
//! drag state, vertex topology edits, cross-shape snapping, and local
//! recentering. Rendering and the physics world consume this crate
//! through the shape list and selection surface; neither lives here.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - Prefer clarity and better design over compatibility; breaking
//!   changes are fine when they improve quality.

pub mod editor;
pub mod geom;
pub mod persist;
pub mod shape;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience re-export so call sites read like the geometry notes.
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::editor::{EditCfg, EditorSession, Pick, PointerMode, ViewState};
    pub use crate::geom::{
        closest_point_on_segment, dist_sq, rotate, vertex_centroid, Transform2,
    };
    pub use crate::persist::{
        decode_shapes, encode_shapes, DataFormatError, FileStore, MemoryStore, PersistError,
        SnapshotStore,
    };
    pub use crate::shape::rand::{draw_fixture_radial, RadialCfg, ReplayToken, VertexCount};
    pub use crate::shape::{Polygon, Shape, ShapeKind, VertexHits, MIN_POLYGON_VERTICES};
    pub use nalgebra::Vector2 as Vec2;
}
