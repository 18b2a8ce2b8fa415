//! Stateless 2D geometry used by the editor.
//!
//! Purpose
//! - Provide the handful of queries the interactive loop needs
//!   (squared distance, clamped segment projection, vertex centroid)
//!   plus the local↔world rigid transform every shape carries.
//! - Keep the API minimal (KISS, YAGNI) and numerically explicit.
//!
//! Code cross-refs: `Transform2`, `shape::Shape`, `editor::EditorSession`

mod types;
mod util;

pub use types::Transform2;
pub use util::{closest_point_on_segment, dist_sq, rotate, vertex_centroid};
