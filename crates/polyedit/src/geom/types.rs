//! Rigid local↔world transform carried by every shape.
//!
//! - `Transform2`: translation + rotation angle (radians, CCW). The
//!   editor mutates both during drags; distances are preserved, so
//!   radius tests can run in either frame.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::util::rotate;

/// Position + rotation of a shape's local frame in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform2 {
    pub position: Vector2<f64>,
    pub angle: f64,
}

impl Transform2 {
    #[inline]
    pub fn new(position: Vector2<f64>, angle: f64) -> Self {
        Self { position, angle }
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Vector2::zeros(),
            angle: 0.0,
        }
    }

    /// Local point -> world point (rotate, then translate).
    #[inline]
    pub fn to_world(&self, local: Vector2<f64>) -> Vector2<f64> {
        self.position + rotate(local, self.angle)
    }

    /// World point -> local point (inverse transform).
    #[inline]
    pub fn to_local(&self, world: Vector2<f64>) -> Vector2<f64> {
        rotate(world - self.position, -self.angle)
    }
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}
