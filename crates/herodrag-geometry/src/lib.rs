//! Pure math for herodrag
//!
//! This crate contains the geometry primitives shared by the animation and
//! gesture crates: points, drag vectors, frames and the scale-then-translate
//! view transform.

mod geometry;
mod transform;

pub use geometry::*;
pub use transform::*;

pub mod prelude {
    pub use crate::geometry::{lerp, Point, Rect, Size, Vector2};
    pub use crate::transform::Transform;
}
