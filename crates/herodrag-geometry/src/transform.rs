//! View transform applied to a dragged surface.

use crate::geometry::{lerp, Vector2};

/// Uniform scale followed by a translation expressed in the scaled space.
///
/// This matches `scale(s).translatedBy(t)`: a point moves on screen by
/// `translation * scale`. The damped drag divides its offset by the scale so
/// the on-screen offset equals the damped offset while the view shrinks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vector2,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vector2::ZERO,
        scale: 1.0,
    };

    pub const fn new(translation: Vector2, scale: f32) -> Self {
        Self { translation, scale }
    }

    pub const fn scale(scale: f32) -> Self {
        Self {
            translation: Vector2::ZERO,
            scale,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translation.is_zero() && self.scale == 1.0
    }

    /// Displacement of the view's center as seen on screen.
    pub fn visual_offset(&self) -> Vector2 {
        self.translation * self.scale
    }

    /// Interpolates scale and visual offset independently.
    pub fn interpolate(&self, target: &Transform, fraction: f32) -> Transform {
        let scale = lerp(self.scale, target.scale, fraction);
        let from = self.visual_offset();
        let to = target.visual_offset();
        let offset = Vector2::new(lerp(from.x, to.x, fraction), lerp(from.y, to.y, fraction));
        let translation = if scale.abs() > f32::EPSILON {
            offset / scale
        } else {
            Vector2::ZERO
        };
        Transform { translation, scale }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
