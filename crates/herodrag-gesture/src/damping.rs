//! Rubber-band damping for free drags.
//!
//! A raw finger translation is mapped through `x * f / (|x| + f)`, which
//! follows the finger closely for short drags and approaches `f` for long
//! ones. The damped vector is then clamped to a maximum drag distance, and
//! its fraction of that distance drives how far the view shrinks.

use herodrag_geometry::{Transform, Vector2};

use crate::constants::{DAMPING_FACTOR, DRAG_SCALE_RANGE, MAX_DAMPED_DRAG};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampingParameters {
    /// Asymptote of the rubber-band curve. Must be positive.
    pub factor: f32,
    /// Damped distance at which progress reaches 1. Must be positive.
    pub max_drag: f32,
}

impl DampingParameters {
    pub const fn new(factor: f32, max_drag: f32) -> Self {
        Self { factor, max_drag }
    }

    fn is_usable(&self) -> bool {
        self.factor > 0.0
            && self.factor.is_finite()
            && self.max_drag > 0.0
            && self.max_drag.is_finite()
    }
}

impl Default for DampingParameters {
    fn default() -> Self {
        Self::new(DAMPING_FACTOR, MAX_DAMPED_DRAG)
    }
}

/// Damp one axis.
///
/// Odd in `value`, monotonically non-decreasing, and strictly inside
/// `(-factor, factor)` for finite input. A non-positive or non-finite
/// `factor`, or a NaN `value`, yields 0.
pub fn damp(value: f32, factor: f32) -> f32 {
    if !(factor > 0.0) || !factor.is_finite() || value.is_nan() {
        return 0.0;
    }
    if value.is_infinite() {
        return factor.copysign(value);
    }
    // Same as value * factor / (|value| + factor) without overflowing the
    // product for large inputs. f64 keeps the `+ 1` from vanishing into the
    // ratio, and the final clamp covers rounding back up to `factor`.
    let ratio = f64::from(value.abs()) / f64::from(factor);
    let damped = (f64::from(value) / (ratio + 1.0)) as f32;
    let bound = f32::from_bits(factor.to_bits() - 1);
    damped.clamp(-bound, bound)
}

/// Result of damping one drag sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedDrag {
    /// Damped, length-clamped visual offset.
    pub offset: Vector2,
    /// `|offset| / max_drag`, in `[0, 1]`.
    pub progress: f32,
    /// View scale, in `[1 - DRAG_SCALE_RANGE, 1]`.
    pub scale: f32,
}

impl DampedDrag {
    pub const NONE: DampedDrag = DampedDrag {
        offset: Vector2::ZERO,
        progress: 0.0,
        scale: 1.0,
    };

    /// Transform that puts the scaled view's visual centre at `offset`.
    ///
    /// Translation is applied in the view's own scaled space, so it is
    /// divided by the scale here.
    pub fn transform(&self) -> Transform {
        Transform::new(self.offset / self.scale, self.scale)
    }
}

/// Map a raw drag translation to the visual state of a free drag.
pub fn damped_drag(delta: Vector2, params: DampingParameters) -> DampedDrag {
    if !params.is_usable() {
        log::warn!("unusable damping parameters {params:?}; drag left at rest");
        return DampedDrag::NONE;
    }

    let damped = Vector2::new(damp(delta.x, params.factor), damp(delta.y, params.factor));
    let offset = damped.clamp_length(params.max_drag);
    let progress = (offset.length() / params.max_drag).clamp(0.0, 1.0);
    let scale = 1.0 - DRAG_SCALE_RANGE * progress;

    DampedDrag {
        offset,
        progress,
        scale,
    }
}

#[cfg(test)]
#[path = "tests/damping_tests.rs"]
mod tests;
