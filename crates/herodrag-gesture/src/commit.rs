//! Release decisions.
//!
//! Both decisions are pure functions of the final drag sample, so the same
//! release always resolves the same way.

use herodrag_geometry::Vector2;

/// Distance measure compared against the dismiss threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DismissThreshold {
    /// Downward travel only: commits when `dy > distance`.
    Vertical(f32),
    /// Rightward travel only: commits when `dx > distance`.
    Horizontal(f32),
    /// Travel in any direction: commits when `hypot(dx, dy) > distance`.
    Euclidean(f32),
}

impl DismissThreshold {
    pub fn distance(&self) -> f32 {
        match *self {
            DismissThreshold::Vertical(distance)
            | DismissThreshold::Horizontal(distance)
            | DismissThreshold::Euclidean(distance) => distance,
        }
    }

    /// Travel of `translation` as measured by this threshold.
    pub fn travel(&self, translation: Vector2) -> f32 {
        match self {
            DismissThreshold::Vertical(_) => translation.y,
            DismissThreshold::Horizontal(_) => translation.x,
            DismissThreshold::Euclidean(_) => translation.length(),
        }
    }

    /// Speed of `velocity` along the same measure.
    pub fn speed(&self, velocity: Vector2) -> f32 {
        match self {
            DismissThreshold::Vertical(_) => velocity.y,
            DismissThreshold::Horizontal(_) => velocity.x,
            DismissThreshold::Euclidean(_) => velocity.length(),
        }
    }

    pub fn is_exceeded(&self, translation: Vector2) -> bool {
        let travel = self.travel(translation);
        travel.is_finite() && travel > self.distance()
    }
}

/// Whether a free drag released with `translation` and `velocity` dismisses.
///
/// `fling_velocity`, when set, lets a fast release commit short of the
/// distance threshold.
pub fn should_commit_dismiss(
    threshold: DismissThreshold,
    fling_velocity: Option<f32>,
    translation: Vector2,
    velocity: Vector2,
) -> bool {
    if threshold.is_exceeded(translation) {
        return true;
    }
    match fling_velocity {
        Some(fling) => {
            let speed = threshold.speed(velocity);
            speed.is_finite() && speed > fling
        }
        None => false,
    }
}

/// Fraction of `width` covered by a leftward translation `dx`, clamped to
/// `[0, 1]`. A missing or degenerate width yields 0.
pub fn panel_percent(dx: f32, width: f32) -> f32 {
    if !(width > 0.0) || !width.is_finite() || !dx.is_finite() {
        return 0.0;
    }
    (-dx / width).clamp(0.0, 1.0)
}

/// Whether a panel reveal released at `percent` commits.
pub fn should_commit_panel(percent: f32, commit_fraction: f32) -> bool {
    percent > commit_fraction
}
