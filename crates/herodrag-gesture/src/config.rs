//! Tunables for one transition driver.

use herodrag_animation::{AnimationSpec, Easing, SpringSpec};
use herodrag_geometry::Vector2;

use crate::commit::{self, DismissThreshold};
use crate::constants::*;
use crate::damping::DampingParameters;
use crate::direction::DirectionLockPolicy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub damping: DampingParameters,
    pub dismiss_threshold: DismissThreshold,
    /// Release speed that commits a dismiss short of the threshold. Off by
    /// default.
    pub dismiss_fling_velocity: Option<f32>,
    pub panel_commit_fraction: f32,
    pub direction_lock: DirectionLockPolicy,
    pub overlay_min_alpha: f32,
    pub panel_host_min_scale: f32,
    pub revert_spring: SpringSpec,
    pub panel_settle: AnimationSpec,
    pub touch_slop: f32,
    pub max_fling_velocity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            damping: DampingParameters::default(),
            dismiss_threshold: DismissThreshold::Euclidean(DISMISS_DISTANCE),
            dismiss_fling_velocity: None,
            panel_commit_fraction: PANEL_COMMIT_FRACTION,
            direction_lock: DirectionLockPolicy::immediate(),
            overlay_min_alpha: OVERLAY_MIN_ALPHA,
            panel_host_min_scale: PANEL_HOST_MIN_SCALE,
            revert_spring: SpringSpec::with_duration(REVERT_DURATION_MILLIS, REVERT_DAMPING_RATIO)
                .with_initial_velocity(REVERT_INITIAL_VELOCITY),
            panel_settle: AnimationSpec::tween(PANEL_SETTLE_MILLIS, Easing::FastOutSlowIn),
            touch_slop: DRAG_THRESHOLD,
            max_fling_velocity: MAX_FLING_VELOCITY,
        }
    }
}

impl GestureConfig {
    pub fn with_damping(mut self, damping: DampingParameters) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_dismiss_threshold(mut self, threshold: DismissThreshold) -> Self {
        self.dismiss_threshold = threshold;
        self
    }

    pub fn with_dismiss_fling_velocity(mut self, velocity: f32) -> Self {
        self.dismiss_fling_velocity = Some(velocity);
        self
    }

    pub fn with_panel_commit_fraction(mut self, fraction: f32) -> Self {
        self.panel_commit_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_direction_lock(mut self, policy: DirectionLockPolicy) -> Self {
        self.direction_lock = policy;
        self
    }

    pub fn with_overlay_min_alpha(mut self, alpha: f32) -> Self {
        self.overlay_min_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_revert_spring(mut self, spring: SpringSpec) -> Self {
        self.revert_spring = spring;
        self
    }

    pub fn with_panel_settle(mut self, settle: AnimationSpec) -> Self {
        self.panel_settle = settle;
        self
    }

    pub fn with_touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop.max(0.0);
        self
    }

    pub fn should_commit_dismiss(&self, translation: Vector2, velocity: Vector2) -> bool {
        commit::should_commit_dismiss(
            self.dismiss_threshold,
            self.dismiss_fling_velocity,
            translation,
            velocity,
        )
    }

    pub fn should_commit_panel(&self, percent: f32) -> bool {
        commit::should_commit_panel(percent, self.panel_commit_fraction)
    }
}
