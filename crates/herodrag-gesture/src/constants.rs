//! Shared gesture and transition constants.
//!
//! Distances are logical points, velocities points per second and durations
//! milliseconds. Every value here is the default of a [`GestureConfig`]
//! field; call sites that need different tuning go through the config.
//!
//! [`GestureConfig`]: crate::GestureConfig

/// Touch slop. A pointer has to travel further than this from its press
/// position before a drag begins.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum fling velocity reported with an ended drag.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Drag distance past which releasing the finger dismisses the view.
pub const DISMISS_DISTANCE: f32 = 160.0;

/// Horizontal fraction of the surface width past which a side-panel reveal
/// commits on release.
pub const PANEL_COMMIT_FRACTION: f32 = 0.3;

/// Dimming overlay alpha at full drag progress.
pub const OVERLAY_MIN_ALPHA: f32 = 0.4;

/// Asymptote of the rubber-band curve.
pub const DAMPING_FACTOR: f32 = 600.0;

/// Damped drag distance at which scale bottoms out.
pub const MAX_DAMPED_DRAG: f32 = 400.0;

/// Scale lost at full drag progress: scale = 1 - DRAG_SCALE_RANGE * progress.
pub const DRAG_SCALE_RANGE: f32 = 0.5;

/// Host container scale when a side panel is fully revealed.
pub const PANEL_HOST_MIN_SCALE: f32 = 0.92;

/// Settle tween for a released side-panel reveal.
pub const PANEL_SETTLE_MILLIS: u64 = 250;

/// Nominal duration of the spring that returns a released view to its
/// origin.
pub const REVERT_DURATION_MILLIS: u64 = 300;

/// Damping ratio of the revert spring.
pub const REVERT_DAMPING_RATIO: f32 = 0.96;

/// Initial velocity of the revert spring, in fractions per second.
pub const REVERT_INITIAL_VELOCITY: f32 = 0.5;

/// Dead zone of the deliberate direction lock.
pub const DELIBERATE_DEAD_ZONE: f32 = 20.0;
