//! Animation system for herodrag
//!
//! Time-based tweens and spring physics driven by the runtime's frame clock,
//! plus the externally scrubbed [`InteractiveTransition`].

pub mod animation;
pub mod easing;
pub mod interactive;

pub use animation::*;
pub use easing::Easing;
pub use interactive::{InteractiveTransition, TransitionError, TransitionOutcome};

pub mod prelude {
    pub use crate::animation::{
        Animatable, AnimationEnd, AnimationSpec, AnimationType, Lerp, SpringSpec,
    };
    pub use crate::easing::Easing;
    pub use crate::interactive::{InteractiveTransition, TransitionError, TransitionOutcome};
}
