//! Gesture-driven transitions for herodrag
//!
//! Turns a continuous drag into one of two transitions: a rubber-banded free
//! drag that dismisses the view past a threshold, or a percent-driven
//! side-panel reveal that commits past a fraction of the view's width. The
//! first decisive movement picks one, once, and the choice holds until the
//! finger lifts.
//!
//! The moving parts, bottom up:
//!
//! * [`DragTracker`] turns pointer events into [`DragSample`]s.
//! * [`damp`]/[`damped_drag`] and [`DirectionLockPolicy`] are the pure maths.
//! * [`GestureSession`] is the per-drag state machine.
//! * [`TransitionPresenter`] plays the tail end after release.
//! * [`TransitionDriver`] ties one recognizer to its views and to the shared
//!   [`RecognizerArbiter`].

pub mod arbitration;
pub mod commit;
pub mod config;
pub mod constants;
pub mod damping;
pub mod direction;
pub mod driver;
pub mod pointer;
pub mod presenter;
pub mod sample;
pub mod session;
pub mod surfaces;
pub mod tracker;
pub mod velocity;

pub use arbitration::{
    ArbitrationPolicy, BeginRejection, RecognizerArbiter, RecognizerId, RecognizerRole,
    RoleArbitration, SharedArbiter,
};
pub use commit::{panel_percent, should_commit_dismiss, should_commit_panel, DismissThreshold};
pub use config::GestureConfig;
pub use damping::{damp, damped_drag, DampedDrag, DampingParameters};
pub use direction::{DirectionLockPolicy, GestureIntent};
pub use driver::{DriverEvent, TransitionDriver};
pub use pointer::{PointerEvent, PointerEventKind, PointerId};
pub use presenter::{Presentation, TransitionPresenter};
pub use sample::{DragPhase, DragSample};
pub use session::{GestureSession, RevertPlan, SessionEnv, SessionOutcome, SessionPhase};
pub use surfaces::{
    Collaborators, DraggableSurface, FadeableOverlay, RescalableContainer, SurfaceHandles,
    TransitionHost, WeakCollaborators,
};
pub use tracker::DragTracker;
pub use velocity::{VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::arbitration::{RecognizerArbiter, RecognizerRole, SharedArbiter};
    pub use crate::config::GestureConfig;
    pub use crate::direction::GestureIntent;
    pub use crate::driver::{DriverEvent, TransitionDriver};
    pub use crate::presenter::Presentation;
    pub use crate::sample::{DragPhase, DragSample};
    pub use crate::surfaces::{
        DraggableSurface, FadeableOverlay, RescalableContainer, SurfaceHandles, TransitionHost,
    };
}
