//! Testing utilities and harness for herodrag

pub mod assertions;
pub mod fakes;
pub mod rule;
pub mod script;

pub use assertions::*;
pub use fakes::*;
pub use rule::*;
pub use script::*;

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::fakes::{
        HostCall, RecordingContainer, RecordingHost, RecordingOverlay, RecordingSurface,
    };
    pub use crate::rule::{GestureTestRule, TransitionScene};
    pub use crate::script::{pointer_drag, DragScript};
}
