//! Single-threaded UI runtime for herodrag.
//!
//! Every gesture, transition and animation in herodrag runs on the thread that
//! created the [`Runtime`]. Nothing here is `Send`; debug builds assert the
//! thread affinity whenever frame callbacks are registered or drained.

pub mod collections;
mod frame_clock;
mod owned;
pub mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use owned::Owned;
pub use platform::{Clock, MonotonicClock, RuntimeScheduler, StdScheduler};
pub use runtime::{Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::owned::Owned;
    pub use crate::runtime::{Runtime, RuntimeHandle};
}
