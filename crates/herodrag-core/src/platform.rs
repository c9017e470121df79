//! Platform hooks for the herodrag runtime.
//!
//! The host decides when frames happen. The runtime only asks for one through
//! [`RuntimeScheduler`] and takes the frame time it is given.

use std::sync::atomic::{AtomicBool, Ordering};

use web_time::Instant;

/// Receives frame requests from the runtime.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information to hosts driving the runtime.
pub trait Clock {
    type Instant: Copy;

    fn now(&self) -> Self::Instant;

    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}

/// Scheduler that records frame requests for a host loop to poll.
pub struct StdScheduler {
    frame_requested: AtomicBool,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            frame_requested: AtomicBool::new(false),
        }
    }

    /// Returns whether a frame has been requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
    }
}

/// Monotonic wall clock anchored at construction.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn uptime_millis(&self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}
