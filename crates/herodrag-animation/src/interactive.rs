//! Externally scrubbed transition.
//!
//! An [`InteractiveTransition`] has no clock of its own while the finger is
//! down: the gesture layer sets its position with [`update`]. Once the gesture
//! decides, [`finish`] or [`cancel`] plays the rest of the way on the frame
//! clock with a fixed settle tween, and the transition is spent. Exactly one of
//! the two terminal calls takes effect; anything after it is rejected with a
//! [`TransitionError`] and has no observable effect.
//!
//! Dropping the handle while still scrubbing forces the reverted state at
//! once, so a torn-down screen never stays half transitioned. Dropping it
//! after a terminal call lets the settle animation run to completion.
//!
//! [`update`]: InteractiveTransition::update
//! [`finish`]: InteractiveTransition::finish
//! [`cancel`]: InteractiveTransition::cancel

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use herodrag_core::collections::ListenerVec;
use herodrag_core::FrameClock;

use crate::animation::{Animatable, AnimationSpec, AnimationType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Played to the committed end (progress 1).
    Finished,
    /// Played back to the reverted end (progress 0).
    Cancelled,
}

impl TransitionOutcome {
    fn end_progress(self) -> f32 {
        match self {
            TransitionOutcome::Finished => 1.0,
            TransitionOutcome::Cancelled => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    AlreadyFinished,
    AlreadyCancelled,
}

impl From<TransitionOutcome> for TransitionError {
    fn from(outcome: TransitionOutcome) -> Self {
        match outcome {
            TransitionOutcome::Finished => TransitionError::AlreadyFinished,
            TransitionOutcome::Cancelled => TransitionError::AlreadyCancelled,
        }
    }
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::AlreadyFinished => write!(f, "transition already finished"),
            TransitionError::AlreadyCancelled => write!(f, "transition already cancelled"),
        }
    }
}

impl std::error::Error for TransitionError {}

/// Calls after the terminal one are caller bugs: reported in debug builds,
/// silently rejected in release.
fn rejected(call: fmt::Arguments<'_>, outcome: TransitionOutcome) -> TransitionError {
    let err = TransitionError::from(outcome);
    if cfg!(debug_assertions) {
        log::warn!("{call} ignored: {err}");
    }
    err
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Interactive,
    Settling(TransitionOutcome),
    Done(TransitionOutcome),
}

type ProgressListener = Rc<dyn Fn(f32)>;
type CompletionCallback = Box<dyn FnOnce(TransitionOutcome)>;

struct TransitionInner {
    clock: FrameClock,
    settle: AnimationSpec,
    stage: Stage,
    scrub: f32,
    progress_listeners: ListenerVec<ProgressListener>,
    completion: ListenerVec<CompletionCallback>,
    /// Held until the settle run completes; its end callback keeps this
    /// inner alive after the handle is gone.
    settle_animation: Option<Animatable<f32>>,
}

/// Single-owner handle to a percent-driven transition.
pub struct InteractiveTransition {
    inner: Rc<RefCell<TransitionInner>>,
}

impl InteractiveTransition {
    /// `settle` is the fixed tween used by both terminal calls, independent of
    /// how far the scrub got.
    pub fn new(clock: FrameClock, settle: AnimationSpec) -> Self {
        let inner = TransitionInner {
            clock,
            settle,
            stage: Stage::Interactive,
            scrub: 0.0,
            progress_listeners: ListenerVec::new(),
            completion: ListenerVec::new(),
            settle_animation: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Observe every progress value, scrubbed or animated.
    pub fn on_progress(&self, listener: impl Fn(f32) + 'static) {
        self.inner
            .borrow_mut()
            .progress_listeners
            .push(Rc::new(listener));
    }

    /// Run `callback` once the transition has reached its end state.
    pub fn on_complete(&self, callback: impl FnOnce(TransitionOutcome) + 'static) {
        let done = match self.inner.borrow().stage {
            Stage::Done(outcome) => Some(outcome),
            _ => None,
        };
        match done {
            Some(outcome) => callback(outcome),
            None => self
                .inner
                .borrow_mut()
                .completion
                .push(Box::new(callback)),
        }
    }

    /// Scrub position while interactive; `None` once a terminal call was made.
    pub fn progress(&self) -> Option<f32> {
        let inner = self.inner.borrow();
        match inner.stage {
            Stage::Interactive => Some(inner.scrub),
            _ => None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.inner.borrow().stage == Stage::Interactive
    }

    /// The terminal call that was made, if any.
    pub fn outcome(&self) -> Option<TransitionOutcome> {
        match self.inner.borrow().stage {
            Stage::Interactive => None,
            Stage::Settling(outcome) | Stage::Done(outcome) => Some(outcome),
        }
    }

    /// Set the scrub position. Out-of-range input is clamped to `[0, 1]`.
    pub fn update(&mut self, percent: f32) -> Result<(), TransitionError> {
        if let Some(outcome) = self.outcome() {
            return Err(rejected(format_args!("update({percent})"), outcome));
        }
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 1.0)
        };
        TransitionInner::emit_progress(&self.inner, percent);
        Ok(())
    }

    /// Play to the committed end.
    pub fn finish(&mut self) -> Result<(), TransitionError> {
        self.settle(TransitionOutcome::Finished)
    }

    /// Play back to the reverted end.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        self.settle(TransitionOutcome::Cancelled)
    }

    fn settle(&mut self, outcome: TransitionOutcome) -> Result<(), TransitionError> {
        if let Some(previous) = self.outcome() {
            return Err(rejected(format_args!("{outcome:?}"), previous));
        }

        let (clock, settle, from) = {
            let mut inner = self.inner.borrow_mut();
            inner.stage = Stage::Settling(outcome);
            (inner.clock.clone(), inner.settle, inner.scrub)
        };
        log::debug!("transition settling to {outcome:?} from {from:.3}");

        if !clock.runtime_handle().is_alive() {
            TransitionInner::emit_progress(&self.inner, outcome.end_progress());
            TransitionInner::complete(&self.inner, outcome);
            return Ok(());
        }

        let animation = Animatable::new(from, clock);
        let weak = Rc::downgrade(&self.inner);
        animation.set_listener(move |value: &f32| {
            if let Some(inner) = weak.upgrade() {
                TransitionInner::emit_progress(&inner, *value);
            }
        });
        let strong = Rc::clone(&self.inner);
        animation.animate_to(
            outcome.end_progress(),
            AnimationType::Tween(settle),
            move |_| TransitionInner::complete(&strong, outcome),
        );
        self.inner.borrow_mut().settle_animation = Some(animation);
        Ok(())
    }
}

impl TransitionInner {
    fn emit_progress(this: &Rc<RefCell<TransitionInner>>, value: f32) {
        let listeners = {
            let mut inner = this.borrow_mut();
            inner.scrub = value;
            inner.progress_listeners.clone()
        };
        for listener in listeners {
            listener(value);
        }
    }

    fn complete(this: &Rc<RefCell<TransitionInner>>, outcome: TransitionOutcome) {
        let (callbacks, animation) = {
            let mut inner = this.borrow_mut();
            if let Stage::Done(_) = inner.stage {
                return;
            }
            inner.stage = Stage::Done(outcome);
            (
                std::mem::take(&mut inner.completion),
                inner.settle_animation.take(),
            )
        };
        log::debug!("transition completed: {outcome:?}");
        for callback in callbacks {
            callback(outcome);
        }
        drop(animation);
    }
}

impl Drop for InteractiveTransition {
    fn drop(&mut self) {
        if self.is_interactive() {
            log::warn!("interactive transition dropped mid-scrub; forcing the reverted state");
            self.inner.borrow_mut().stage = Stage::Settling(TransitionOutcome::Cancelled);
            TransitionInner::emit_progress(&self.inner, 0.0);
            TransitionInner::complete(&self.inner, TransitionOutcome::Cancelled);
        }
    }
}

impl fmt::Debug for InteractiveTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("InteractiveTransition")
            .field("stage", &inner.stage)
            .field("scrub", &inner.scrub)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/interactive_tests.rs"]
mod tests;
