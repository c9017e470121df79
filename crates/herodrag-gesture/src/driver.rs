//! Binds one recognizer role to the views it moves.
//!
//! A [`TransitionDriver`] receives every [`DragSample`] of its recognizer,
//! asks the shared arbiter whether it may start, runs a [`GestureSession`]
//! while the finger is down and hands the session's outcome to its
//! [`TransitionPresenter`].

use std::fmt;
use std::rc::Rc;

use herodrag_core::FrameClock;
use herodrag_geometry::Vector2;

use crate::arbitration::{BeginRejection, RecognizerId, RecognizerRole, SharedArbiter};
use crate::config::GestureConfig;
use crate::direction::GestureIntent;
use crate::pointer::PointerEvent;
use crate::presenter::{Presentation, TransitionPresenter};
use crate::sample::{DragPhase, DragSample};
use crate::session::{GestureSession, RevertPlan, SessionEnv, SessionPhase};
use crate::surfaces::{SurfaceHandles, TransitionHost};
use crate::tracker::DragTracker;

/// What a driver did with one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEvent {
    Ignored,
    Rejected(BeginRejection),
    /// The dragged surface is gone.
    Detached,
    Began,
    Moved,
    Finished(Presentation),
}

pub struct TransitionDriver {
    role: RecognizerRole,
    recognizer: RecognizerId,
    arbiter: SharedArbiter,
    handles: SurfaceHandles,
    host: Rc<dyn TransitionHost>,
    config: GestureConfig,
    tracker: DragTracker,
    presenter: TransitionPresenter,
    session: Option<GestureSession>,
    /// Set when the current drag was refused; samples are dropped until it
    /// ends.
    refused: bool,
    last_presentation: Option<Presentation>,
}

impl TransitionDriver {
    pub fn new(
        role: RecognizerRole,
        arbiter: &SharedArbiter,
        handles: SurfaceHandles,
        host: Rc<dyn TransitionHost>,
        clock: FrameClock,
        config: GestureConfig,
    ) -> Self {
        let recognizer = arbiter.update(|arbiter| arbiter.attach(role));
        Self {
            role,
            recognizer,
            arbiter: arbiter.clone(),
            handles,
            host,
            tracker: DragTracker::new(config.touch_slop, config.max_fling_velocity),
            presenter: TransitionPresenter::new(clock, config.revert_spring),
            config,
            session: None,
            refused: false,
            last_presentation: None,
        }
    }

    pub fn role(&self) -> RecognizerRole {
        self.role
    }

    pub fn recognizer(&self) -> RecognizerId {
        self.recognizer
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map_or(SessionPhase::Idle, GestureSession::phase)
    }

    pub fn intent(&self) -> GestureIntent {
        self.session
            .as_ref()
            .map_or(GestureIntent::Undecided, GestureSession::intent)
    }

    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(GestureSession::is_dragging)
    }

    pub fn is_animating(&self) -> bool {
        self.presenter.is_animating()
    }

    pub fn last_presentation(&self) -> Option<Presentation> {
        self.last_presentation
    }

    /// Feed a raw pointer event through the driver's drag tracker.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> DriverEvent {
        match self.tracker.on_pointer_event(event) {
            Some(sample) => self.handle(sample),
            None => DriverEvent::Ignored,
        }
    }

    pub fn handle(&mut self, sample: DragSample) -> DriverEvent {
        log::trace!(
            "{:?} {:?} {:?} v={:?}",
            self.role,
            sample.phase,
            sample.translation,
            sample.velocity
        );
        match sample.phase {
            DragPhase::Began => self.on_began(&sample),
            DragPhase::Changed => self.on_changed(&sample),
            DragPhase::Ended | DragPhase::Cancelled => self.on_end(&sample),
        }
    }

    fn on_began(&mut self, sample: &DragSample) -> DriverEvent {
        if self.session.is_some() {
            log::warn!("{:?} began while a drag was live; abandoning it", self.role);
            self.on_end(&DragSample::cancelled(Vector2::ZERO, Vector2::ZERO));
        }
        self.refused = false;
        let interrupted = self.presenter.interrupt();
        self.start_session(sample, interrupted.as_ref(), false)
    }

    fn on_changed(&mut self, sample: &DragSample) -> DriverEvent {
        if self.refused {
            return DriverEvent::Ignored;
        }
        if self.session.is_none() {
            let interrupted = self.presenter.interrupt();
            match self.start_session(sample, interrupted.as_ref(), true) {
                DriverEvent::Began => {}
                other => return other,
            }
        }

        let Some(session) = self.session.as_mut() else {
            return DriverEvent::Ignored;
        };
        let env = SessionEnv {
            recognizer: self.recognizer,
            config: &self.config,
            host: self.host.as_ref(),
            arbiter: &self.arbiter,
        };
        session.on_changed(sample, &env);
        DriverEvent::Moved
    }

    fn on_end(&mut self, sample: &DragSample) -> DriverEvent {
        if std::mem::take(&mut self.refused) {
            return DriverEvent::Ignored;
        }
        let Some(session) = self.session.take() else {
            log::trace!("{:?} {:?} with no live drag", self.role, sample.phase);
            return DriverEvent::Ignored;
        };
        let recognizer = self.recognizer;
        self.arbiter.update(|arbiter| arbiter.end(recognizer));

        let env = SessionEnv {
            recognizer,
            config: &self.config,
            host: self.host.as_ref(),
            arbiter: &self.arbiter,
        };
        let outcome = session.end(sample, &env);
        let presentation = self.presenter.present(outcome, self.host.as_ref());
        self.last_presentation = Some(presentation);
        DriverEvent::Finished(presentation)
    }

    fn start_session(
        &mut self,
        sample: &DragSample,
        interrupted: Option<&RevertPlan>,
        resumed: bool,
    ) -> DriverEvent {
        let recognizer = self.recognizer;
        let velocity = sample.velocity;
        if let Err(rejection) = self
            .arbiter
            .update(|arbiter| arbiter.request_begin(recognizer, velocity))
        {
            log::debug!("{:?} drag refused: {rejection}", self.role);
            self.refused = true;
            return DriverEvent::Rejected(rejection);
        }

        let Some(view) = self.handles.upgrade() else {
            log::debug!("{:?} drag ignored: surface is gone", self.role);
            self.arbiter.update(|arbiter| arbiter.end(recognizer));
            self.refused = true;
            return DriverEvent::Detached;
        };

        let baseline = if resumed {
            log::warn!("{:?} drag changed without a began; starting mid-drag", self.role);
            sample.translation
        } else {
            Vector2::ZERO
        };
        self.session = Some(GestureSession::start(
            self.role,
            view,
            baseline,
            interrupted,
        ));
        DriverEvent::Began
    }
}

impl Drop for TransitionDriver {
    fn drop(&mut self) {
        let recognizer = self.recognizer;
        if let Some(session) = self.session.take() {
            let env = SessionEnv {
                recognizer,
                config: &self.config,
                host: self.host.as_ref(),
                arbiter: &self.arbiter,
            };
            let outcome = session.end(&DragSample::cancelled(Vector2::ZERO, Vector2::ZERO), &env);
            self.presenter.present_immediately(outcome);
        }
        if self
            .arbiter
            .try_update(|arbiter| arbiter.detach(recognizer))
            .is_none()
        {
            log::warn!("arbiter busy while dropping recognizer {recognizer}; left attached");
        }
    }
}

impl fmt::Debug for TransitionDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionDriver")
            .field("role", &self.role)
            .field("recognizer", &self.recognizer)
            .field("session", &self.session)
            .field("refused", &self.refused)
            .field("presenter", &self.presenter)
            .finish()
    }
}
