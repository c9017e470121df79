//! State of one drag, from `Began` to `Ended` or `Cancelled`.
//!
//! ```text
//! Began ──first decisive Changed──▶ Dismissing ──┬─▶ Committed (threshold / fling)
//!   │                                            └─▶ Reverted
//!   └────────────────────────────▶ RevealingPanel ─┬─▶ Committed (percent past fraction)
//!                                                  └─▶ Reverted
//! ```
//!
//! The session only moves views while the finger is down. Ending it yields a
//! [`SessionOutcome`] describing what still has to be animated or
//! navigated; the [`TransitionPresenter`](crate::TransitionPresenter) plays
//! that part.

use std::fmt;
use std::rc::Rc;

use herodrag_animation::{InteractiveTransition, TransitionOutcome};
use herodrag_geometry::{lerp, Point, Rect, Transform, Vector2};

use crate::arbitration::{RecognizerId, RecognizerRole, SharedArbiter};
use crate::commit::panel_percent;
use crate::config::GestureConfig;
use crate::damping::{damped_drag, DampedDrag};
use crate::direction::GestureIntent;
use crate::sample::{DragPhase, DragSample};
use crate::surfaces::{Collaborators, TransitionHost, WeakCollaborators};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Began,
    Dismissing,
    RevealingPanel,
    Committed,
    Reverted,
}

/// What a session borrows from its driver on every call.
pub struct SessionEnv<'a> {
    pub recognizer: RecognizerId,
    pub config: &'a GestureConfig,
    pub host: &'a dyn TransitionHost,
    pub arbiter: &'a SharedArbiter,
}

#[derive(Debug, Clone, Copy, Default)]
struct RestState {
    overlay_alpha: Option<f32>,
    container_alpha: Option<f32>,
}

pub struct GestureSession {
    role: RecognizerRole,
    phase: SessionPhase,
    intent: GestureIntent,
    view: Collaborators,
    origin_position: Point,
    /// Translation already travelled before this session took over.
    baseline: Vector2,
    rest: RestState,
    masked_for_reveal: bool,
    drag: DampedDrag,
    panel: Option<InteractiveTransition>,
    panel_percent: f32,
    has_committed_panel: bool,
}

impl GestureSession {
    /// Start a session on a `Began` sample.
    pub fn begin(role: RecognizerRole, view: Collaborators) -> Self {
        Self::start(role, view, Vector2::ZERO, None)
    }

    /// Start a session on a `Changed` sample whose `Began` was never seen.
    /// Translation up to `sample` is treated as already consumed.
    pub fn resume(role: RecognizerRole, view: Collaborators, sample: &DragSample) -> Self {
        log::warn!("{role:?} drag changed without a began; starting a session mid-drag");
        Self::start(role, view, sample.translation, None)
    }

    /// `interrupted` is a revert that was cut short by this drag. Its resting
    /// alphas stay the ones to return to; the views' current alphas are
    /// somewhere in between.
    pub(crate) fn start(
        role: RecognizerRole,
        view: Collaborators,
        baseline: Vector2,
        interrupted: Option<&RevertPlan>,
    ) -> Self {
        let origin_position = view.surface.position();
        let at_identity = view.surface.transform().is_identity();
        let rest = match interrupted {
            Some(plan) => plan.rest(),
            None => RestState {
                overlay_alpha: view.overlay.as_ref().map(|overlay| overlay.alpha()),
                container_alpha: view.container.as_ref().map(|container| container.alpha()),
            },
        };

        // A reveal may follow; mask the container before it can be seen.
        let mut masked_for_reveal = false;
        if role == RecognizerRole::Content {
            if let Some(container) = &view.container {
                masked_for_reveal = at_identity;
                container.set_masked(masked_for_reveal);
            }
        }

        log::debug!("{role:?} session began at {origin_position:?}");
        Self {
            role,
            phase: SessionPhase::Began,
            intent: GestureIntent::Undecided,
            view,
            origin_position,
            baseline,
            rest,
            masked_for_reveal,
            drag: DampedDrag::NONE,
            panel: None,
            panel_percent: 0.0,
            has_committed_panel: false,
        }
    }

    pub fn role(&self) -> RecognizerRole {
        self.role
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn intent(&self) -> GestureIntent {
        self.intent
    }

    pub fn origin_position(&self) -> Point {
        self.origin_position
    }

    pub fn origin_frame(&self) -> Option<Rect> {
        self.view.origin_frame
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Began | SessionPhase::Dismissing | SessionPhase::RevealingPanel
        )
    }

    /// Set once this session has started a side-panel reveal.
    pub fn has_committed_panel(&self) -> bool {
        self.has_committed_panel
    }

    pub fn is_masked_for_reveal(&self) -> bool {
        self.masked_for_reveal
    }

    /// Latest damped drag applied to the surface.
    pub fn damped_drag(&self) -> DampedDrag {
        self.drag
    }

    /// Latest scrub percent sent to the panel reveal.
    pub fn panel_percent(&self) -> f32 {
        self.panel_percent
    }

    fn can_reveal(&self) -> bool {
        self.role == RecognizerRole::Content && self.view.surface.transform().is_identity()
    }

    pub fn on_changed(&mut self, sample: &DragSample, env: &SessionEnv<'_>) {
        if !self.is_dragging() {
            return;
        }
        let delta = sample.translation - self.baseline;

        if !self.intent.is_locked() {
            self.intent = env
                .config
                .direction_lock
                .classify(self.intent, delta, self.can_reveal());
            match self.intent {
                GestureIntent::Undecided => return,
                GestureIntent::VerticalDismiss => {
                    log::debug!("{:?} drag locked to dismiss at {delta:?}", self.role);
                    self.phase = SessionPhase::Dismissing;
                }
                GestureIntent::HorizontalReveal => {
                    log::debug!("{:?} drag locked to panel reveal at {delta:?}", self.role);
                    self.phase = SessionPhase::RevealingPanel;
                    self.start_reveal(sample, env);
                }
            }
        }

        match self.phase {
            SessionPhase::Dismissing => self.apply_drag(delta, env.config),
            SessionPhase::RevealingPanel => self.apply_scrub(delta),
            _ => {}
        }
    }

    fn start_reveal(&mut self, sample: &DragSample, env: &SessionEnv<'_>) {
        if self.has_committed_panel {
            return;
        }
        let recognizer = env.recognizer;
        if !env.arbiter.update(|arbiter| arbiter.claim_panel(recognizer)) {
            return;
        }
        let Some(transition) = env.host.reveal_side_panel(sample) else {
            log::debug!("host declined the side-panel reveal");
            env.arbiter.update(|arbiter| arbiter.release_panel(recognizer));
            return;
        };

        let container = self.view.container.as_ref().map(Rc::downgrade);
        if let Some(weak) = container.clone() {
            let min_scale = env.config.panel_host_min_scale;
            transition.on_progress(move |progress| {
                if let Some(container) = weak.upgrade() {
                    container.set_scale(lerp(1.0, min_scale, progress));
                }
            });
        }
        let arbiter = env.arbiter.clone();
        transition.on_complete(move |outcome| {
            if outcome == TransitionOutcome::Cancelled {
                if let Some(container) = container.as_ref().and_then(|weak| weak.upgrade()) {
                    container.set_masked(false);
                    container.set_scale(1.0);
                }
            }
            arbiter.update(|arbiter| arbiter.release_panel(recognizer));
        });

        self.panel = Some(transition);
        self.has_committed_panel = true;
    }

    fn apply_drag(&mut self, delta: Vector2, config: &GestureConfig) {
        let drag = damped_drag(delta, config.damping);
        self.view.surface.set_transform(drag.transform());
        if let Some(overlay) = &self.view.overlay {
            overlay.set_alpha(lerp(1.0, config.overlay_min_alpha, drag.progress));
        }
        if let Some(container) = &self.view.container {
            container.set_alpha(lerp(config.overlay_min_alpha, 1.0, drag.progress));
        }
        log::trace!(
            "drag {delta:?} -> offset {:?} scale {:.3}",
            drag.offset,
            drag.scale
        );
        self.drag = drag;
    }

    fn apply_scrub(&mut self, delta: Vector2) {
        self.panel_percent = panel_percent(delta.x, self.view.surface.width());
        if let Some(panel) = &mut self.panel {
            if let Err(err) = panel.update(self.panel_percent) {
                log::debug!("panel scrub dropped: {err}");
            }
        }
    }

    /// Resolve the session on an `Ended` or `Cancelled` sample.
    pub fn end(mut self, sample: &DragSample, env: &SessionEnv<'_>) -> SessionOutcome {
        let cancelled = sample.phase == DragPhase::Cancelled;
        let delta = sample.translation - self.baseline;

        let outcome = match self.phase {
            SessionPhase::Dismissing => {
                if !cancelled && env.config.should_commit_dismiss(delta, sample.velocity) {
                    SessionOutcome::Dismiss {
                        role: self.role,
                        view: self.view.clone(),
                    }
                } else {
                    self.revert_plan()
                }
            }
            SessionPhase::RevealingPanel => match self.panel.take() {
                Some(mut transition) => {
                    let percent = panel_percent(delta.x, self.view.surface.width());
                    if !cancelled {
                        if let Err(err) = transition.update(percent) {
                            log::debug!("final panel scrub dropped: {err}");
                        }
                    }
                    let commit = !cancelled && env.config.should_commit_panel(percent);
                    SessionOutcome::Panel { transition, commit }
                }
                None => self.revert_plan(),
            },
            _ => self.revert_plan(),
        };

        self.has_committed_panel = false;
        log::debug!(
            "{:?} session ended ({:?}) as {:?}",
            self.role,
            sample.phase,
            outcome.phase()
        );
        outcome
    }

    fn revert_plan(&self) -> SessionOutcome {
        let overlay = self
            .view
            .overlay
            .as_ref()
            .zip(self.rest.overlay_alpha)
            .map(|(overlay, rest)| (overlay.alpha(), rest));
        let container_alpha = self
            .view
            .container
            .as_ref()
            .zip(self.rest.container_alpha)
            .map(|(container, rest)| (container.alpha(), rest));

        SessionOutcome::Revert(RevertPlan {
            view: self.view.downgrade(),
            from: self.view.surface.transform(),
            overlay,
            container_alpha,
        })
    }
}

impl fmt::Debug for GestureSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureSession")
            .field("role", &self.role)
            .field("phase", &self.phase)
            .field("intent", &self.intent)
            .field("origin_position", &self.origin_position)
            .field("has_committed_panel", &self.has_committed_panel)
            .finish()
    }
}

/// What is left to do once the finger lifts.
pub enum SessionOutcome {
    /// Spring the view back to its origin.
    Revert(RevertPlan),
    /// Navigate away from the dragged view.
    Dismiss {
        role: RecognizerRole,
        view: Collaborators,
    },
    /// Settle the panel reveal to one of its ends.
    Panel {
        transition: InteractiveTransition,
        commit: bool,
    },
}

impl SessionOutcome {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionOutcome::Revert(_) => SessionPhase::Reverted,
            SessionOutcome::Dismiss { .. } => SessionPhase::Committed,
            SessionOutcome::Panel { commit: true, .. } => SessionPhase::Committed,
            SessionOutcome::Panel { commit: false, .. } => SessionPhase::Reverted,
        }
    }
}

impl fmt::Debug for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOutcome::Revert(plan) => f.debug_tuple("Revert").field(plan).finish(),
            SessionOutcome::Dismiss { role, .. } => {
                f.debug_struct("Dismiss").field("role", role).finish()
            }
            SessionOutcome::Panel { commit, .. } => {
                f.debug_struct("Panel").field("commit", commit).finish()
            }
        }
    }
}

/// Visual state to animate back from, captured at release.
#[derive(Clone)]
pub struct RevertPlan {
    view: WeakCollaborators,
    from: Transform,
    /// `(released, resting)` overlay alpha.
    overlay: Option<(f32, f32)>,
    /// `(released, resting)` container alpha.
    container_alpha: Option<(f32, f32)>,
}

impl RevertPlan {
    pub fn from_transform(&self) -> Transform {
        self.from
    }

    fn rest(&self) -> RestState {
        RestState {
            overlay_alpha: self.overlay.map(|(_, rest)| rest),
            container_alpha: self.container_alpha.map(|(_, rest)| rest),
        }
    }

    pub fn is_trivial(&self) -> bool {
        let settled = |pair: Option<(f32, f32)>| pair.map_or(true, |(from, to)| from == to);
        self.from.is_identity() && settled(self.overlay) && settled(self.container_alpha)
    }

    /// Put the views `fraction` of the way back to rest. The spring may
    /// overshoot past 1; alphas stay in range.
    pub(crate) fn apply(&self, fraction: f32) {
        if let Some(surface) = self.view.surface() {
            surface.set_transform(self.from.interpolate(&Transform::IDENTITY, fraction));
        }
        if let Some(((from, to), overlay)) = self.overlay.zip(self.view.overlay()) {
            overlay.set_alpha(lerp(from, to, fraction).clamp(0.0, 1.0));
        }
        if let Some(((from, to), container)) = self.container_alpha.zip(self.view.container()) {
            container.set_alpha(lerp(from, to, fraction).clamp(0.0, 1.0));
        }
    }

    /// Land exactly on the resting state and drop the reveal mask.
    pub(crate) fn finish(&self) {
        if let Some(surface) = self.view.surface() {
            surface.set_transform(Transform::IDENTITY);
        }
        if let Some(((_, rest), overlay)) = self.overlay.zip(self.view.overlay()) {
            overlay.set_alpha(rest);
        }
        if let Some(container) = self.view.container() {
            if let Some((_, rest)) = self.container_alpha {
                container.set_alpha(rest);
            }
            container.set_masked(false);
            container.set_scale(1.0);
        }
    }
}

impl fmt::Debug for RevertPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevertPlan")
            .field("from", &self.from)
            .field("overlay", &self.overlay)
            .field("container_alpha", &self.container_alpha)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
