//! Plays whatever is left of a transition once the finger lifts.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use herodrag_animation::{
    Animatable, AnimationEnd, AnimationType, InteractiveTransition, SpringSpec,
};
use herodrag_core::FrameClock;

use crate::arbitration::RecognizerRole;
use crate::session::{RevertPlan, SessionOutcome};
use crate::surfaces::TransitionHost;

/// What the presenter did with a session outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Springing back to the origin.
    Reverting,
    /// Already at rest; nothing to animate.
    Reverted,
    Dismissed,
    DismissedToAlternate,
    PanelFinishing,
    PanelCancelling,
}

/// Owns the revert animation of one driver.
///
/// Every run is tagged with a generation. Starting a new run, or
/// [`interrupt`](Self::interrupt)ing for a new drag, bumps it, so a stale
/// completion never touches state that belongs to a newer session.
pub struct TransitionPresenter {
    clock: FrameClock,
    spring: SpringSpec,
    generation: Rc<Cell<u64>>,
    revert: Option<RunningRevert>,
}

struct RunningRevert {
    animation: Animatable<f32>,
    plan: RevertPlan,
}

impl TransitionPresenter {
    pub fn new(clock: FrameClock, spring: SpringSpec) -> Self {
        Self {
            clock,
            spring,
            generation: Rc::new(Cell::new(0)),
            revert: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn is_animating(&self) -> bool {
        self.revert
            .as_ref()
            .is_some_and(|run| run.animation.is_running())
    }

    /// Stop a running revert where it is. The views stay wherever the last
    /// frame left them. Returns the plan of a revert that was still running.
    pub fn interrupt(&mut self) -> Option<RevertPlan> {
        self.generation.set(self.generation.get().wrapping_add(1));
        let run = self.revert.take()?;
        let running = run.animation.is_running();
        run.animation.stop();
        if !running {
            return None;
        }
        log::debug!("revert interrupted at {:.3}", run.animation.value());
        Some(run.plan)
    }

    pub fn present(&mut self, outcome: SessionOutcome, host: &dyn TransitionHost) -> Presentation {
        match outcome {
            SessionOutcome::Revert(plan) => self.revert(plan),
            SessionOutcome::Dismiss { role, view } => {
                self.interrupt();
                view.reset_container();
                if role == RecognizerRole::Container {
                    host.dismiss_to_alternate_destination();
                    Presentation::DismissedToAlternate
                } else {
                    host.dismiss();
                    Presentation::Dismissed
                }
            }
            SessionOutcome::Panel { transition, commit } => settle_panel(transition, commit),
        }
    }

    /// Resolve `outcome` without animating or navigating. Used when the
    /// driver is torn down mid-drag.
    pub fn present_immediately(&mut self, outcome: SessionOutcome) {
        self.interrupt();
        match outcome {
            SessionOutcome::Revert(plan) => plan.finish(),
            SessionOutcome::Dismiss { view, .. } => view.reset_container(),
            SessionOutcome::Panel { transition, .. } => {
                settle_panel(transition, false);
            }
        }
    }

    fn revert(&mut self, plan: RevertPlan) -> Presentation {
        self.interrupt();
        let generation = self.generation.get();

        if plan.is_trivial() || !self.clock.runtime_handle().is_alive() {
            plan.finish();
            return Presentation::Reverted;
        }

        log::debug!("reverting from {:?}", plan.from_transform());
        let animation = Animatable::new(0.0f32, self.clock.clone());
        {
            let plan = plan.clone();
            animation.set_listener(move |fraction: &f32| plan.apply(*fraction));
        }
        let current = Rc::clone(&self.generation);
        let landing = plan.clone();
        animation.animate_to(1.0, AnimationType::Spring(self.spring), move |end| {
            if end == AnimationEnd::Finished && current.get() == generation {
                landing.finish();
                log::trace!("revert finished");
            }
        });
        self.revert = Some(RunningRevert { animation, plan });
        Presentation::Reverting
    }
}

fn settle_panel(mut transition: InteractiveTransition, commit: bool) -> Presentation {
    let (result, presentation) = if commit {
        (transition.finish(), Presentation::PanelFinishing)
    } else {
        (transition.cancel(), Presentation::PanelCancelling)
    };
    if let Err(err) = result {
        log::warn!("panel reveal could not settle: {err}");
    }
    presentation
}

impl Drop for TransitionPresenter {
    fn drop(&mut self) {
        // Land a revert in flight rather than leave the view half way back.
        if let Some(run) = self.revert.take() {
            if run.animation.is_running() {
                run.animation.stop();
                run.plan.finish();
            }
        }
    }
}

impl fmt::Debug for TransitionPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionPresenter")
            .field("generation", &self.generation.get())
            .field("animating", &self.is_animating())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
