//! Recording collaborators.
//!
//! Each fake keeps its current state in cells and appends every change to a
//! history, so tests can assert both where a view ended up and how it got
//! there.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use herodrag_animation::{AnimationSpec, InteractiveTransition, TransitionOutcome};
use herodrag_core::FrameClock;
use herodrag_geometry::{Point, Transform};
use herodrag_gesture::{
    DragSample, DraggableSurface, FadeableOverlay, RescalableContainer, TransitionHost,
};

pub struct RecordingSurface {
    transform: Cell<Transform>,
    position: Cell<Point>,
    width: Cell<f32>,
    history: RefCell<Vec<Transform>>,
}

impl RecordingSurface {
    pub fn new(width: f32) -> Self {
        Self {
            transform: Cell::new(Transform::IDENTITY),
            position: Cell::new(Point::ZERO),
            width: Cell::new(width),
            history: RefCell::new(Vec::new()),
        }
    }

    pub fn shared(width: f32) -> Rc<Self> {
        Rc::new(Self::new(width))
    }

    pub fn current(&self) -> Transform {
        self.transform.get()
    }

    pub fn history(&self) -> Vec<Transform> {
        self.history.borrow().clone()
    }

    pub fn clear_history(&self) {
        self.history.borrow_mut().clear();
    }

    pub fn set_position(&self, position: Point) {
        self.position.set(position);
    }

    pub fn set_width(&self, width: f32) {
        self.width.set(width);
    }

    /// Move the view without going through the gesture layer.
    pub fn place(&self, transform: Transform) {
        self.transform.set(transform);
    }
}

impl DraggableSurface for RecordingSurface {
    fn transform(&self) -> Transform {
        self.transform.get()
    }

    fn set_transform(&self, transform: Transform) {
        self.transform.set(transform);
        self.history.borrow_mut().push(transform);
    }

    fn position(&self) -> Point {
        self.position.get()
    }

    fn width(&self) -> f32 {
        self.width.get()
    }
}

pub struct RecordingOverlay {
    alpha: Cell<f32>,
    history: RefCell<Vec<f32>>,
}

impl RecordingOverlay {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: Cell::new(alpha),
            history: RefCell::new(Vec::new()),
        }
    }

    pub fn shared(alpha: f32) -> Rc<Self> {
        Rc::new(Self::new(alpha))
    }

    pub fn current(&self) -> f32 {
        self.alpha.get()
    }

    pub fn history(&self) -> Vec<f32> {
        self.history.borrow().clone()
    }
}

impl FadeableOverlay for RecordingOverlay {
    fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
        self.history.borrow_mut().push(alpha);
    }
}

pub struct RecordingContainer {
    scale: Cell<f32>,
    alpha: Cell<f32>,
    masked: Cell<bool>,
    scale_history: RefCell<Vec<f32>>,
    alpha_history: RefCell<Vec<f32>>,
    mask_history: RefCell<Vec<bool>>,
}

impl RecordingContainer {
    pub fn new() -> Self {
        Self {
            scale: Cell::new(1.0),
            alpha: Cell::new(1.0),
            masked: Cell::new(false),
            scale_history: RefCell::new(Vec::new()),
            alpha_history: RefCell::new(Vec::new()),
            mask_history: RefCell::new(Vec::new()),
        }
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    pub fn current_scale(&self) -> f32 {
        self.scale.get()
    }

    pub fn current_alpha(&self) -> f32 {
        self.alpha.get()
    }

    pub fn is_masked(&self) -> bool {
        self.masked.get()
    }

    pub fn scale_history(&self) -> Vec<f32> {
        self.scale_history.borrow().clone()
    }

    pub fn alpha_history(&self) -> Vec<f32> {
        self.alpha_history.borrow().clone()
    }

    pub fn mask_history(&self) -> Vec<bool> {
        self.mask_history.borrow().clone()
    }
}

impl Default for RecordingContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl RescalableContainer for RecordingContainer {
    fn scale(&self) -> f32 {
        self.scale.get()
    }

    fn set_scale(&self, scale: f32) {
        self.scale.set(scale);
        self.scale_history.borrow_mut().push(scale);
    }

    fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
        self.alpha_history.borrow_mut().push(alpha);
    }

    fn set_masked(&self, masked: bool) {
        self.masked.set(masked);
        self.mask_history.borrow_mut().push(masked);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Dismiss,
    RevealSidePanel,
    DismissToAlternateDestination,
}

/// Host that records navigation and hands out real interactive transitions
/// on the test clock.
pub struct RecordingHost {
    clock: FrameClock,
    settle: AnimationSpec,
    declines_reveal: Cell<bool>,
    calls: RefCell<Vec<HostCall>>,
    reveal_samples: RefCell<Vec<DragSample>>,
    panel_progress: Rc<RefCell<Vec<f32>>>,
    panel_outcomes: Rc<RefCell<Vec<TransitionOutcome>>>,
}

impl RecordingHost {
    pub fn new(clock: FrameClock, settle: AnimationSpec) -> Self {
        Self {
            clock,
            settle,
            declines_reveal: Cell::new(false),
            calls: RefCell::new(Vec::new()),
            reveal_samples: RefCell::new(Vec::new()),
            panel_progress: Rc::new(RefCell::new(Vec::new())),
            panel_outcomes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn set_declines_reveal(&self, declines: bool) {
        self.declines_reveal.set(declines);
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: HostCall) -> usize {
        self.calls.borrow().iter().filter(|made| **made == call).count()
    }

    pub fn reveal_samples(&self) -> Vec<DragSample> {
        self.reveal_samples.borrow().clone()
    }

    /// Every progress value of every panel transition handed out.
    pub fn panel_progress(&self) -> Vec<f32> {
        self.panel_progress.borrow().clone()
    }

    pub fn panel_outcomes(&self) -> Vec<TransitionOutcome> {
        self.panel_outcomes.borrow().clone()
    }
}

impl TransitionHost for RecordingHost {
    fn dismiss(&self) {
        self.calls.borrow_mut().push(HostCall::Dismiss);
    }

    fn reveal_side_panel(&self, from: &DragSample) -> Option<InteractiveTransition> {
        self.calls.borrow_mut().push(HostCall::RevealSidePanel);
        self.reveal_samples.borrow_mut().push(*from);
        if self.declines_reveal.get() {
            return None;
        }

        let transition = InteractiveTransition::new(self.clock.clone(), self.settle);
        let progress = Rc::clone(&self.panel_progress);
        transition.on_progress(move |value| progress.borrow_mut().push(value));
        let outcomes = Rc::clone(&self.panel_outcomes);
        transition.on_complete(move |outcome| outcomes.borrow_mut().push(outcome));
        Some(transition)
    }

    fn dismiss_to_alternate_destination(&self) {
        self.calls
            .borrow_mut()
            .push(HostCall::DismissToAlternateDestination);
    }
}
