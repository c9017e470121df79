use super::*;

use std::cell::Cell;

use herodrag_core::Runtime;
use herodrag_geometry::{Point, Transform, Vector2};

use crate::sample::DragSample;
use crate::session::GestureSession;
use crate::surfaces::{DraggableSurface, SurfaceHandles};

const FRAME_NANOS: u64 = 16_666_667;

struct Card(Cell<Transform>);

impl DraggableSurface for Card {
    fn transform(&self) -> Transform {
        self.0.get()
    }

    fn set_transform(&self, transform: Transform) {
        self.0.set(transform);
    }

    fn position(&self) -> Point {
        Point::ZERO
    }

    fn width(&self) -> f32 {
        390.0
    }
}

struct Host;

impl TransitionHost for Host {
    fn dismiss(&self) {}

    fn reveal_side_panel(&self, _from: &DragSample) -> Option<InteractiveTransition> {
        None
    }

    fn dismiss_to_alternate_destination(&self) {}
}

/// A revert outcome for `card` released from `transform`.
fn released_from(card: &Rc<Card>, transform: Transform) -> SessionOutcome {
    let view = SurfaceHandles::new(card).upgrade().expect("card is alive");
    let session = GestureSession::begin(RecognizerRole::Content, view);
    card.0.set(transform);
    let arbiter = crate::arbitration::RecognizerArbiter::shared();
    let recognizer = arbiter.update(|arbiter| arbiter.attach(RecognizerRole::Content));
    let config = crate::config::GestureConfig::default();
    let env = crate::session::SessionEnv {
        recognizer,
        config: &config,
        host: &Host,
        arbiter: &arbiter,
    };
    session.end(&DragSample::cancelled(Vector2::ZERO, Vector2::ZERO), &env)
}

fn dragged() -> Transform {
    Transform::new(Vector2::new(0.0, 120.0), 0.85)
}

fn pump(runtime: &Runtime) {
    let mut frame_time = 0;
    let mut frames = 0;
    while runtime.has_frame_callbacks() && frames < 1_000 {
        frame_time += FRAME_NANOS;
        runtime.drain_frame_callbacks(frame_time);
        frames += 1;
    }
}

#[test]
fn view_at_rest_needs_no_animation() {
    let runtime = Runtime::default();
    let mut presenter = TransitionPresenter::new(runtime.frame_clock(), SpringSpec::default());
    let card = Rc::new(Card(Cell::new(Transform::IDENTITY)));

    let outcome = released_from(&card, Transform::IDENTITY);
    assert_eq!(presenter.present(outcome, &Host), Presentation::Reverted);
    assert!(!presenter.is_animating());
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn revert_springs_back_to_identity() {
    let runtime = Runtime::default();
    let mut presenter = TransitionPresenter::new(runtime.frame_clock(), SpringSpec::default());
    let card = Rc::new(Card(Cell::new(Transform::IDENTITY)));

    let outcome = released_from(&card, dragged());
    assert_eq!(presenter.present(outcome, &Host), Presentation::Reverting);
    assert!(presenter.is_animating());

    pump(&runtime);
    assert!(!presenter.is_animating());
    assert!(card.0.get().is_identity());
}

#[test]
fn interrupt_leaves_the_view_where_it_is() {
    let runtime = Runtime::default();
    let mut presenter = TransitionPresenter::new(runtime.frame_clock(), SpringSpec::default());
    let card = Rc::new(Card(Cell::new(Transform::IDENTITY)));

    presenter.present(released_from(&card, dragged()), &Host);
    let generation = presenter.generation();
    for frame in 1..=3 {
        runtime.drain_frame_callbacks(frame * FRAME_NANOS);
    }
    let caught = card.0.get();

    assert!(presenter.interrupt().is_some());
    assert!(presenter.generation() > generation);
    assert!(presenter.interrupt().is_none());

    pump(&runtime);
    assert_eq!(card.0.get(), caught);
}

#[test]
fn dead_runtime_lands_the_revert_at_once() {
    let runtime = Runtime::default();
    let clock = runtime.frame_clock();
    drop(runtime);
    let mut presenter = TransitionPresenter::new(clock, SpringSpec::default());
    let card = Rc::new(Card(Cell::new(Transform::IDENTITY)));

    let outcome = released_from(&card, dragged());
    assert_eq!(presenter.present(outcome, &Host), Presentation::Reverted);
    assert!(card.0.get().is_identity());
}

#[test]
fn dropping_the_presenter_lands_a_running_revert() {
    let runtime = Runtime::default();
    let mut presenter = TransitionPresenter::new(runtime.frame_clock(), SpringSpec::default());
    let card = Rc::new(Card(Cell::new(Transform::IDENTITY)));

    presenter.present(released_from(&card, dragged()), &Host);
    runtime.drain_frame_callbacks(FRAME_NANOS);
    drop(presenter);

    assert!(card.0.get().is_identity());
    assert!(!runtime.has_frame_callbacks());
}
