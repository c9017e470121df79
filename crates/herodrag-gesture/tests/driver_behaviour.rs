use std::rc::Rc;

use herodrag_geometry::{Point, Rect, Size, Transform, Vector2};
use herodrag_gesture::{
    DragSample, DriverEvent, GestureConfig, GestureIntent, Presentation, RecognizerRole,
    SurfaceHandles, TransitionDriver, TransitionHost,
};
use herodrag_testing::prelude::*;

#[test]
fn cancel_always_reverts() {
    let mut scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    let events = scene.play(
        &mut driver,
        DragScript::began(0.0, 600.0).glide(0.0, 400.0, 8).cancelled(),
    );

    assert_eq!(
        events.last(),
        Some(&DriverEvent::Finished(Presentation::Reverting))
    );
    scene.rule.pump_until_idle();
    assert_at_rest(scene.surface.current(), "cancelled drag");
    assert!(scene.host.calls().is_empty());
}

#[test]
fn cancelled_reveal_settles_back() {
    let mut scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    let events = scene.play(
        &mut driver,
        DragScript::began(-600.0, 0.0).glide(-300.0, 0.0, 3).cancelled(),
    );

    assert_eq!(
        events.last(),
        Some(&DriverEvent::Finished(Presentation::PanelCancelling))
    );
    scene.rule.pump_until_idle();
    assert_eq!(
        scene.host.panel_outcomes(),
        vec![herodrag_animation::TransitionOutcome::Cancelled]
    );
}

#[test]
fn first_decisive_movement_locks_the_intent() {
    let scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    scene.play(
        &mut driver,
        DragScript::began(0.0, 600.0)
            .to(0.0, 30.0)
            .to(-300.0, 40.0)
            .to(-350.0, 0.0)
            .open(),
    );

    assert_eq!(driver.intent(), GestureIntent::VerticalDismiss);
    assert_eq!(scene.host.count(HostCall::RevealSidePanel), 0);
}

#[test]
fn zero_translation_stays_undecided() {
    let scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    let events = scene.play(&mut driver, DragScript::began(0.0, 600.0).to(0.0, 0.0).open());

    assert_eq!(events, vec![DriverEvent::Began, DriverEvent::Moved]);
    assert_eq!(driver.intent(), GestureIntent::Undecided);
    assert!(scene.surface.history().is_empty());
}

#[test]
fn undecided_release_is_a_trivial_revert() {
    let scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    let events = scene.play(&mut driver, DragScript::began(0.0, 600.0).ended());

    assert_eq!(
        events.last(),
        Some(&DriverEvent::Finished(Presentation::Reverted))
    );
    assert!(!scene.rule.has_pending_frames());
    assert!(!scene.container.is_masked());
}

#[test]
fn changed_without_began_starts_mid_drag() {
    let scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    let events = scene.play(
        &mut driver,
        DragScript::headless()
            .velocity(0.0, 500.0)
            .to(0.0, 50.0)
            .to(0.0, 250.0)
            .ended(),
    );

    assert_eq!(events[0], DriverEvent::Moved);
    assert_eq!(
        events.last(),
        Some(&DriverEvent::Finished(Presentation::Dismissed))
    );
}

#[test]
fn mid_drag_start_measures_from_the_first_sample() {
    let scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    scene.play(
        &mut driver,
        DragScript::headless()
            .velocity(0.0, 500.0)
            .to(0.0, 100.0)
            .to(0.0, 200.0)
            .open(),
    );
    let events = scene.play(
        &mut driver,
        [DragSample::ended(Vector2::new(0.0, 200.0), Vector2::ZERO)],
    );

    // Only 100pt were seen by this session.
    assert_eq!(events, vec![DriverEvent::Finished(Presentation::Reverting)]);
}

#[test]
fn end_without_a_session_is_ignored() {
    let scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    let ended = driver.handle(DragSample::ended(Vector2::new(0.0, 300.0), Vector2::ZERO));
    let cancelled = driver.handle(DragSample::cancelled(Vector2::ZERO, Vector2::ZERO));

    assert_eq!(ended, DriverEvent::Ignored);
    assert_eq!(cancelled, DriverEvent::Ignored);
    assert!(scene.host.calls().is_empty());
    assert_eq!(driver.last_presentation(), None);
}

#[test]
fn declined_reveal_reverts_and_frees_the_panel() {
    let scene = TransitionScene::new();
    scene.host.set_declines_reveal(true);
    let mut driver = scene.driver(RecognizerRole::Content);

    let events = scene.play(
        &mut driver,
        DragScript::began(-600.0, 0.0).glide(-250.0, 0.0, 3).ended(),
    );

    assert_eq!(scene.host.count(HostCall::RevealSidePanel), 1);
    assert_eq!(
        events.last(),
        Some(&DriverEvent::Finished(Presentation::Reverted))
    );
    assert_eq!(scene.arbiter.with(|arbiter| arbiter.panel_owner()), None);
    assert!(!scene.container.is_masked());
}

#[test]
fn only_one_recognizer_owns_the_panel() {
    let mut scene = TransitionScene::new();
    let mut first = scene.driver(RecognizerRole::Content);
    let mut second = scene.driver(RecognizerRole::Content);

    scene.play(&mut first, DragScript::began(-600.0, 0.0).to(-200.0, 0.0).open());
    scene.play(&mut second, DragScript::began(-600.0, 0.0).to(-200.0, 0.0).open());

    assert_eq!(scene.host.count(HostCall::RevealSidePanel), 1);
    assert!(first.session().unwrap().has_committed_panel());
    assert!(!second.session().unwrap().has_committed_panel());
    assert_eq!(
        scene.arbiter.with(|arbiter| arbiter.panel_owner()),
        Some(first.recognizer())
    );

    let second_end = second.handle(DragSample::ended(Vector2::new(-200.0, 0.0), Vector2::ZERO));
    assert_eq!(second_end, DriverEvent::Finished(Presentation::Reverted));

    let first_end = first.handle(DragSample::ended(Vector2::new(-200.0, 0.0), Vector2::ZERO));
    assert_eq!(first_end, DriverEvent::Finished(Presentation::PanelFinishing));
    scene.rule.pump_until_idle();
    assert_eq!(scene.arbiter.with(|arbiter| arbiter.panel_owner()), None);
}

#[test]
fn panel_role_dismisses_on_a_rightward_drag() {
    let scene = TransitionScene::new();
    let mut panel = scene.driver(RecognizerRole::Panel);

    let events = scene.play(
        &mut panel,
        DragScript::began(600.0, 0.0).glide(240.0, 0.0, 4).ended(),
    );

    assert_eq!(
        events.last(),
        Some(&DriverEvent::Finished(Presentation::Dismissed))
    );
    assert_eq!(scene.host.count(HostCall::RevealSidePanel), 0);
}

#[test]
fn reveal_needs_a_view_at_rest() {
    let scene = TransitionScene::new();
    scene
        .surface
        .place(Transform::new(Vector2::new(0.0, 40.0), 0.9));
    let mut driver = scene.driver(RecognizerRole::Content);

    scene.play(&mut driver, DragScript::began(-600.0, 0.0).to(-200.0, 0.0).open());

    assert_eq!(driver.intent(), GestureIntent::VerticalDismiss);
    assert_eq!(scene.host.count(HostCall::RevealSidePanel), 0);
    assert!(!scene.container.is_masked());
}

#[test]
fn missing_surface_turns_the_drag_into_a_no_op() {
    let rule = GestureTestRule::new();
    let arbiter = herodrag_gesture::RecognizerArbiter::shared();
    let host = Rc::new(RecordingHost::new(
        rule.frame_clock(),
        GestureConfig::default().panel_settle,
    ));
    let surface = RecordingSurface::shared(390.0);
    let handles = SurfaceHandles::new(&surface);
    let dyn_host: Rc<dyn TransitionHost> = host.clone();
    let mut driver = TransitionDriver::new(
        RecognizerRole::Content,
        &arbiter,
        handles,
        dyn_host,
        rule.frame_clock(),
        GestureConfig::default(),
    );
    drop(surface);

    let events: Vec<_> = DragScript::began(0.0, 600.0)
        .to(0.0, 300.0)
        .ended()
        .into_iter()
        .map(|sample| driver.handle(sample))
        .collect();

    assert_eq!(
        events,
        vec![DriverEvent::Detached, DriverEvent::Ignored, DriverEvent::Ignored]
    );
    assert!(host.calls().is_empty());
    assert!(arbiter.with(|arbiter| arbiter.active_roles().is_empty()));
}

#[test]
fn optional_collaborators_may_be_missing() {
    let mut rule = GestureTestRule::new();
    let arbiter = herodrag_gesture::RecognizerArbiter::shared();
    let host: Rc<dyn TransitionHost> = Rc::new(RecordingHost::new(
        rule.frame_clock(),
        GestureConfig::default().panel_settle,
    ));
    let surface = RecordingSurface::shared(390.0);
    let mut driver = TransitionDriver::new(
        RecognizerRole::Content,
        &arbiter,
        SurfaceHandles::new(&surface),
        host,
        rule.frame_clock(),
        GestureConfig::default(),
    );

    for sample in DragScript::began(0.0, 600.0).to(0.0, 120.0).ended() {
        driver.handle(sample);
    }
    rule.pump_until_idle();
    assert_at_rest(surface.current(), "surface without overlay or container");
}

#[test]
fn origin_is_captured_at_began() {
    let scene = TransitionScene::new();
    scene.surface.set_position(Point::new(24.0, 300.0));
    let frame = Rect::from_origin_size(Point::new(100.0, 120.0), Size::new(44.0, 44.0));

    let host: Rc<dyn TransitionHost> = scene.host.clone();
    let mut driver = TransitionDriver::new(
        RecognizerRole::Content,
        &scene.arbiter,
        scene.handles().with_origin_frame(frame),
        host,
        scene.rule.frame_clock(),
        GestureConfig::default(),
    );
    scene.play(&mut driver, DragScript::began(0.0, 600.0).open());

    let session = driver.session().unwrap();
    assert_eq!(session.origin_position(), Point::new(24.0, 300.0));
    assert_eq!(session.origin_frame(), Some(frame));
}

#[test]
fn dropping_the_driver_mid_drag_restores_the_view() {
    let scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);
    let recognizer = driver.recognizer();

    scene.play(&mut driver, DragScript::began(0.0, 600.0).to(0.0, 120.0).open());
    assert!(!scene.surface.current().is_identity());

    drop(driver);

    assert_at_rest(scene.surface.current(), "after teardown");
    assert_approx_eq(scene.overlay.current(), 1.0, 1e-4, "overlay alpha");
    assert!(!scene.container.is_masked());
    assert!(scene.host.calls().is_empty());
    scene.arbiter.with(|arbiter| {
        assert_eq!(arbiter.role(recognizer), None);
        assert!(arbiter.active_roles().is_empty());
    });
}

#[test]
fn dropping_the_driver_mid_reveal_cancels_the_panel() {
    let mut scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    scene.play(&mut driver, DragScript::began(-600.0, 0.0).to(-200.0, 0.0).open());
    drop(driver);
    scene.rule.pump_until_idle();

    assert_eq!(
        scene.host.panel_outcomes(),
        vec![herodrag_animation::TransitionOutcome::Cancelled]
    );
    assert_eq!(scene.arbiter.with(|arbiter| arbiter.panel_owner()), None);
}

#[test]
fn dropping_the_driver_mid_revert_lands_the_view() {
    let mut scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    scene.play(&mut driver, DragScript::began(0.0, 600.0).to(0.0, 120.0).ended());
    scene.rule.advance_frame();
    scene.rule.advance_frame();
    drop(driver);

    assert_at_rest(scene.surface.current(), "after teardown");
    assert!(!scene.rule.has_pending_frames());
}

#[test]
fn new_drag_interrupts_a_running_revert() {
    let mut scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    scene.play(&mut driver, DragScript::began(0.0, 600.0).to(0.0, 140.0).ended());
    for _ in 0..3 {
        scene.rule.advance_frame();
    }
    let caught = scene.surface.current();
    assert!(!caught.is_identity());

    let event = driver.handle(DragSample::began(Vector2::ZERO, Vector2::new(0.0, 600.0)));
    assert_eq!(event, DriverEvent::Began);
    assert!(!driver.is_animating());

    scene.rule.advance_time(500);
    assert_eq!(scene.surface.current(), caught);

    // The caught drag reverts to the original resting alphas.
    scene.play(&mut driver, DragScript::headless().to(0.0, 60.0).ended());
    scene.rule.pump_until_idle();
    assert_at_rest(scene.surface.current(), "after second revert");
    assert_approx_eq(scene.overlay.current(), 1.0, 1e-4, "overlay alpha");
}

#[test]
fn pointer_stream_drives_a_dismiss() {
    let scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    let events: Vec<_> = pointer_drag(Point::new(200.0, 100.0), Point::new(200.0, 400.0), 10, 300)
        .iter()
        .map(|event| driver.on_pointer_event(event))
        .collect();

    assert_eq!(events[0], DriverEvent::Ignored);
    assert_eq!(events[1], DriverEvent::Began);
    assert_eq!(
        events.last(),
        Some(&DriverEvent::Finished(Presentation::Dismissed))
    );
    assert_eq!(scene.host.calls(), vec![HostCall::Dismiss]);
}

#[test]
fn pointer_tap_does_nothing() {
    let scene = TransitionScene::new();
    let mut driver = scene.driver(RecognizerRole::Content);

    let events: Vec<_> = pointer_drag(Point::new(200.0, 100.0), Point::new(202.0, 103.0), 2, 80)
        .iter()
        .map(|event| driver.on_pointer_event(event))
        .collect();

    assert!(events.iter().all(|event| *event == DriverEvent::Ignored));
    assert!(scene.surface.history().is_empty());
}

#[test]
fn fling_commits_a_short_drag_when_enabled() {
    let scene = TransitionScene::new();
    let config = GestureConfig::default().with_dismiss_fling_velocity(1000.0);
    let mut driver = scene.driver_with_config(RecognizerRole::Content, config);

    let events = scene.play(
        &mut driver,
        DragScript::began(0.0, 600.0)
            .to(0.0, 60.0)
            .velocity(0.0, 2400.0)
            .ended(),
    );

    assert_eq!(
        events.last(),
        Some(&DriverEvent::Finished(Presentation::Dismissed))
    );
}
