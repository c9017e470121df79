use super::*;

use herodrag_core::Runtime;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;

/// Drains frames until nothing is scheduled or `max_frames` elapse.
fn pump(runtime: &Runtime, frame_time: &mut u64, max_frames: usize) -> usize {
    let mut frames = 0;
    while runtime.has_frame_callbacks() && frames < max_frames {
        *frame_time += FRAME_NANOS;
        runtime.drain_frame_callbacks(*frame_time);
        frames += 1;
    }
    frames
}

fn recorder() -> (Rc<RefCell<Vec<f32>>>, impl Fn(&f32) + 'static) {
    let samples = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&samples);
    (samples, move |value: &f32| sink.borrow_mut().push(*value))
}

fn end_slot() -> (Rc<Cell<Option<AnimationEnd>>>, impl FnOnce(AnimationEnd) + 'static) {
    let slot = Rc::new(Cell::new(None));
    let sink = Rc::clone(&slot);
    (slot, move |end| sink.set(Some(end)))
}

#[test]
fn tween_interpolates_over_time_and_finishes() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(0.0f32, runtime.frame_clock());
    let (samples, listener) = recorder();
    animatable.set_listener(listener);
    let (end, on_end) = end_slot();

    animatable.animate_to(1.0, AnimationType::Tween(AnimationSpec::linear(200)), on_end);
    assert!(animatable.is_running());

    let mut frame_time = 0;
    let frames = pump(&runtime, &mut frame_time, 64);

    assert!(frames > 5, "a 200ms tween should span several frames, got {frames}");
    assert_eq!(end.get(), Some(AnimationEnd::Finished));
    assert_eq!(animatable.value(), 1.0);
    assert!(!animatable.is_running());
    let samples = samples.borrow();
    assert!(samples.iter().any(|value| *value > 0.0 && *value < 1.0));
    assert!(samples.windows(2).all(|pair| pair[1] >= pair[0]));
    assert_eq!(samples.last().copied(), Some(1.0));
}

#[test]
fn tween_waits_for_its_delay() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(0.0f32, runtime.frame_clock());
    let (end, on_end) = end_slot();
    animatable.animate_to(
        10.0,
        AnimationType::Tween(AnimationSpec::linear(50).with_delay(100)),
        on_end,
    );

    let mut frame_time = 0;
    pump(&runtime, &mut frame_time, 4);
    assert_eq!(animatable.value(), 0.0);
    assert_eq!(end.get(), None);

    pump(&runtime, &mut frame_time, 64);
    assert_eq!(animatable.value(), 10.0);
    assert_eq!(end.get(), Some(AnimationEnd::Finished));
}

#[test]
fn spring_settles_on_target() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(100.0f32, runtime.frame_clock());
    let (end, on_end) = end_slot();
    animatable.animate_to(
        0.0,
        AnimationType::Spring(SpringSpec::with_duration(300, 0.96).with_initial_velocity(0.5)),
        on_end,
    );

    let mut frame_time = 0;
    let frames = pump(&runtime, &mut frame_time, 600);

    assert!(frames < 600, "spring never settled");
    assert_eq!(end.get(), Some(AnimationEnd::Finished));
    assert_eq!(animatable.value(), 0.0);
}

#[test]
fn bouncy_spring_overshoots() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(0.0f32, runtime.frame_clock());
    let (samples, listener) = recorder();
    animatable.set_listener(listener);
    animatable.animate_to(1.0, AnimationType::Spring(SpringSpec::bouncy()), |_| {});

    let mut frame_time = 0;
    pump(&runtime, &mut frame_time, 600);

    assert!(samples.borrow().iter().any(|value| *value > 1.0));
    assert_eq!(animatable.value(), 1.0);
}

#[test]
fn new_target_interrupts_running_animation() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(0.0f32, runtime.frame_clock());
    let (first, on_first) = end_slot();
    let (second, on_second) = end_slot();

    animatable.animate_to(1.0, AnimationType::Tween(AnimationSpec::linear(100)), on_first);
    let mut frame_time = 0;
    frame_time += FRAME_NANOS;
    runtime.drain_frame_callbacks(frame_time);

    animatable.animate_to(-1.0, AnimationType::Tween(AnimationSpec::linear(100)), on_second);
    assert_eq!(first.get(), Some(AnimationEnd::Interrupted));

    pump(&runtime, &mut frame_time, 64);
    assert_eq!(second.get(), Some(AnimationEnd::Finished));
    assert_eq!(animatable.value(), -1.0);
}

#[test]
fn snap_and_stop_interrupt() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(0.0f32, runtime.frame_clock());
    let (samples, listener) = recorder();
    animatable.set_listener(listener);

    let (snapped, on_snapped) = end_slot();
    animatable.animate_to(5.0, AnimationType::default(), on_snapped);
    animatable.snap_to(3.0);
    assert_eq!(snapped.get(), Some(AnimationEnd::Interrupted));
    assert_eq!(animatable.value(), 3.0);
    assert_eq!(samples.borrow().last().copied(), Some(3.0));

    let (stopped, on_stopped) = end_slot();
    animatable.animate_to(9.0, AnimationType::default(), on_stopped);
    animatable.stop();
    assert_eq!(stopped.get(), Some(AnimationEnd::Interrupted));
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn dropping_the_handle_cancels_without_callback() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(0.0f32, runtime.frame_clock());
    let (end, on_end) = end_slot();
    animatable.animate_to(1.0, AnimationType::default(), on_end);
    drop(animatable);

    let mut frame_time = 0;
    pump(&runtime, &mut frame_time, 64);
    assert_eq!(end.get(), None);
}

#[test]
fn transform_lerp_tracks_visual_offset() {
    let from = Transform::new(Vector2::new(0.0, 200.0), 0.5);
    let halfway = from.lerp(&Transform::IDENTITY, 0.5);
    assert!((halfway.scale - 0.75).abs() < 1e-6);
    assert!((halfway.visual_offset().y - 50.0).abs() < 1e-3);
}

#[test]
fn duration_spring_stiffness_follows_period() {
    let spec = SpringSpec::with_duration(300, 0.96);
    let expected = (std::f32::consts::TAU / 0.3).powi(2);
    assert!((spec.stiffness - expected).abs() < 1e-2);
    assert_eq!(spec.damping_ratio, 0.96);
    assert_eq!(spec.initial_velocity, 0.0);
}
