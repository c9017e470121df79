use super::*;

use proptest::prelude::*;

#[test]
fn short_drags_follow_the_finger() {
    let damped = damp(10.0, 600.0);
    assert!(damped > 9.8 && damped < 10.0, "got {damped}");
}

#[test]
fn degenerate_inputs_damp_to_zero() {
    assert_eq!(damp(0.0, 600.0), 0.0);
    assert_eq!(damp(120.0, 0.0), 0.0);
    assert_eq!(damp(120.0, -5.0), 0.0);
    assert_eq!(damp(120.0, f32::NAN), 0.0);
    assert_eq!(damp(f32::NAN, 600.0), 0.0);
    assert_eq!(damp(f32::INFINITY, 600.0), 600.0);
    assert_eq!(damp(f32::NEG_INFINITY, 600.0), -600.0);
}

#[test]
fn huge_drags_never_reach_the_factor() {
    for (value, factor) in [
        (1e12, 600.0),
        (1e30, 600.0),
        (f32::MAX, 1.0),
        (1.0, 1e-30),
        (f32::MAX, f32::MIN_POSITIVE),
    ] {
        let damped = damp(value, factor);
        assert!(damped > 0.0 && damped < factor, "damp({value}, {factor}) = {damped}");
        assert_eq!(damp(-value, factor), -damped);
    }
}

#[test]
fn scale_shrinks_with_drag_distance() {
    let params = DampingParameters::default();
    let short = damped_drag(Vector2::new(0.0, 40.0), params);
    let long = damped_drag(Vector2::new(0.0, 400.0), params);

    assert!(short.scale < 1.0);
    assert!(long.scale < short.scale);
    assert!(long.progress > short.progress);
    assert!(long.offset.y > short.offset.y);
}

#[test]
fn progress_saturates_at_max_drag() {
    let params = DampingParameters::new(600.0, 100.0);
    let drag = damped_drag(Vector2::new(5_000.0, 5_000.0), params);

    assert!((drag.offset.length() - 100.0).abs() < 1e-3);
    assert!((drag.progress - 1.0).abs() < 1e-6);
    assert!((drag.scale - 0.5).abs() < 1e-6);
}

#[test]
fn transform_translation_compensates_for_scale() {
    let drag = damped_drag(Vector2::new(0.0, 200.0), DampingParameters::default());
    let transform = drag.transform();

    assert_eq!(transform.scale, drag.scale);
    assert!((transform.visual_offset().y - drag.offset.y).abs() < 1e-3);
    assert!(transform.translation.y > drag.offset.y);
}

#[test]
fn zero_drag_is_identity() {
    let drag = damped_drag(Vector2::ZERO, DampingParameters::default());
    assert_eq!(drag, DampedDrag::NONE);
    assert!(drag.transform().is_identity());
}

#[test]
fn unusable_parameters_leave_the_view_at_rest() {
    let drag = damped_drag(Vector2::new(30.0, 90.0), DampingParameters::new(600.0, 0.0));
    assert_eq!(drag, DampedDrag::NONE);
}

fn finite() -> impl Strategy<Value = f32> {
    prop::num::f32::POSITIVE
        | prop::num::f32::NEGATIVE
        | prop::num::f32::NORMAL
        | prop::num::f32::SUBNORMAL
        | prop::num::f32::ZERO
}

fn positive_factor() -> impl Strategy<Value = f32> {
    prop::num::f32::POSITIVE | prop::num::f32::NORMAL | prop::num::f32::SUBNORMAL
}

proptest! {
    #[test]
    fn damp_is_odd(value in finite(), factor in positive_factor()) {
        prop_assert_eq!(damp(-value, factor), -damp(value, factor));
    }

    #[test]
    fn damp_stays_strictly_inside_the_factor(value in finite(), factor in positive_factor()) {
        prop_assert!(damp(value, factor).abs() < factor);
    }

    #[test]
    fn damp_is_monotonic(
        a in -10_000.0f32..10_000.0,
        b in -10_000.0f32..10_000.0,
        factor in 0.5f32..1_000.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let tolerance = factor * f32::EPSILON * 4.0;
        prop_assert!(damp(low, factor) <= damp(high, factor) + tolerance);
    }

    #[test]
    fn damped_drag_stays_in_range(dx in -5_000.0f32..5_000.0, dy in -5_000.0f32..5_000.0) {
        let params = DampingParameters::default();
        let drag = damped_drag(Vector2::new(dx, dy), params);
        prop_assert!((0.0..=1.0).contains(&drag.progress));
        prop_assert!(drag.scale >= 0.5 && drag.scale <= 1.0);
        prop_assert!(drag.offset.length() <= params.max_drag * (1.0 + 1e-5));
    }
}
