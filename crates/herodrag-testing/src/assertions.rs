//! Assertion helpers for transforms and animated values.

use herodrag_geometry::Transform;

/// Assert that `actual` is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{msg}: expected {expected} (±{tolerance}), got {actual} (diff: {diff})"
    );
}

pub fn assert_transform_approx_eq(
    actual: Transform,
    expected: Transform,
    tolerance: f32,
    msg: &str,
) {
    assert_approx_eq(actual.scale, expected.scale, tolerance, &format!("{msg} - scale"));
    assert_approx_eq(
        actual.translation.x,
        expected.translation.x,
        tolerance,
        &format!("{msg} - translation.x"),
    );
    assert_approx_eq(
        actual.translation.y,
        expected.translation.y,
        tolerance,
        &format!("{msg} - translation.y"),
    );
}

pub fn assert_at_rest(actual: Transform, msg: &str) {
    assert_transform_approx_eq(actual, Transform::IDENTITY, 1e-4, msg);
}

/// Assert that `values` never decrease, allowing `tolerance` of jitter.
pub fn assert_non_decreasing(values: &[f32], tolerance: f32, msg: &str) {
    for (index, pair) in values.windows(2).enumerate() {
        assert!(
            pair[1] + tolerance >= pair[0],
            "{msg}: dropped from {} to {} at {}",
            pair[0],
            pair[1],
            index + 1
        );
    }
}

/// Assert that every value lies in `[low, high]`.
pub fn assert_all_within(values: &[f32], low: f32, high: f32, msg: &str) {
    if let Some(outlier) = values.iter().find(|value| !(low..=high).contains(*value)) {
        panic!("{msg}: {outlier} outside [{low}, {high}] in {values:?}");
    }
}
