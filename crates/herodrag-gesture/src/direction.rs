//! One-shot direction lock for drags that can either dismiss or reveal.

use herodrag_geometry::Vector2;

use crate::constants::DELIBERATE_DEAD_ZONE;

/// What a drag session has committed to doing.
///
/// Leaves `Undecided` at most once per session and never changes after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureIntent {
    #[default]
    Undecided,
    /// Free drag of the view, dismissing it when released past the threshold.
    VerticalDismiss,
    /// Leftward scrub of an interactive side-panel reveal.
    HorizontalReveal,
}

impl GestureIntent {
    pub fn is_locked(self) -> bool {
        self != GestureIntent::Undecided
    }
}

/// How eagerly a drag locks its intent.
///
/// The default locks on the first non-zero sample. [`deliberate`] waits for
/// the finger to leave a dead zone and for one axis to strictly dominate.
///
/// [`deliberate`]: DirectionLockPolicy::deliberate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionLockPolicy {
    /// Translations with a length at or below this stay undecided.
    pub dead_zone: f32,
    /// Exact diagonals stay undecided when set.
    pub require_dominance: bool,
}

impl DirectionLockPolicy {
    pub const fn immediate() -> Self {
        Self {
            dead_zone: 0.0,
            require_dominance: false,
        }
    }

    pub const fn deliberate() -> Self {
        Self {
            dead_zone: DELIBERATE_DEAD_ZONE,
            require_dominance: true,
        }
    }

    pub fn with_dead_zone(mut self, dead_zone: f32) -> Self {
        self.dead_zone = dead_zone.max(0.0);
        self
    }

    /// Classify the translation since the session began.
    ///
    /// A locked `current` is returned unchanged. `at_identity` says whether
    /// the dragged view is still untransformed; a reveal is only possible
    /// from there.
    pub fn classify(
        &self,
        current: GestureIntent,
        translation: Vector2,
        at_identity: bool,
    ) -> GestureIntent {
        if current.is_locked() {
            return current;
        }
        if !translation.is_finite() || translation.is_zero() {
            return GestureIntent::Undecided;
        }
        if translation.length() <= self.dead_zone {
            return GestureIntent::Undecided;
        }

        let horizontal = translation.is_horizontal();
        if self.require_dominance && !horizontal && !translation.is_vertical() {
            return GestureIntent::Undecided;
        }

        if horizontal && translation.x < 0.0 && at_identity {
            GestureIntent::HorizontalReveal
        } else {
            GestureIntent::VerticalDismiss
        }
    }
}

impl Default for DirectionLockPolicy {
    fn default() -> Self {
        Self::immediate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(translation: Vector2, at_identity: bool) -> GestureIntent {
        DirectionLockPolicy::immediate().classify(
            GestureIntent::Undecided,
            translation,
            at_identity,
        )
    }

    #[test]
    fn leftward_at_identity_reveals() {
        assert_eq!(classify(Vector2::new(-40.0, 5.0), true), GestureIntent::HorizontalReveal);
    }

    #[test]
    fn leftward_after_prior_offset_drags_freely() {
        assert_eq!(classify(Vector2::new(-40.0, 5.0), false), GestureIntent::VerticalDismiss);
    }

    #[test]
    fn rightward_and_vertical_dismiss() {
        assert_eq!(classify(Vector2::new(40.0, 5.0), true), GestureIntent::VerticalDismiss);
        assert_eq!(classify(Vector2::new(3.0, 60.0), true), GestureIntent::VerticalDismiss);
        assert_eq!(classify(Vector2::new(0.0, -60.0), true), GestureIntent::VerticalDismiss);
    }

    #[test]
    fn exact_diagonal_is_not_horizontal() {
        assert_eq!(classify(Vector2::new(-30.0, 30.0), true), GestureIntent::VerticalDismiss);
    }

    #[test]
    fn zero_and_non_finite_stay_undecided() {
        assert_eq!(classify(Vector2::ZERO, true), GestureIntent::Undecided);
        assert_eq!(classify(Vector2::new(f32::NAN, 4.0), true), GestureIntent::Undecided);
        assert_eq!(classify(Vector2::new(f32::INFINITY, 0.0), true), GestureIntent::Undecided);
    }

    #[test]
    fn locked_intent_is_never_reclassified() {
        let policy = DirectionLockPolicy::immediate();
        let locked = policy.classify(GestureIntent::Undecided, Vector2::new(0.0, 30.0), true);
        assert_eq!(locked, GestureIntent::VerticalDismiss);

        for translation in [Vector2::new(-500.0, 0.0), Vector2::ZERO, Vector2::new(0.0, -10.0)] {
            assert_eq!(policy.classify(locked, translation, true), locked);
        }
    }

    #[test]
    fn deliberate_policy_waits_for_the_dead_zone() {
        let policy = DirectionLockPolicy::deliberate();
        let small = Vector2::new(-12.0, 4.0);
        assert_eq!(
            policy.classify(GestureIntent::Undecided, small, true),
            GestureIntent::Undecided
        );

        let past = Vector2::new(-24.0, 4.0);
        assert_eq!(
            policy.classify(GestureIntent::Undecided, past, true),
            GestureIntent::HorizontalReveal
        );
    }

    #[test]
    fn deliberate_policy_waits_out_a_diagonal() {
        let policy = DirectionLockPolicy::deliberate();
        assert_eq!(
            policy.classify(GestureIntent::Undecided, Vector2::new(-30.0, 30.0), true),
            GestureIntent::Undecided
        );
        assert_eq!(
            policy.classify(GestureIntent::Undecided, Vector2::new(-30.0, 31.0), true),
            GestureIntent::VerticalDismiss
        );
    }

    #[test]
    fn negative_dead_zone_is_clamped() {
        let policy = DirectionLockPolicy::immediate().with_dead_zone(-5.0);
        assert_eq!(policy.dead_zone, 0.0);
    }
}
