use herodrag_geometry::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl DragPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, DragPhase::Ended | DragPhase::Cancelled)
    }
}

/// One continuous-drag update.
///
/// `translation` is cumulative since the drag started; `velocity` is in
/// points per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    pub phase: DragPhase,
    pub translation: Vector2,
    pub velocity: Vector2,
}

impl DragSample {
    pub fn new(phase: DragPhase, translation: Vector2, velocity: Vector2) -> Self {
        Self {
            phase,
            translation,
            velocity,
        }
    }

    pub fn began(translation: Vector2, velocity: Vector2) -> Self {
        Self::new(DragPhase::Began, translation, velocity)
    }

    pub fn changed(translation: Vector2, velocity: Vector2) -> Self {
        Self::new(DragPhase::Changed, translation, velocity)
    }

    pub fn ended(translation: Vector2, velocity: Vector2) -> Self {
        Self::new(DragPhase::Ended, translation, velocity)
    }

    pub fn cancelled(translation: Vector2, velocity: Vector2) -> Self {
        Self::new(DragPhase::Cancelled, translation, velocity)
    }
}
