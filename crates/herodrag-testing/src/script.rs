//! Scripted drags.

use herodrag_geometry::{Point, Vector2};
use herodrag_gesture::{DragSample, PointerEvent};

/// Builder for a sample sequence.
///
/// ```
/// use herodrag_testing::DragScript;
///
/// let samples = DragScript::began(0.0, 600.0)
///     .to(0.0, 40.0)
///     .to(0.0, 180.0)
///     .ended();
/// assert_eq!(samples.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DragScript {
    samples: Vec<DragSample>,
    translation: Vector2,
    velocity: Vector2,
}

impl DragScript {
    /// A script that opens with a `Began` at the origin moving at
    /// `(vx, vy)`. Later samples keep that velocity until
    /// [`velocity`](Self::velocity) changes it.
    pub fn began(vx: f32, vy: f32) -> Self {
        let velocity = Vector2::new(vx, vy);
        Self {
            samples: vec![DragSample::began(Vector2::ZERO, velocity)],
            translation: Vector2::ZERO,
            velocity,
        }
    }

    /// A script that starts mid-drag, without a `Began`.
    pub fn headless() -> Self {
        Self::default()
    }

    /// Velocity reported by subsequent samples.
    pub fn velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Vector2::new(vx, vy);
        self
    }

    /// A `Changed` sample at the cumulative translation `(dx, dy)`.
    pub fn to(mut self, dx: f32, dy: f32) -> Self {
        self.translation = Vector2::new(dx, dy);
        self.samples
            .push(DragSample::changed(self.translation, self.velocity));
        self
    }

    /// `steps` evenly spaced `Changed` samples from the current translation
    /// to `(dx, dy)`.
    pub fn glide(mut self, dx: f32, dy: f32, steps: usize) -> Self {
        let from = self.translation;
        let to = Vector2::new(dx, dy);
        let steps = steps.max(1);
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self = self.to(
                from.x + (to.x - from.x) * fraction,
                from.y + (to.y - from.y) * fraction,
            );
        }
        self
    }

    pub fn ended(mut self) -> Vec<DragSample> {
        self.samples
            .push(DragSample::ended(self.translation, self.velocity));
        self.samples
    }

    pub fn cancelled(mut self) -> Vec<DragSample> {
        self.samples
            .push(DragSample::cancelled(self.translation, self.velocity));
        self.samples
    }

    /// The samples so far, without a terminal one.
    pub fn open(self) -> Vec<DragSample> {
        self.samples
    }
}

/// Pointer events for a straight one-finger drag from `from` to `to` over
/// `duration_ms`, with `steps` moves in between.
pub fn pointer_drag(from: Point, to: Point, steps: usize, duration_ms: i64) -> Vec<PointerEvent> {
    let steps = steps.max(1);
    let mut events = Vec::with_capacity(steps + 2);
    events.push(PointerEvent::down(1, from, 0));
    for step in 1..=steps {
        let fraction = step as f32 / steps as f32;
        let position = Point::new(
            from.x + (to.x - from.x) * fraction,
            from.y + (to.y - from.y) * fraction,
        );
        let time = duration_ms * step as i64 / steps as i64;
        events.push(PointerEvent::moved(1, position, time));
    }
    events.push(PointerEvent::up(1, to, duration_ms));
    events
}
