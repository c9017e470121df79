//! Turns a raw pointer stream into [`DragSample`]s.
//!
//! The tracker follows one pointer at a time. Nothing is reported until the
//! pointer has moved further than the touch slop from where it went down;
//! from then on every move is a `Changed` sample with the translation
//! measured from the press position, and the release reports the capped
//! fling velocity.

use herodrag_geometry::{Point, Vector2};

use crate::constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
use crate::pointer::{PointerEvent, PointerEventKind, PointerId};
use crate::sample::DragSample;
use crate::velocity::VelocityTracker;

#[derive(Debug, Clone)]
pub struct DragTracker {
    touch_slop: f32,
    max_velocity: f32,
    pointer: Option<PointerId>,
    press_position: Point,
    dragging: bool,
    velocity: VelocityTracker,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD, MAX_FLING_VELOCITY)
    }
}

impl DragTracker {
    pub fn new(touch_slop: f32, max_velocity: f32) -> Self {
        Self {
            touch_slop: touch_slop.max(0.0),
            max_velocity,
            pointer: None,
            press_position: Point::ZERO,
            dragging: false,
            velocity: VelocityTracker::new(),
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed one pointer event. Events the tracker reacts to after the slop
    /// is crossed are consumed.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<DragSample> {
        match event.kind {
            PointerEventKind::Down => {
                if self.pointer.is_some() {
                    log::trace!("ignoring second pointer {}", event.id);
                    return None;
                }
                self.pointer = Some(event.id);
                self.press_position = event.position;
                self.dragging = false;
                self.velocity.reset();
                self.velocity.add_position(event.uptime_ms, event.position);
                None
            }
            PointerEventKind::Move => {
                if self.pointer != Some(event.id) {
                    return None;
                }
                self.velocity.add_position(event.uptime_ms, event.position);
                let translation = self.translation_to(event.position);

                if !self.dragging {
                    if translation.length() <= self.touch_slop {
                        return None;
                    }
                    self.dragging = true;
                    event.consume();
                    log::trace!("drag began after {:.1}pt", translation.length());
                    return Some(DragSample::began(translation, self.current_velocity()));
                }

                event.consume();
                Some(DragSample::changed(translation, self.current_velocity()))
            }
            PointerEventKind::Up => {
                if self.pointer != Some(event.id) {
                    return None;
                }
                self.velocity.add_position(event.uptime_ms, event.position);
                let sample = self.dragging.then(|| {
                    event.consume();
                    DragSample::ended(
                        self.translation_to(event.position),
                        self.current_velocity(),
                    )
                });
                self.reset();
                sample
            }
            PointerEventKind::Cancel => {
                if self.pointer != Some(event.id) {
                    return None;
                }
                let sample = self.dragging.then(|| {
                    DragSample::cancelled(self.translation_to(event.position), Vector2::ZERO)
                });
                self.reset();
                sample
            }
        }
    }

    fn translation_to(&self, position: Point) -> Vector2 {
        position.offset_from(self.press_position)
    }

    fn current_velocity(&self) -> Vector2 {
        self.velocity.calculate_velocity_with_max(self.max_velocity)
    }

    fn reset(&mut self) {
        self.pointer = None;
        self.dragging = false;
        self.velocity.reset();
    }
}
