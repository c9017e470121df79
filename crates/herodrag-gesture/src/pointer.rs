//! Raw pointer input fed to a [`DragTracker`](crate::DragTracker).

use std::cell::Cell;
use std::rc::Rc;

use herodrag_geometry::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer change in host coordinates.
///
/// Clones share the consumed flag, so a recognizer that consumes an event
/// is visible to every other holder of the same event.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    /// Event timestamp in milliseconds since an arbitrary epoch.
    pub uptime_ms: i64,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(id: PointerId, kind: PointerEventKind, position: Point, uptime_ms: i64) -> Self {
        Self {
            id,
            kind,
            position,
            uptime_ms,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(id: PointerId, position: Point, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Down, position, uptime_ms)
    }

    pub fn moved(id: PointerId, position: Point, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Move, position, uptime_ms)
    }

    pub fn up(id: PointerId, position: Point, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Up, position, uptime_ms)
    }

    pub fn cancel(id: PointerId, position: Point, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Cancel, position, uptime_ms)
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}

impl PartialEq for PointerEvent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.position == other.position
            && self.uptime_ms == other.uptime_ms
    }
}
