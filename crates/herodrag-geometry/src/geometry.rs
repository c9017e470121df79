//! Geometric primitives: Point, Vector2, Size, Rect

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// Linear interpolation between `start` and `end`.
///
/// `fraction` is not clamped; springs that overshoot rely on that.
#[inline]
pub fn lerp(start: f32, end: f32, fraction: f32) -> f32 {
    start + (end - start) * fraction
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Vector from `origin` to this point.
    pub fn offset_from(&self, origin: Point) -> Vector2 {
        Vector2::new(self.x - origin.x, self.y - origin.y)
    }
}

impl Add<Vector2> for Point {
    type Output = Point;

    fn add(self, rhs: Vector2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A signed 2-D displacement, velocity or drag translation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    /// Euclidean length, `hypot(x, y)`.
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// True when the horizontal component strictly dominates.
    pub fn is_horizontal(&self) -> bool {
        self.x.abs() > self.y.abs()
    }

    /// True when the vertical component strictly dominates.
    pub fn is_vertical(&self) -> bool {
        self.y.abs() > self.x.abs()
    }

    /// Rescales the vector so its length does not exceed `max_length`.
    pub fn clamp_length(self, max_length: f32) -> Self {
        let length = self.length();
        if length <= max_length || length == 0.0 {
            self
        } else {
            self * (max_length / length)
        }
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f32) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: f32) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

/// A frame in the host's coordinate space, e.g. the tapped map annotation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_length_keeps_direction() {
        let clamped = Vector2::new(300.0, 400.0).clamp_length(100.0);
        assert!((clamped.length() - 100.0).abs() < 1e-3);
        assert!((clamped.x - 60.0).abs() < 1e-3);
        assert!((clamped.y - 80.0).abs() < 1e-3);
    }

    #[test]
    fn clamp_length_leaves_short_vectors_alone() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.clamp_length(10.0), v);
        assert_eq!(Vector2::ZERO.clamp_length(0.0), Vector2::ZERO);
    }

    #[test]
    fn dominance_is_strict() {
        assert!(!Vector2::new(5.0, 5.0).is_horizontal());
        assert!(!Vector2::new(5.0, -5.0).is_vertical());
        assert!(Vector2::new(-6.0, 5.0).is_horizontal());
    }

    #[test]
    fn rect_center_and_contains() {
        let rect = Rect::from_origin_size(Point::new(10.0, 20.0), Size::new(100.0, 50.0));
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
        assert!(rect.contains(10.0, 20.0));
        assert!(!rect.contains(111.0, 20.0));
    }
}
