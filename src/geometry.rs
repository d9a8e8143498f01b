//! Plane geometry primitives shared by the layout engine and the canvas.
//!
//! Layout space has Y growing upward from the bottom-left of the graph
//! bounding box; surface space has Y growing downward from the top-left.
//! Both spaces use the same `Point`/`Rect` types; the canvas module owns
//! the conversion between them.

use serde::Serialize;

/// A point in either layout or surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise midpoint between this point and another.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation toward another point; `t` in [0, 1].
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// An axis-aligned rectangle anchored at its minimum corner.
///
/// In surface space the anchor is the top-left corner; in layout space it
/// is the bottom-left. Width and height are never negative for rectangles
/// produced by this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle from its min corner and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The maximum-x edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// The maximum-y edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether a point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let p = Point::new(3.0, -4.0);
        assert_eq!(p.x, 3.0);
        assert_eq!(p.y, -4.0);
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_midpoint() {
        let m = Point::new(0.0, 10.0).midpoint(&Point::new(4.0, 0.0));
        assert_eq!(m, Point::new(2.0, 5.0));
    }

    #[test]
    fn test_point_lerp() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(9.0, 3.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 1.0 / 3.0), Point::new(3.0, 1.0));
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(1.0, 2.0, 10.0, 20.0);
        assert_eq!(r.right(), 11.0);
        assert_eq!(r.bottom(), 22.0);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(r.contains(Point::new(0.0, 10.0)));
        assert!(!r.contains(Point::new(10.1, 5.0)));
    }
}
