//! Document-space geometry primitives
//!
//! All coordinates are in document space: the coordinate system fixed to the
//! drawing content, unaffected by pan/zoom. Conversions to and from screen
//! space live in the viewer crate.

use serde::{Deserialize, Serialize};

/// A point in document space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Named resize handles.
///
/// Rect-like annotations expose the four corners; circles expose the four
/// cardinal rim points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    Nw,
    Ne,
    Sw,
    Se,
    Top,
    Right,
    Bottom,
    Left,
}

/// An axis-aligned rectangle in document space.
///
/// Width and height may be negative while a shape is being drawn; callers
/// that need well-ordered bounds go through [`Rect::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanning two arbitrary corner points.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Equivalent rectangle with non-negative extents, shifting the origin
    /// when width or height is negative.
    pub fn normalized(&self) -> Rect {
        let mut rect = *self;
        if rect.width < 0.0 {
            rect.x += rect.width;
            rect.width = -rect.width;
        }
        if rect.height < 0.0 {
            rect.y += rect.height;
            rect.height = -rect.height;
        }
        rect
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn contains(&self, point: Point) -> bool {
        let rect = self.normalized();
        point.x >= rect.x
            && point.x <= rect.x + rect.width
            && point.y >= rect.y
            && point.y <= rect.y + rect.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        !(a.x > b.x + b.width
            || a.x + a.width < b.x
            || a.y > b.y + b.height
            || a.y + a.height < b.y)
    }

    /// Position of a corner handle on the normalized bounds.
    pub fn corner(&self, handle: ResizeHandle) -> Point {
        let rect = self.normalized();
        match handle {
            ResizeHandle::Nw => Point::new(rect.x, rect.y),
            ResizeHandle::Ne => Point::new(rect.x + rect.width, rect.y),
            ResizeHandle::Sw => Point::new(rect.x, rect.y + rect.height),
            ResizeHandle::Se => Point::new(rect.x + rect.width, rect.y + rect.height),
            // Cardinal handles belong to circles; midpoints are the closest
            // rect-like equivalent and keep this total.
            ResizeHandle::Top => Point::new(rect.x + rect.width / 2.0, rect.y),
            ResizeHandle::Right => Point::new(rect.x + rect.width, rect.y + rect.height / 2.0),
            ResizeHandle::Bottom => Point::new(rect.x + rect.width / 2.0, rect.y + rect.height),
            ResizeHandle::Left => Point::new(rect.x, rect.y + rect.height / 2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn normalized_shifts_origin_for_negative_extents() {
        let rect = Rect::new(100.0, 100.0, -40.0, -30.0).normalized();
        assert_eq!(rect, Rect::new(60.0, 70.0, 40.0, 30.0));
    }

    #[test]
    fn containment_works_on_unnormalized_rects() {
        let rect = Rect::new(100.0, 100.0, -40.0, -30.0);
        assert!(rect.contains(Point::new(80.0, 90.0)));
        assert!(!rect.contains(Point::new(120.0, 90.0)));
    }

    #[test]
    fn intersection_detects_overlap_and_separation() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(a.intersects(&Rect::new(50.0, 50.0, 100.0, 100.0)));
        assert!(a.intersects(&Rect::new(100.0, 100.0, 10.0, 10.0))); // touching edge
        assert!(!a.intersects(&Rect::new(101.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn corners_use_normalized_bounds() {
        let rect = Rect::new(50.0, 50.0, -20.0, 10.0);
        assert_eq!(rect.corner(ResizeHandle::Nw), Point::new(30.0, 50.0));
        assert_eq!(rect.corner(ResizeHandle::Se), Point::new(50.0, 60.0));
    }
}
