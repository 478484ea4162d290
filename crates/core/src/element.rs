//! Fixed background vector elements
//!
//! The drawing beneath the overlay exposes a set of recognized elements
//! (walls, rooms, labels, ...) with document-space bounds. Marquee comment
//! creation targets these: a comment thread records the ids of the elements
//! it was attached to.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Wall,
    Door,
    Window,
    Room,
    Dimension,
    Text,
}

/// A recognized element of the underlying drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorElement {
    pub id: String,
    pub kind: ElementKind,
    pub bounds: Rect,
}

impl VectorElement {
    pub fn new(id: impl Into<String>, kind: ElementKind, bounds: Rect) -> Self {
        Self { id: id.into(), kind, bounds }
    }
}

/// Ordered collection of background elements with the two queries marquee
/// selection needs.
#[derive(Debug, Clone, Default)]
pub struct ElementSet {
    elements: Vec<VectorElement>,
}

impl ElementSet {
    pub fn new(elements: Vec<VectorElement>) -> Self {
        Self { elements }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VectorElement> {
        self.elements.iter()
    }

    /// Id of the first element whose bounds contain the point.
    pub fn at_point(&self, point: Point) -> Option<&str> {
        self.elements
            .iter()
            .find(|element| element.bounds.contains(point))
            .map(|element| element.id.as_str())
    }

    /// Ids of every element whose bounds intersect the rectangle spanned by
    /// two arbitrary corners, in insertion order.
    pub fn in_rect(&self, a: Point, b: Point) -> Vec<String> {
        let region = Rect::from_corners(a, b);
        self.elements
            .iter()
            .filter(|element| element.bounds.intersects(&region))
            .map(|element| element.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ElementSet {
        ElementSet::new(vec![
            VectorElement::new("wall-1", ElementKind::Wall, Rect::new(50.0, 50.0, 700.0, 3.0)),
            VectorElement::new("room-1", ElementKind::Room, Rect::new(50.0, 50.0, 250.0, 150.0)),
            VectorElement::new("text-1", ElementKind::Text, Rect::new(120.0, 120.0, 100.0, 20.0)),
            VectorElement::new("room-2", ElementKind::Room, Rect::new(500.0, 50.0, 250.0, 300.0)),
        ])
    }

    #[test]
    fn at_point_returns_first_containing_element() {
        let elements = sample();
        assert_eq!(elements.at_point(Point::new(130.0, 125.0)), Some("room-1"));
        assert_eq!(elements.at_point(Point::new(400.0, 400.0)), None);
    }

    #[test]
    fn in_rect_collects_intersecting_ids() {
        let elements = sample();
        let hits = elements.in_rect(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert_eq!(hits, vec!["wall-1".to_string(), "room-1".to_string()]);
    }

    #[test]
    fn in_rect_accepts_corners_in_any_order() {
        let elements = sample();
        let forward = elements.in_rect(Point::new(0.0, 0.0), Point::new(800.0, 600.0));
        let reversed = elements.in_rect(Point::new(800.0, 600.0), Point::new(0.0, 0.0));
        assert_eq!(forward, reversed);
        assert_eq!(forward.len(), 4);
    }
}
