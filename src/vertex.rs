//! Draggable corners of the room's wall polygon.

#[cfg(test)]
#[path = "vertex_test.rs"]
mod vertex_test;

use crate::geometry::{Point, Rect, distance_cm};

/// One draggable corner of the room's wall polygon.
///
/// Stored as a square hit-box centered on the logical corner; the logical
/// point is always the box center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub rect: Rect,
}

impl Vertex {
    /// Create a vertex whose hit-box is centered on `center`.
    #[must_use]
    pub fn new(center: Point, radius: f64) -> Self {
        Self { rect: Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0) }
    }

    /// The logical corner point.
    #[must_use]
    pub fn center(&self) -> Point {
        self.rect.center()
    }

    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.rect.contains(pt)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.rect.translate(dx, dy);
    }

    /// Wall length to `other` in centimeters.
    #[must_use]
    pub fn distance_cm(&self, other: &Vertex, pixels_per_cm: f64) -> f64 {
        distance_cm(self.center(), other.center(), pixels_per_cm)
    }
}
