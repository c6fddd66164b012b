//! Pointer hit-testing against vertices, furniture, and control buttons.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::furniture::ControlButton;
use crate::geometry::Point;
use crate::room::Room;

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A control button of the selected piece.
    Control { index: usize, button: ControlButton },
    /// A wall vertex.
    Vertex(usize),
    /// The body of a piece of furniture.
    Furniture(usize),
}

/// Find what lies under `pt`.
///
/// Priority is fixed: the selected piece's control buttons, then vertices,
/// then furniture bodies from topmost (last) to bottommost.
#[must_use]
pub fn hit_test(pt: Point, room: &Room, selected: Option<usize>, button_size: f64) -> Option<Hit> {
    if let Some(index) = selected {
        if let Some(piece) = room.furniture().get(index) {
            if let Some(button) = piece.controls(button_size).hit(pt) {
                return Some(Hit::Control { index, button });
            }
        }
    }

    if let Some(i) = room.vertices().iter().position(|v| v.contains(pt)) {
        return Some(Hit::Vertex(i));
    }

    room.furniture()
        .iter()
        .rposition(|f| f.contains(pt))
        .map(Hit::Furniture)
}
