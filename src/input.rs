//! Input model: keys, persistent UI flags, and the interaction state machine.
//!
//! `UiState` is what survives between gestures (selection, grid toggle).
//! `InteractionMode` is the gesture in progress between pointer-down and
//! pointer-up; being an enum, at most one gesture can be active at a time.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::furniture::ControlButton;

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this key removes the selected piece.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// State that persists across gestures and is visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Index of the selected piece. While set, its control buttons and
    /// dimensions are drawn over everything else.
    pub selected: Option<usize>,
    /// Whether the background grid is drawn.
    pub show_grid: bool,
}

/// The gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// No gesture; waiting for pointer-down.
    #[default]
    Idle,
    /// Moving a wall vertex.
    DraggingVertex(usize),
    /// Moving a piece of furniture.
    DraggingFurniture(usize),
    /// Turning a piece toward the pointer.
    Rotating(usize),
    /// Resizing a piece from its right edge.
    ResizingWidth(usize),
    /// Resizing a piece from its top edge.
    ResizingHeight(usize),
}

impl InteractionMode {
    /// The gesture started by pressing `button` on piece `index`, if any.
    /// Delete is immediate and starts no gesture.
    #[must_use]
    pub fn for_control(button: ControlButton, index: usize) -> Option<Self> {
        match button {
            ControlButton::Rotate => Some(Self::Rotating(index)),
            ControlButton::ResizeWidth => Some(Self::ResizingWidth(index)),
            ControlButton::ResizeHeight => Some(Self::ResizingHeight(index)),
            ControlButton::Delete => None,
        }
    }

    /// The furniture index this gesture operates on, if any.
    #[must_use]
    pub fn furniture_index(self) -> Option<usize> {
        match self {
            Self::DraggingFurniture(i) | Self::Rotating(i) | Self::ResizingWidth(i) | Self::ResizingHeight(i) => {
                Some(i)
            }
            Self::Idle | Self::DraggingVertex(_) => None,
        }
    }

    /// CSS cursor for the canvas while this gesture runs.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Idle => "default",
            Self::DraggingVertex(_) | Self::DraggingFurniture(_) => "grabbing",
            Self::Rotating(_) => "crosshair",
            Self::ResizingWidth(_) => "ew-resize",
            Self::ResizingHeight(_) => "ns-resize",
        }
    }
}
