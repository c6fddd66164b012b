//! Furniture pieces: type presets, control buttons, and the direct-manipulation
//! operations (move, rotate with cardinal snapping, resize).
//!
//! A piece's `kind` is an open-ended string. The twelve labels in [`PRESETS`]
//! pick a default size and color (case-insensitively); anything else gets
//! [`DEFAULT_SIZE`] and [`DEFAULT_COLOR`].

#[cfg(test)]
#[path = "furniture_test.rs"]
mod furniture_test;

use rand::Rng;

use crate::config::SpawnRegion;
use crate::geometry::{Point, Rect, degrees, normalize_degrees};

/// Size and color associated with a known furniture label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FurniturePreset {
    pub label: &'static str,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
}

/// Known furniture labels.
pub const PRESETS: [FurniturePreset; 12] = [
    FurniturePreset { label: "Bed", width: 160.0, height: 200.0, color: "#8B7355" },
    FurniturePreset { label: "Desk", width: 120.0, height: 60.0, color: "#A0522D" },
    FurniturePreset { label: "Chair", width: 50.0, height: 50.0, color: "#CD853F" },
    FurniturePreset { label: "Sofa", width: 200.0, height: 80.0, color: "#6B8E23" },
    FurniturePreset { label: "Table", width: 120.0, height: 80.0, color: "#DEB887" },
    FurniturePreset { label: "Dresser", width: 100.0, height: 50.0, color: "#8B4513" },
    FurniturePreset { label: "TV", width: 120.0, height: 20.0, color: "#2F4F4F" },
    FurniturePreset { label: "Lamp", width: 30.0, height: 30.0, color: "#DAA520" },
    FurniturePreset { label: "Nightstand", width: 45.0, height: 40.0, color: "#D2B48C" },
    FurniturePreset { label: "Rug", width: 200.0, height: 140.0, color: "#BC8F8F" },
    FurniturePreset { label: "Door", width: 90.0, height: 10.0, color: "#A9A9A9" },
    FurniturePreset { label: "Window", width: 100.0, height: 10.0, color: "#87CEEB" },
];

/// Size of a piece whose type is not in [`PRESETS`].
pub const DEFAULT_SIZE: (f64, f64) = (100.0, 80.0);

/// Color of a piece whose type is not in [`PRESETS`].
pub const DEFAULT_COLOR: &str = "#B0B0B0";

/// Cardinal directions rotation snaps to, in degrees.
const CARDINALS: [f64; 4] = [0.0, 90.0, 180.0, -90.0];

/// Look up the preset for a furniture type, ignoring ASCII case.
#[must_use]
pub fn preset_for(kind: &str) -> Option<&'static FurniturePreset> {
    PRESETS.iter().find(|p| p.label.eq_ignore_ascii_case(kind))
}

/// One of the four buttons drawn around the selected piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    /// Bottom-right corner.
    Rotate,
    /// Top-right corner.
    Delete,
    /// Middle of the right edge.
    ResizeWidth,
    /// Middle of the top edge.
    ResizeHeight,
}

impl ControlButton {
    /// All buttons in hit-test order.
    pub const ALL: [Self; 4] = [Self::Delete, Self::Rotate, Self::ResizeWidth, Self::ResizeHeight];

    /// Symbol drawn inside the button.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Rotate => "↻",
            Self::Delete => "×",
            Self::ResizeWidth => "↔",
            Self::ResizeHeight => "↕",
        }
    }

    /// Background fill of the button.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Delete => "#E53935",
            Self::Rotate | Self::ResizeWidth | Self::ResizeHeight => "#1E88E5",
        }
    }
}

/// Hit-regions of the four control buttons, derived from a body rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub rotate: Rect,
    pub delete: Rect,
    pub resize_width: Rect,
    pub resize_height: Rect,
}

impl Controls {
    /// Lay the buttons out around `body`. Rotation is ignored: buttons stay
    /// on the unrotated bounding box.
    #[must_use]
    pub fn around(body: &Rect, size: f64) -> Self {
        let right = body.x + body.width;
        let bottom = body.y + body.height;
        Self {
            rotate: Rect::centered_square(Point::new(right, bottom), size),
            delete: Rect::centered_square(Point::new(right, body.y), size),
            resize_width: Rect::centered_square(Point::new(right, body.y + body.height / 2.0), size),
            resize_height: Rect::centered_square(Point::new(body.x + body.width / 2.0, body.y), size),
        }
    }

    #[must_use]
    pub fn rect(&self, button: ControlButton) -> Rect {
        match button {
            ControlButton::Rotate => self.rotate,
            ControlButton::Delete => self.delete,
            ControlButton::ResizeWidth => self.resize_width,
            ControlButton::ResizeHeight => self.resize_height,
        }
    }

    /// First button (in [`ControlButton::ALL`] order) containing `pt`.
    #[must_use]
    pub fn hit(&self, pt: Point) -> Option<ControlButton> {
        ControlButton::ALL
            .into_iter()
            .find(|b| self.rect(*b).contains(pt))
    }
}

/// A placed piece of furniture.
#[derive(Debug, Clone, PartialEq)]
pub struct Furniture {
    /// Type label, e.g. `"Sofa"`. Not restricted to known presets.
    pub kind: String,
    /// Unrotated body, top-left anchored.
    pub rect: Rect,
    /// Rotation about the body center, in degrees. 0 = unrotated.
    pub angle: f64,
    /// Fill color, fixed at construction from `kind`.
    pub color: &'static str,
}

impl Furniture {
    /// Create a piece of `kind` with its top-left corner at `origin`, sized
    /// and colored from the preset table.
    #[must_use]
    pub fn new(kind: impl Into<String>, origin: Point) -> Self {
        let kind = kind.into();
        let (width, height, color) = match preset_for(&kind) {
            Some(p) => (p.width, p.height, p.color),
            None => (DEFAULT_SIZE.0, DEFAULT_SIZE.1, DEFAULT_COLOR),
        };
        Self { kind, rect: Rect::new(origin.x, origin.y, width, height), angle: 0.0, color }
    }

    /// Create a piece at a random position inside `region`.
    pub fn spawn<R: Rng>(kind: impl Into<String>, region: &SpawnRegion, rng: &mut R) -> Self {
        let x = random_between(rng, region.min_x, region.max_x);
        let y = random_between(rng, region.min_y, region.max_y);
        Self::new(kind, Point::new(x, y))
    }

    /// Rebuild a piece from stored geometry. Color is re-derived from `kind`.
    #[must_use]
    pub fn restore(kind: impl Into<String>, rect: Rect, angle: f64) -> Self {
        let mut piece = Self::new(kind, Point::new(rect.x, rect.y));
        piece.rect = rect;
        piece.angle = angle;
        piece
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// Bounding-box hit test (rotation ignored).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.rect.contains(pt)
    }

    #[must_use]
    pub fn controls(&self, button_size: f64) -> Controls {
        Controls::around(&self.rect, button_size)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.rect.translate(dx, dy);
    }

    /// Point the piece's "up" side toward `pointer`, snapping to a cardinal
    /// direction when within `snap_deg` of one. Returns false when the
    /// pointer sits on the center and no direction can be derived.
    pub fn rotate_toward(&mut self, pointer: Point, snap_deg: f64) -> bool {
        let c = self.center();
        let (dx, dy) = (pointer.x - c.x, pointer.y - c.y);
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        let raw = normalize_degrees(degrees(dy.atan2(dx)) + 90.0);
        self.angle = snap_to_cardinal(raw, snap_deg);
        true
    }

    /// Grow or shrink from the right edge. Rejected (no change) unless the
    /// result stays above `min_size`.
    pub fn scale_width(&mut self, dx: f64, min_size: f64) -> bool {
        let width = self.rect.width + dx;
        if width <= min_size {
            return false;
        }
        self.rect.width = width;
        true
    }

    /// Grow or shrink from the top edge: `y` moves with the pointer and the
    /// bottom edge stays put. Rejected unless the result stays above
    /// `min_size`.
    pub fn scale_height(&mut self, dy: f64, min_size: f64) -> bool {
        let height = self.rect.height - dy;
        if height <= min_size {
            return false;
        }
        self.rect.y += dy;
        self.rect.height = height;
        true
    }
}

/// Snap `angle` (degrees, in `(-180, 180]`) to the nearest cardinal within
/// `tolerance`; otherwise return it unchanged.
#[must_use]
pub fn snap_to_cardinal(angle: f64, tolerance: f64) -> f64 {
    CARDINALS
        .into_iter()
        .find(|c| normalize_degrees(angle - c).abs() <= tolerance)
        .unwrap_or(angle)
}

fn random_between<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}
