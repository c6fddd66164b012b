//! Shared numeric constants for the room planner.
//!
//! These are the defaults behind [`crate::config::PlannerConfig`]; code paths
//! that need a tunable value read it from the config, not from here.

// ── Units ───────────────────────────────────────────────────────

/// Canvas pixels per real-world inch.
pub const PIXELS_PER_INCH: f64 = 4.0;

/// Centimeters per inch.
pub const CM_PER_INCH: f64 = 2.54;

// ── Room outline ────────────────────────────────────────────────

/// Half-size of a vertex hit-box, in pixels.
pub const VERTEX_RADIUS: f64 = 8.0;

/// A dragged vertex snaps to another vertex's x or y within this distance.
pub const VERTEX_SNAP_PX: f64 = 10.0;

/// Fewest vertices a wall polygon may have.
pub const MIN_VERTICES: usize = 3;

/// Most vertices a wall polygon may have.
pub const MAX_VERTICES: usize = 10;

/// Vertex count of a rectangular outline; the configured floor may not exceed it.
pub const RECT_VERTICES: usize = 4;

/// Default L-shaped room outline, as vertex centers in pixels.
pub const DEFAULT_OUTLINE: [(f64, f64); 6] = [
    (200.0, 100.0),
    (900.0, 100.0),
    (900.0, 400.0),
    (600.0, 400.0),
    (600.0, 600.0),
    (200.0, 600.0),
];

// ── Furniture ───────────────────────────────────────────────────

/// Width and height must stay strictly above this after a resize.
pub const MIN_FURNITURE_SIZE: f64 = 15.0;

/// Rotation snaps to a cardinal direction within this many degrees.
pub const ROTATION_SNAP_DEG: f64 = 10.0;

/// Diameter of a furniture control button, in pixels.
pub const CONTROL_BUTTON_SIZE: f64 = 20.0;

/// Corner radius of furniture bodies.
pub const FURNITURE_CORNER_RADIUS: f64 = 6.0;

/// Labels longer than the body are cut to this many characters.
pub const LABEL_TRUNCATE_CHARS: usize = 5;

/// Region new furniture is dropped into: `(min_x, max_x, min_y, max_y)`.
pub const SPAWN_REGION: (f64, f64, f64, f64) = (400.0, 700.0, 200.0, 400.0);

// ── Chrome ──────────────────────────────────────────────────────

/// Distance between background grid lines, in pixels.
pub const GRID_SPACING_PX: f64 = 20.0;

/// Closest grid lines may be drawn.
pub const MIN_GRID_SPACING_PX: f64 = 2.0;

/// Canvas size used before the host reports a real one.
pub const DEFAULT_CANVAS_SIZE: (f64, f64) = (1200.0, 800.0);
