//! Tunable planner settings.
//!
//! Every threshold the editor applies lives here so a host can adjust it
//! without touching the interaction code. Missing JSON keys fall back to the
//! values in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CM_PER_INCH, CONTROL_BUTTON_SIZE, DEFAULT_OUTLINE, GRID_SPACING_PX, MAX_VERTICES, MIN_FURNITURE_SIZE,
    MIN_GRID_SPACING_PX, MIN_VERTICES, PIXELS_PER_INCH, RECT_VERTICES, ROTATION_SNAP_DEG, SPAWN_REGION,
    VERTEX_RADIUS, VERTEX_SNAP_PX,
};

/// Axis-aligned region that freshly added furniture is placed inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRegion {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for SpawnRegion {
    fn default() -> Self {
        let (min_x, max_x, min_y, max_y) = SPAWN_REGION;
        Self { min_x, max_x, min_y, max_y }
    }
}

/// Planner-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlannerConfig {
    /// Canvas pixels per real-world inch.
    pub pixels_per_inch: f64,
    /// Half-size of a vertex hit-box.
    pub vertex_radius: f64,
    /// Per-axis snap distance for dragged vertices, in pixels.
    pub vertex_snap_px: f64,
    /// Rotation snap tolerance around each cardinal direction, in degrees.
    pub rotation_snap_deg: f64,
    /// Furniture width and height must stay strictly above this.
    pub min_furniture_size: f64,
    pub min_vertices: usize,
    pub max_vertices: usize,
    /// Diameter of the overlay control buttons.
    pub control_button_size: f64,
    pub grid_spacing_px: f64,
    pub spawn_region: SpawnRegion,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            pixels_per_inch: PIXELS_PER_INCH,
            vertex_radius: VERTEX_RADIUS,
            vertex_snap_px: VERTEX_SNAP_PX,
            rotation_snap_deg: ROTATION_SNAP_DEG,
            min_furniture_size: MIN_FURNITURE_SIZE,
            min_vertices: MIN_VERTICES,
            max_vertices: MAX_VERTICES,
            control_button_size: CONTROL_BUTTON_SIZE,
            grid_spacing_px: GRID_SPACING_PX,
            spawn_region: SpawnRegion::default(),
        }
    }
}

impl PlannerConfig {
    /// Canvas pixels per real-world centimeter.
    #[must_use]
    pub fn pixels_per_cm(&self) -> f64 {
        self.pixels_per_inch / CM_PER_INCH
    }

    /// Convert a pixel length to centimeters.
    #[must_use]
    pub fn px_to_cm(&self, px: f64) -> f64 {
        px / self.pixels_per_cm()
    }

    /// Convert a centimeter length to pixels.
    #[must_use]
    pub fn cm_to_px(&self, cm: f64) -> f64 {
        cm * self.pixels_per_cm()
    }

    /// Parse a (possibly partial) JSON config object.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid config object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Pull nonsensical values back to something the editor can work with.
    ///
    /// Lengths that must be positive, or at least non-negative, fall back to
    /// their defaults. The vertex floor is capped so a rectangle is always a
    /// legal outline, and the cap is raised so the default outline fits.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;

        repair(&mut self.pixels_per_inch, defaults.pixels_per_inch, positive);
        repair(&mut self.vertex_radius, defaults.vertex_radius, positive);
        repair(&mut self.control_button_size, defaults.control_button_size, positive);
        repair(&mut self.vertex_snap_px, defaults.vertex_snap_px, non_negative);
        repair(&mut self.rotation_snap_deg, defaults.rotation_snap_deg, non_negative);
        repair(&mut self.min_furniture_size, defaults.min_furniture_size, non_negative);
        repair(&mut self.grid_spacing_px, defaults.grid_spacing_px, |v| {
            v.is_finite() && v >= MIN_GRID_SPACING_PX
        });

        let region = self.spawn_region;
        let finite = [region.min_x, region.max_x, region.min_y, region.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            self.spawn_region = defaults.spawn_region;
        }

        self.min_vertices = self.min_vertices.clamp(MIN_VERTICES, RECT_VERTICES);
        self.max_vertices = self.max_vertices.max(DEFAULT_OUTLINE.len());
    }
}

fn repair(value: &mut f64, default: f64, valid: impl Fn(f64) -> bool) {
    if !valid(*value) {
        *value = default;
    }
}
