//! The room aggregate: wall polygon plus z-ordered furniture.
//!
//! `Room` exclusively owns its vertices and furniture. Callers refer to them by
//! index; list order is both paint order and (reversed) hit-test priority.

#[cfg(test)]
#[path = "room_test.rs"]
mod room_test;

use std::collections::BTreeMap;

use rand::Rng;

use crate::config::PlannerConfig;
use crate::consts::DEFAULT_OUTLINE;
use crate::furniture::Furniture;
use crate::geometry::{Point, centroid, midpoint, polygon_area};
use crate::vertex::Vertex;

/// Wall polygon and furniture for one planner session.
#[derive(Debug, Clone)]
pub struct Room {
    vertices: Vec<Vertex>,
    furniture: Vec<Furniture>,
    config: PlannerConfig,
}

impl Room {
    /// A room with the default L-shaped outline and no furniture.
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        let vertices = DEFAULT_OUTLINE
            .iter()
            .map(|&(x, y)| Vertex::new(Point::new(x, y), config.vertex_radius))
            .collect();
        Self { vertices, furniture: Vec::new(), config }
    }

    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    // --- Vertices ---

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn vertex_centers(&self) -> Vec<Point> {
        self.vertices.iter().map(Vertex::center).collect()
    }

    pub fn vertex_mut(&mut self, index: usize) -> Option<&mut Vertex> {
        self.vertices.get_mut(index)
    }

    /// Drag vertex `index` by `(dx, dy)`, then snap its x and y independently
    /// to any other vertex within the snap distance on that axis.
    pub fn drag_vertex(&mut self, index: usize, dx: f64, dy: f64) -> bool {
        let snap = self.config.vertex_snap_px;
        let Some(mut moved) = self.vertices.get(index).copied() else {
            return false;
        };
        moved.translate(dx, dy);
        for (i, other) in self.vertices.iter().enumerate() {
            if i == index {
                continue;
            }
            if (moved.rect.x - other.rect.x).abs() < snap {
                moved.rect.x = other.rect.x;
            }
            if (moved.rect.y - other.rect.y).abs() < snap {
                moved.rect.y = other.rect.y;
            }
        }
        self.vertices[index] = moved;
        true
    }

    /// Insert a vertex at the midpoint of the first and last vertices.
    /// Refused at the vertex cap.
    pub fn add_vertex(&mut self) -> bool {
        if self.vertices.len() >= self.config.max_vertices {
            return false;
        }
        let (Some(first), Some(last)) = (self.vertices.first(), self.vertices.last()) else {
            return false;
        };
        let mid = midpoint(first.center(), last.center());
        self.vertices.push(Vertex::new(mid, self.config.vertex_radius));
        log::debug!("room: vertex added at ({:.1}, {:.1}), count={}", mid.x, mid.y, self.vertices.len());
        true
    }

    /// Remove the last vertex. Refused at the vertex floor.
    pub fn remove_vertex(&mut self) -> bool {
        if self.vertices.len() <= self.config.min_vertices {
            return false;
        }
        self.vertices.pop();
        log::debug!("room: vertex removed, count={}", self.vertices.len());
        true
    }

    /// Replace the outline with vertices centered on `centers`.
    ///
    /// Lists shorter than the floor are refused; lists longer than the cap are
    /// truncated.
    pub fn set_vertex_centers(&mut self, centers: &[Point]) -> bool {
        if centers.len() < self.config.min_vertices {
            log::warn!("room: ignoring outline with {} vertices", centers.len());
            return false;
        }
        let radius = self.config.vertex_radius;
        self.vertices = centers
            .iter()
            .take(self.config.max_vertices)
            .map(|&c| Vertex::new(c, radius))
            .collect();
        true
    }

    /// Replace the outline with an axis-aligned `width_px` by `height_px`
    /// rectangle centered on the centroid of the current outline.
    pub fn set_rectangle(&mut self, width_px: f64, height_px: f64) -> bool {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width_px) || !valid(height_px) {
            return false;
        }
        let Some(c) = centroid(&self.vertex_centers()) else {
            return false;
        };
        let (hw, hh) = (width_px / 2.0, height_px / 2.0);
        self.set_vertex_centers(&[
            Point::new(c.x - hw, c.y - hh),
            Point::new(c.x + hw, c.y - hh),
            Point::new(c.x + hw, c.y + hh),
            Point::new(c.x - hw, c.y + hh),
        ])
    }

    /// Wall lengths in centimeters, one per edge, starting with vertex 0 to 1
    /// and ending with the closing edge back to vertex 0.
    #[must_use]
    pub fn wall_lengths_cm(&self) -> Vec<f64> {
        let ppcm = self.config.pixels_per_cm();
        self.edges().map(|(a, b)| a.distance_cm(b, ppcm)).collect()
    }

    /// Consecutive vertex pairs, wrapping back to the first.
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
    }

    /// Floor area in square meters.
    #[must_use]
    pub fn area_m2(&self) -> f64 {
        let ppcm = self.config.pixels_per_cm();
        polygon_area(&self.vertex_centers()) / (ppcm * ppcm) / 10_000.0
    }

    // --- Furniture ---

    #[must_use]
    pub fn furniture(&self) -> &[Furniture] {
        &self.furniture
    }

    pub fn furniture_mut(&mut self, index: usize) -> Option<&mut Furniture> {
        self.furniture.get_mut(index)
    }

    /// Add a new piece of `kind` at a random spot in the spawn region.
    /// Returns its index (always the topmost).
    pub fn add_furniture<R: Rng>(&mut self, kind: &str, rng: &mut R) -> usize {
        let piece = Furniture::spawn(kind, &self.config.spawn_region, rng);
        log::debug!("room: added {kind} at ({:.0}, {:.0})", piece.rect.x, piece.rect.y);
        self.push_furniture(piece)
    }

    /// Append an already-built piece on top. Returns its index.
    pub fn push_furniture(&mut self, piece: Furniture) -> usize {
        self.furniture.push(piece);
        self.furniture.len() - 1
    }

    /// Remove the piece at `index`. Out-of-range indices are ignored.
    pub fn delete_furniture(&mut self, index: usize) -> Option<Furniture> {
        if index >= self.furniture.len() {
            return None;
        }
        let piece = self.furniture.remove(index);
        log::debug!("room: deleted {} at index {index}", piece.kind);
        Some(piece)
    }

    /// Move the piece at `index` to the end of the list. Returns its new
    /// index, or `None` if `index` is out of range.
    pub fn bring_furniture_to_top(&mut self, index: usize) -> Option<usize> {
        if index >= self.furniture.len() {
            return None;
        }
        let piece = self.furniture.remove(index);
        Some(self.push_furniture(piece))
    }

    /// Replace every piece.
    pub fn replace_furniture(&mut self, pieces: Vec<Furniture>) {
        self.furniture = pieces;
    }

    /// Number of pieces per type label.
    #[must_use]
    pub fn furniture_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for piece in &self.furniture {
            *counts.entry(piece.kind.clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
