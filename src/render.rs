//! Rendering: draws the full editor scene to a 2D surface.
//!
//! Drawing goes through the [`Surface`] trait, implemented for
//! [`web_sys::CanvasRenderingContext2d`]. Renderers receive read-only views of
//! the room and UI state and never mutate them.
//!
//! The scene is redrawn from scratch every frame in a fixed layer order:
//! background, grid, walls, vertices, wall dimensions, furniture, and finally
//! the selected piece's overlay.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::PlannerConfig;
use crate::consts::{FURNITURE_CORNER_RADIUS, LABEL_TRUNCATE_CHARS, MIN_GRID_SPACING_PX};
use crate::furniture::{ControlButton, Furniture};
use crate::geometry::midpoint;
use crate::input::UiState;
use crate::room::Room;
use crate::vertex::Vertex;

const BACKGROUND: &str = "#F7F5F0";
const GRID_LINE: &str = "#E2DED6";
const FLOOR_FILL: &str = "#FFFFFF";
const WALL_STROKE: &str = "#3A3A3A";
const WALL_WIDTH: f64 = 4.0;
const VERTEX_FILL: &str = "#1E88E5";
const DIMENSION_TEXT: &str = "#444444";
const DIMENSION_LINE: &str = "#888888";
const FURNITURE_STROKE: &str = "#333333";
const LABEL_TEXT: &str = "#FFFFFF";
const LABEL_FONT: &str = "12px sans-serif";
const DIMENSION_FONT: &str = "11px sans-serif";
const GLYPH_FONT: &str = "bold 13px sans-serif";

/// Offset of a wall length label from its edge midpoint (up and right).
const WALL_LABEL_OFFSET: (f64, f64) = (10.0, -10.0);
/// Gap between a furniture edge and its dimension reference line.
const DIMENSION_GAP: f64 = 6.0;
/// Horizontal padding kept clear on each side of a furniture label.
const LABEL_PADDING: f64 = 4.0;

/// The subset of the Canvas2D API the editor draws with.
pub trait Surface {
    fn save(&self);
    fn restore(&self);
    /// # Errors
    /// Propagates the canvas exception.
    fn translate(&self, x: f64, y: f64) -> Result<(), JsValue>;
    /// # Errors
    /// Propagates the canvas exception.
    fn rotate(&self, radians: f64) -> Result<(), JsValue>;
    fn set_fill_style(&self, css: &str);
    fn set_stroke_style(&self, css: &str);
    fn set_line_width(&self, width: f64);
    fn set_font(&self, font: &str);
    fn set_text_align(&self, align: &str);
    fn set_text_baseline(&self, baseline: &str);
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);
    fn begin_path(&self);
    fn move_to(&self, x: f64, y: f64);
    fn line_to(&self, x: f64, y: f64);
    /// # Errors
    /// Propagates the canvas exception.
    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue>;
    /// # Errors
    /// Propagates the canvas exception.
    fn arc_to(&self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), JsValue>;
    fn close_path(&self);
    fn fill(&self);
    fn stroke(&self);
    /// # Errors
    /// Propagates the canvas exception.
    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), JsValue>;
    /// Rendered width of `text` in the current font. Infinite if it cannot be
    /// measured.
    fn measure_text(&self, text: &str) -> f64;
}

impl Surface for CanvasRenderingContext2d {
    fn save(&self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::translate(self, x, y)
    }

    fn rotate(&self, radians: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::rotate(self, radians)
    }

    fn set_fill_style(&self, css: &str) {
        self.set_fill_style_str(css);
    }

    fn set_stroke_style(&self, css: &str) {
        self.set_stroke_style_str(css);
    }

    fn set_line_width(&self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_font(&self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn set_text_align(&self, align: &str) {
        CanvasRenderingContext2d::set_text_align(self, align);
    }

    fn set_text_baseline(&self, baseline: &str) {
        CanvasRenderingContext2d::set_text_baseline(self, baseline);
    }

    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn begin_path(&self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::arc(self, x, y, radius, start, end)
    }

    fn arc_to(&self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::arc_to(self, x1, y1, x2, y2, radius)
    }

    fn close_path(&self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn fill(&self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn stroke(&self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::fill_text(self, text, x, y)
    }

    fn measure_text(&self, text: &str) -> f64 {
        match CanvasRenderingContext2d::measure_text(self, text) {
            Ok(metrics) => metrics.width(),
            Err(_) => f64::INFINITY,
        }
    }
}

/// Draw the full scene onto a `width` by `height` surface.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_scene<S: Surface + ?Sized>(
    s: &S,
    room: &Room,
    ui: &UiState,
    width: f64,
    height: f64,
) -> Result<(), JsValue> {
    let config = room.config();

    // Layer 1: background.
    s.set_fill_style(BACKGROUND);
    s.fill_rect(0.0, 0.0, width, height);

    // Layer 2: grid.
    if ui.show_grid {
        draw_grid(s, width, height, config.grid_spacing_px);
    }

    // Layer 3-5: walls, vertices, wall lengths.
    draw_walls(s, room.vertices());
    for v in room.vertices() {
        draw_vertex(s, v)?;
    }
    draw_wall_dimensions(s, room)?;

    // Layer 6-7: furniture, then the selected piece's overlay on top.
    draw_all_furniture(s, room.furniture(), ui.selected, config)
}

// =============================================================
// Chrome
// =============================================================

fn draw_grid<S: Surface + ?Sized>(s: &S, width: f64, height: f64, spacing: f64) {
    if !(spacing.is_finite() && spacing >= MIN_GRID_SPACING_PX) {
        return;
    }
    s.save();
    s.set_stroke_style(GRID_LINE);
    s.set_line_width(1.0);
    s.begin_path();
    let mut x = 0.0;
    while x <= width {
        s.move_to(x, 0.0);
        s.line_to(x, height);
        x += spacing;
    }
    let mut y = 0.0;
    while y <= height {
        s.move_to(0.0, y);
        s.line_to(width, y);
        y += spacing;
    }
    s.stroke();
    s.restore();
}

// =============================================================
// Walls
// =============================================================

/// Closed polyline through every vertex center, in list order.
fn draw_walls<S: Surface + ?Sized>(s: &S, vertices: &[Vertex]) {
    let Some((first, rest)) = vertices.split_first() else {
        return;
    };
    s.save();
    s.begin_path();
    let start = first.center();
    s.move_to(start.x, start.y);
    for v in rest {
        let c = v.center();
        s.line_to(c.x, c.y);
    }
    s.close_path();
    s.set_fill_style(FLOOR_FILL);
    s.fill();
    s.set_stroke_style(WALL_STROKE);
    s.set_line_width(WALL_WIDTH);
    s.stroke();
    s.restore();
}

fn draw_vertex<S: Surface + ?Sized>(s: &S, v: &Vertex) -> Result<(), JsValue> {
    let r = &v.rect;
    rounded_rect_path(s, r.x, r.y, r.width, r.height, r.width / 4.0)?;
    s.set_fill_style(VERTEX_FILL);
    s.fill();
    Ok(())
}

/// Length label for every edge, wrapping from the last vertex to the first.
fn draw_wall_dimensions<S: Surface + ?Sized>(s: &S, room: &Room) -> Result<(), JsValue> {
    let ppcm = room.config().pixels_per_cm();
    s.save();
    s.set_fill_style(DIMENSION_TEXT);
    s.set_font(DIMENSION_FONT);
    s.set_text_align("left");
    s.set_text_baseline("bottom");
    for (a, b) in room.edges() {
        let mid = midpoint(a.center(), b.center());
        let label = format!("{:.0} cm", a.distance_cm(b, ppcm));
        s.fill_text(&label, mid.x + WALL_LABEL_OFFSET.0, mid.y + WALL_LABEL_OFFSET.1)?;
    }
    s.restore();
    Ok(())
}

// =============================================================
// Furniture
// =============================================================

/// Every piece in list order, then the selected piece's controls and
/// dimensions above all of them.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_all_furniture<S: Surface + ?Sized>(
    s: &S,
    pieces: &[Furniture],
    selected: Option<usize>,
    config: &PlannerConfig,
) -> Result<(), JsValue> {
    for piece in pieces {
        draw_furniture(s, piece)?;
    }
    if let Some(piece) = selected.and_then(|i| pieces.get(i)) {
        draw_overlay(s, piece, config.control_button_size)?;
        draw_dimensions(s, piece, config)?;
    }
    Ok(())
}

fn draw_furniture<S: Surface + ?Sized>(s: &S, piece: &Furniture) -> Result<(), JsValue> {
    let (w, h) = (piece.rect.width, piece.rect.height);
    let c = piece.center();

    s.save();
    s.translate(c.x, c.y)?;
    s.rotate(piece.angle.to_radians())?;

    rounded_rect_path(s, -w / 2.0, -h / 2.0, w, h, FURNITURE_CORNER_RADIUS)?;
    s.set_fill_style(piece.color);
    s.fill();
    s.set_stroke_style(FURNITURE_STROKE);
    s.set_line_width(1.5);
    s.stroke();

    s.set_fill_style(LABEL_TEXT);
    s.set_font(LABEL_FONT);
    s.set_text_align("center");
    s.set_text_baseline("middle");
    let label = fit_label(s, &piece.kind, w - LABEL_PADDING * 2.0);
    s.fill_text(&label, 0.0, 0.0)?;

    s.restore();
    Ok(())
}

/// `text` unchanged if it fits in `max_w`, otherwise its first few
/// characters followed by an ellipsis.
fn fit_label<S: Surface + ?Sized>(s: &S, text: &str, max_w: f64) -> String {
    if s.measure_text(text) <= max_w {
        return text.to_owned();
    }
    let head: String = text.chars().take(LABEL_TRUNCATE_CHARS).collect();
    format!("{head}...")
}

fn draw_overlay<S: Surface + ?Sized>(s: &S, piece: &Furniture, button_size: f64) -> Result<(), JsValue> {
    let controls = piece.controls(button_size);
    s.save();
    s.set_font(GLYPH_FONT);
    s.set_text_align("center");
    s.set_text_baseline("middle");
    for button in [ControlButton::Rotate, ControlButton::Delete, ControlButton::ResizeWidth, ControlButton::ResizeHeight] {
        let c = controls.rect(button).center();
        s.begin_path();
        s.arc(c.x, c.y, button_size / 2.0, 0.0, 2.0 * PI)?;
        s.set_fill_style(button.color());
        s.fill();
        s.set_fill_style(LABEL_TEXT);
        s.fill_text(button.glyph(), c.x, c.y)?;
    }
    s.restore();
    Ok(())
}

/// Width under the bottom edge and height beside the left edge, in whole
/// centimeters, each with a reference line along the measured edge.
fn draw_dimensions<S: Surface + ?Sized>(s: &S, piece: &Furniture, config: &PlannerConfig) -> Result<(), JsValue> {
    let r = &piece.rect;
    let width_cm = config.px_to_cm(r.width).round();
    let height_cm = config.px_to_cm(r.height).round();
    let below = r.y + r.height + DIMENSION_GAP;
    let left = r.x - DIMENSION_GAP;

    s.save();
    s.set_stroke_style(DIMENSION_LINE);
    s.set_line_width(1.0);
    s.begin_path();
    s.move_to(r.x, below);
    s.line_to(r.x + r.width, below);
    s.move_to(left, r.y);
    s.line_to(left, r.y + r.height);
    s.stroke();

    s.set_fill_style(DIMENSION_TEXT);
    s.set_font(DIMENSION_FONT);
    s.set_text_baseline("top");
    s.set_text_align("center");
    s.fill_text(&format!("{width_cm:.0} cm"), r.x + r.width / 2.0, below + 2.0)?;
    s.set_text_baseline("middle");
    s.set_text_align("right");
    s.fill_text(&format!("{height_cm:.0} cm"), left - 4.0, r.y + r.height / 2.0)?;
    s.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Begin a new path tracing a rounded rectangle.
fn rounded_rect_path<S: Surface + ?Sized>(s: &S, x: f64, y: f64, w: f64, h: f64, radius: f64) -> Result<(), JsValue> {
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    s.begin_path();
    s.move_to(x + r, y);
    s.arc_to(x + w, y, x + w, y + h, r)?;
    s.arc_to(x + w, y + h, x, y + h, r)?;
    s.arc_to(x, y + h, x, y, r)?;
    s.arc_to(x, y, x + w, y, r)?;
    s.close_path();
    Ok(())
}
