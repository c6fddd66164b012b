use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::PlannerConfig;
use crate::consts::DEFAULT_CANVAS_SIZE;
use crate::error::PlannerError;
use crate::furniture::{ControlButton, Furniture};
use crate::geometry::Point;
use crate::hit::{Hit, hit_test};
use crate::input::{InteractionMode, Key, UiState};
use crate::render;
use crate::room::Room;
use crate::snapshot::{RoomSnapshot, TemplateItem};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A piece was selected; it now sits at this index (topmost).
    FurnitureSelected(usize),
    /// The piece at this index was removed.
    FurnitureDeleted(usize),
    /// Nothing is selected any more.
    SelectionCleared,
    /// The canvas cursor should change to this CSS value.
    SetCursor(&'static str),
}

/// Core planner state: everything that doesn't depend on the canvas element.
///
/// Separated from `Planner` so it can be tested without WASM/browser dependencies.
pub struct PlannerCore {
    pub room: Room,
    pub ui: UiState,
    pub mode: InteractionMode,
    pub canvas_width: f64,
    pub canvas_height: f64,
    last_pointer: Option<Point>,
    rng: StdRng,
}

impl Default for PlannerCore {
    fn default() -> Self {
        Self::new(PlannerConfig::default(), 0)
    }
}

impl PlannerCore {
    /// Create a core with the default room. `seed` drives furniture placement.
    #[must_use]
    pub fn new(config: PlannerConfig, seed: u64) -> Self {
        Self {
            room: Room::new(config),
            ui: UiState::default(),
            mode: InteractionMode::Idle,
            canvas_width: DEFAULT_CANVAS_SIZE.0,
            canvas_height: DEFAULT_CANVAS_SIZE.1,
            last_pointer: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        self.room.config()
    }

    // --- Pointer input ---

    /// Pointer pressed at `pt`.
    ///
    /// Hit priority: selected piece's controls, vertices, then furniture from
    /// the top down. Pressing empty space clears the selection.
    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        self.last_pointer = Some(pt);
        let button_size = self.config().control_button_size;
        let mut actions = Vec::new();

        match hit_test(pt, &self.room, self.ui.selected, button_size) {
            Some(Hit::Control { index, button: ControlButton::Delete }) => {
                self.mode = InteractionMode::Idle;
                if self.delete_furniture(index) {
                    actions.push(Action::FurnitureDeleted(index));
                    actions.push(Action::SelectionCleared);
                }
            }
            Some(Hit::Control { index, button }) => {
                if let Some(mode) = InteractionMode::for_control(button, index) {
                    self.mode = mode;
                }
            }
            Some(Hit::Vertex(i)) => {
                self.mode = InteractionMode::DraggingVertex(i);
            }
            Some(Hit::Furniture(i)) => {
                if let Some(top) = self.room.bring_furniture_to_top(i) {
                    log::debug!("planner: selected furniture {i} -> {top}");
                    self.ui.selected = Some(top);
                    self.mode = InteractionMode::DraggingFurniture(top);
                    actions.push(Action::FurnitureSelected(top));
                }
            }
            None => {
                self.mode = InteractionMode::Idle;
                if self.ui.selected.take().is_some() {
                    actions.push(Action::SelectionCleared);
                }
            }
        }

        if self.mode != InteractionMode::Idle {
            actions.push(Action::SetCursor(self.mode.cursor()));
        }
        actions
    }

    /// Pointer moved to `pt`. Applies the active gesture to the room and
    /// returns whether anything changed.
    pub fn on_pointer_move(&mut self, pt: Point) -> bool {
        let last = self.last_pointer.replace(pt).unwrap_or(pt);
        let (dx, dy) = (pt.x - last.x, pt.y - last.y);
        let config = *self.config();

        match self.mode {
            InteractionMode::Idle => false,
            InteractionMode::DraggingVertex(i) => self.room.drag_vertex(i, dx, dy),
            InteractionMode::DraggingFurniture(i) => self.room.furniture_mut(i).is_some_and(|f| {
                f.translate(dx, dy);
                true
            }),
            InteractionMode::Rotating(i) => self
                .room
                .furniture_mut(i)
                .is_some_and(|f| f.rotate_toward(pt, config.rotation_snap_deg)),
            InteractionMode::ResizingWidth(i) => self
                .room
                .furniture_mut(i)
                .is_some_and(|f| f.scale_width(dx, config.min_furniture_size)),
            InteractionMode::ResizingHeight(i) => self
                .room
                .furniture_mut(i)
                .is_some_and(|f| f.scale_height(dy, config.min_furniture_size)),
        }
    }

    /// Pointer released or left the canvas. Ends any gesture; the selection
    /// is kept.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if self.mode == InteractionMode::Idle {
            return Vec::new();
        }
        self.mode = InteractionMode::Idle;
        vec![Action::SetCursor(InteractionMode::Idle.cursor())]
    }

    // --- Keyboard input ---

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if key.is_delete() {
            return match self.delete_selected() {
                Some(index) => vec![Action::FurnitureDeleted(index), Action::SelectionCleared],
                None => Vec::new(),
            };
        }
        if key.is_escape() && self.ui.selected.take().is_some() {
            return vec![Action::SelectionCleared];
        }
        Vec::new()
    }

    // --- Editing API ---

    /// Add a piece of `kind` on top of the others. Returns its index.
    pub fn add_furniture(&mut self, kind: &str) -> usize {
        self.room.add_furniture(kind, &mut self.rng)
    }

    /// Remove the piece at `index`. Out-of-range indices are ignored.
    pub fn delete_furniture(&mut self, index: usize) -> bool {
        if self.room.delete_furniture(index).is_none() {
            return false;
        }
        self.ui.selected = match self.ui.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        if self.mode.furniture_index().is_some() {
            self.mode = InteractionMode::Idle;
        }
        true
    }

    /// Remove the selected piece, returning the index it occupied.
    pub fn delete_selected(&mut self) -> Option<usize> {
        let index = self.ui.selected?;
        self.delete_furniture(index).then_some(index)
    }

    /// Select the piece at `index`, bringing it to the top. Returns its new
    /// index.
    pub fn select_furniture(&mut self, index: usize) -> Option<usize> {
        let top = self.room.bring_furniture_to_top(index)?;
        self.ui.selected = Some(top);
        if self.mode.furniture_index().is_some() {
            self.mode = InteractionMode::Idle;
        }
        Some(top)
    }

    #[must_use]
    pub fn selected_furniture(&self) -> Option<usize> {
        self.ui.selected
    }

    /// Whether the selected piece's controls and dimensions are drawn.
    #[must_use]
    pub fn show_furniture_overlay(&self) -> bool {
        self.ui.selected.is_some()
    }

    /// Flip grid visibility. Returns the new state.
    pub fn toggle_grid(&mut self) -> bool {
        self.ui.show_grid = !self.ui.show_grid;
        self.ui.show_grid
    }

    pub fn add_room_vertex(&mut self) -> bool {
        self.room.add_vertex()
    }

    pub fn remove_room_vertex(&mut self) -> bool {
        if !self.room.remove_vertex() {
            return false;
        }
        if let InteractionMode::DraggingVertex(i) = self.mode {
            if i >= self.room.vertices().len() {
                self.mode = InteractionMode::Idle;
            }
        }
        true
    }

    /// Make the room a `width_cm` by `height_cm` rectangle centered where the
    /// current outline is centered.
    pub fn update_room_dimensions(&mut self, width_cm: f64, height_cm: f64) -> bool {
        let config = *self.config();
        let changed = self
            .room
            .set_rectangle(config.cm_to_px(width_cm), config.cm_to_px(height_cm));
        if changed {
            self.reset_vertex_gesture();
            log::debug!("planner: room resized to {width_cm} x {height_cm} cm");
        }
        changed
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    // --- Persistence ---

    /// Snapshot of the full editable state.
    #[must_use]
    pub fn save_room_state(&self) -> RoomSnapshot {
        RoomSnapshot::capture(&self.room, self.ui.show_grid, (self.canvas_width, self.canvas_height))
    }

    /// Restore from a snapshot. Each field group (furniture, vertices, grid)
    /// is applied only when present.
    pub fn load_room_state(&mut self, snapshot: &RoomSnapshot) {
        if let Some(records) = &snapshot.furniture {
            let pieces = records.iter().map(|r| r.to_furniture()).collect();
            self.replace_furniture(pieces);
        }
        if let Some(centers) = &snapshot.vertices {
            if self.room.set_vertex_centers(centers) {
                self.reset_vertex_gesture();
            }
        }
        if let Some(show_grid) = snapshot.show_grid {
            self.ui.show_grid = show_grid;
        }
        log::debug!(
            "planner: loaded state, furniture={} vertices={}",
            self.room.furniture().len(),
            self.room.vertices().len()
        );
    }

    /// Replace the furniture list with gallery template items.
    pub fn load_template(&mut self, items: &[TemplateItem]) {
        let pieces = items.iter().map(TemplateItem::to_furniture).collect();
        self.replace_furniture(pieces);
    }

    /// Snapshot as a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> Result<String, PlannerError> {
        Ok(self.save_room_state().to_json()?)
    }

    /// Restore from a JSON snapshot. `null` is a no-op; malformed groups are
    /// skipped and the rest still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not valid JSON text.
    pub fn import_json(&mut self, json: &str) -> Result<(), PlannerError> {
        if let Some(snapshot) = RoomSnapshot::from_json(json)? {
            self.load_room_state(&snapshot);
        }
        Ok(())
    }

    fn replace_furniture(&mut self, pieces: Vec<Furniture>) {
        self.room.replace_furniture(pieces);
        self.ui.selected = None;
        if self.mode.furniture_index().is_some() {
            self.mode = InteractionMode::Idle;
        }
    }

    fn reset_vertex_gesture(&mut self) {
        if matches!(self.mode, InteractionMode::DraggingVertex(_)) {
            self.mode = InteractionMode::Idle;
        }
    }
}

/// The full planner. Wraps `PlannerCore` and owns the browser canvas and its
/// 2D context.
pub struct Planner {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: PlannerCore,
}

impl Planner {
    /// Bind a planner to `canvas` and an already-acquired 2D context.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, core: PlannerCore) -> Self {
        Self { canvas, ctx, core }
    }

    /// Bind a planner to `canvas`, acquiring its 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::ContextUnavailable`] if the canvas has no 2D
    /// context to give.
    pub fn from_canvas(canvas: HtmlCanvasElement, core: PlannerCore) -> Result<Self, PlannerError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| PlannerError::js(&e))?
            .ok_or(PlannerError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlannerError::ContextUnavailable)?;
        Ok(Self::new(canvas, ctx, core))
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Resize the canvas backing store and record the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.core.set_canvas_size(f64::from(width), f64::from(height));
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        render::draw_scene(&self.ctx, &self.core.room, &self.core.ui, self.core.canvas_width, self.core.canvas_height)
    }
}
