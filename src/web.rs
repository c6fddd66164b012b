//! Browser host for the planner.
//!
//! [`RoomPlanner`] is the handle JavaScript holds. It owns a [`Planner`], the
//! DOM listeners that feed it pointer, touch, key and resize events, and the
//! animation-frame loop that redraws it. Dropping the handle (or calling
//! `destroy`) cancels the loop and removes every listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::{Date, JSON};
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

use crate::config::PlannerConfig;
use crate::consts::DEFAULT_CANVAS_SIZE;
use crate::engine::{Action, Planner, PlannerCore};
use crate::error::PlannerError;
use crate::furniture::PRESETS;
use crate::geometry::Point;
use crate::input::Key;
use crate::snapshot::TemplateItem;

type Shared = Rc<RefCell<Planner>>;
type FrameCallback = Closure<dyn FnMut(f64)>;

/// Install the console logger at `level` ("error" through "trace"; anything
/// else means "info") and route panics to the devtools console.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    console_error_panic_hook::set_once();
    let level = level.parse::<log::Level>().unwrap_or(log::Level::Info);
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("web: logger already installed: {err}");
    }
}

/// Labels of the furniture types with a built-in size and color.
#[wasm_bindgen(js_name = furnitureTypes)]
#[must_use]
pub fn furniture_types() -> Vec<String> {
    PRESETS.iter().map(|p| p.label.to_owned()).collect()
}

// =============================================================
// Handle
// =============================================================

#[wasm_bindgen]
pub struct RoomPlanner {
    planner: Shared,
    listeners: Vec<Listener>,
    frames: Option<FrameLoop>,
}

#[wasm_bindgen]
impl RoomPlanner {
    /// Bind a planner with default settings to `canvas` and start drawing.
    ///
    /// # Errors
    ///
    /// Fails if the canvas has no 2D context or a listener cannot be
    /// registered.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<RoomPlanner, JsValue> {
        Self::with_config(canvas, &JsValue::UNDEFINED)
    }

    /// Like the constructor, with a (possibly partial) config object.
    ///
    /// # Errors
    ///
    /// Fails if `config` is not a config object, or for the same reasons as
    /// the constructor.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(canvas: HtmlCanvasElement, config: &JsValue) -> Result<RoomPlanner, JsValue> {
        let config = match stringify(config)? {
            Some(json) => PlannerConfig::from_json(&json).map_err(PlannerError::from)?,
            None => PlannerConfig::default(),
        };
        let core = PlannerCore::new(config, Date::now().to_bits());
        let mut planner = Planner::from_canvas(canvas, core)?;
        fit_canvas(&mut planner);

        let planner: Shared = Rc::new(RefCell::new(planner));
        let listeners = attach_listeners(&planner)?;
        let frames = FrameLoop::start(Rc::clone(&planner))?;
        log::info!("web: room planner ready");
        Ok(Self { planner, listeners, frames: Some(frames) })
    }

    /// Stop drawing and detach every listener. The handle stays usable for
    /// queries and saves.
    pub fn destroy(&mut self) {
        self.frames = None;
        self.listeners.clear();
        log::debug!("web: room planner destroyed");
    }

    #[wasm_bindgen(js_name = addFurniture)]
    pub fn add_furniture(&self, kind: &str) -> usize {
        self.planner.borrow_mut().core.add_furniture(kind)
    }

    #[wasm_bindgen(js_name = deleteFurniture)]
    pub fn delete_furniture(&self, index: usize) -> bool {
        self.planner.borrow_mut().core.delete_furniture(index)
    }

    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&self) -> Option<usize> {
        self.planner.borrow_mut().core.delete_selected()
    }

    #[wasm_bindgen(js_name = selectFurniture)]
    pub fn select_furniture(&self, index: usize) -> Option<usize> {
        self.planner.borrow_mut().core.select_furniture(index)
    }

    #[wasm_bindgen(js_name = selectedFurniture)]
    pub fn selected_furniture(&self) -> Option<usize> {
        self.planner.borrow().core.selected_furniture()
    }

    #[wasm_bindgen(js_name = toggleGrid)]
    pub fn toggle_grid(&self) -> bool {
        self.planner.borrow_mut().core.toggle_grid()
    }

    #[wasm_bindgen(js_name = addRoomVertex)]
    pub fn add_room_vertex(&self) -> bool {
        self.planner.borrow_mut().core.add_room_vertex()
    }

    #[wasm_bindgen(js_name = removeRoomVertex)]
    pub fn remove_room_vertex(&self) -> bool {
        self.planner.borrow_mut().core.remove_room_vertex()
    }

    #[wasm_bindgen(js_name = updateRoomDimensions)]
    pub fn update_room_dimensions(&self, width_cm: f64, height_cm: f64) -> bool {
        self.planner.borrow_mut().core.update_room_dimensions(width_cm, height_cm)
    }

    /// Floor area in square metres.
    #[wasm_bindgen(js_name = roomArea)]
    pub fn room_area(&self) -> f64 {
        self.planner.borrow().core.room.area_m2()
    }

    /// Wall lengths in centimetres, one per edge starting at the first vertex.
    #[wasm_bindgen(js_name = wallLengths)]
    pub fn wall_lengths(&self) -> Vec<f64> {
        self.planner.borrow().core.room.wall_lengths_cm()
    }

    /// Re-fit the canvas to its container.
    pub fn resize(&self) {
        fit_canvas(&mut self.planner.borrow_mut());
    }

    /// Full editable state as a plain object.
    ///
    /// # Errors
    ///
    /// Fails only if the snapshot cannot be encoded.
    #[wasm_bindgen(js_name = saveRoomState)]
    pub fn save_room_state(&self) -> Result<JsValue, JsValue> {
        let json = self.planner.borrow().core.export_json()?;
        JSON::parse(&json)
    }

    /// Restore from an object produced by `saveRoomState`. `null` and
    /// `undefined` leave the planner untouched, as do absent or malformed
    /// fields.
    ///
    /// # Errors
    ///
    /// Fails only if `state` cannot be serialized to JSON.
    #[wasm_bindgen(js_name = loadRoomState)]
    pub fn load_room_state(&self, state: &JsValue) -> Result<(), JsValue> {
        let Some(json) = stringify(state)? else {
            return Ok(());
        };
        self.planner.borrow_mut().core.import_json(&json)?;
        Ok(())
    }

    /// Replace the furniture with a gallery template: an array of
    /// `{id, type, x, y, width, height, rotation}`.
    ///
    /// # Errors
    ///
    /// Fails if `items` is not such an array.
    #[wasm_bindgen(js_name = loadTemplate)]
    pub fn load_template(&self, items: &JsValue) -> Result<(), JsValue> {
        let Some(json) = stringify(items)? else {
            return Ok(());
        };
        self.load_template_json(&json)
    }

    /// Load a template array stored as JSON under `key` in `localStorage`.
    /// Returns whether one was found.
    ///
    /// # Errors
    ///
    /// Fails if storage is unreachable or the stored value is malformed.
    #[wasm_bindgen(js_name = loadTemplateFromStorage)]
    pub fn load_template_from_storage(&self, key: &str) -> Result<bool, JsValue> {
        let Some(storage) = web_sys::window().map(|w| w.local_storage()).transpose()?.flatten() else {
            log::warn!("web: localStorage unavailable");
            return Ok(false);
        };
        let Some(json) = storage.get_item(key)? else {
            return Ok(false);
        };
        self.load_template_json(&json)?;
        Ok(true)
    }
}

impl RoomPlanner {
    fn load_template_json(&self, json: &str) -> Result<(), JsValue> {
        let items = TemplateItem::list_from_json(json).map_err(PlannerError::from)?;
        log::debug!("web: loading template with {} items", items.len());
        self.planner.borrow_mut().core.load_template(&items);
        Ok(())
    }
}

/// JSON text of `value`, or `None` for `null`/`undefined`.
fn stringify(value: &JsValue) -> Result<Option<String>, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    Ok(Some(String::from(JSON::stringify(value)?)))
}

// =============================================================
// Canvas sizing
// =============================================================

fn fit_canvas(planner: &mut Planner) {
    let (width, height) = host_size(planner.canvas());
    planner.resize(width, height);
}

/// Parent element's client size, else the window's inner size, else the
/// default canvas size.
fn host_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    if let Some(parent) = canvas.parent_element() {
        let (w, h) = (parent.client_width(), parent.client_height());
        if w > 0 && h > 0 {
            return (w.unsigned_abs(), h.unsigned_abs());
        }
    }
    let inner = web_sys::window().and_then(|window| match (window.inner_width(), window.inner_height()) {
        (Ok(w), Ok(h)) => w.as_f64().zip(h.as_f64()),
        _ => None,
    });
    let (w, h) = inner.unwrap_or(DEFAULT_CANVAS_SIZE);
    (to_pixels(w), to_pixels(h))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(css: f64) -> u32 {
    css.max(0.0).round() as u32
}

// =============================================================
// Event wiring
// =============================================================

/// A DOM listener that unregisters itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        event: &'static str,
        options: Option<&AddEventListenerOptions>,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let function: &js_sys::Function = callback.as_ref().unchecked_ref();
        match options {
            Some(options) => {
                target.add_event_listener_with_callback_and_add_event_listener_options(event, function, options)?;
            }
            None => target.add_event_listener_with_callback(event, function)?,
        }
        Ok(Self { target, event, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("web: failed to remove {} listener: {err:?}", self.event);
        }
    }
}

fn attach_listeners(planner: &Shared) -> Result<Vec<Listener>, JsValue> {
    let canvas = planner.borrow().canvas().clone();
    canvas.set_attribute("tabindex", "0")?;
    let target: EventTarget = canvas.into();
    let mut listeners = Vec::new();

    let p = Rc::clone(planner);
    listeners.push(Listener::attach(target.clone(), "mousedown", None, move |event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            pointer_down(&p, event.client_x(), event.client_y());
        }
    })?);

    let p = Rc::clone(planner);
    listeners.push(Listener::attach(target.clone(), "mousemove", None, move |event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            pointer_move(&p, event.client_x(), event.client_y());
        }
    })?);

    for name in ["mouseup", "mouseleave"] {
        let p = Rc::clone(planner);
        listeners.push(Listener::attach(target.clone(), name, None, move |_event| pointer_up(&p))?);
    }

    // Non-passive so preventDefault can stop page scroll and pinch-zoom.
    let touch_options = AddEventListenerOptions::new();
    touch_options.set_passive(false);

    let p = Rc::clone(planner);
    listeners.push(Listener::attach(target.clone(), "touchstart", Some(&touch_options), move |event| {
        event.prevent_default();
        if let Some((x, y)) = first_touch(&event) {
            pointer_down(&p, x, y);
        }
    })?);

    let p = Rc::clone(planner);
    listeners.push(Listener::attach(target.clone(), "touchmove", Some(&touch_options), move |event| {
        event.prevent_default();
        if let Some((x, y)) = first_touch(&event) {
            pointer_move(&p, x, y);
        }
    })?);

    for name in ["touchend", "touchcancel"] {
        let p = Rc::clone(planner);
        listeners.push(Listener::attach(target.clone(), name, Some(&touch_options), move |event| {
            event.prevent_default();
            pointer_up(&p);
        })?);
    }

    let p = Rc::clone(planner);
    listeners.push(Listener::attach(target, "keydown", None, move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let mut planner = p.borrow_mut();
        let actions = planner.core.on_key_down(&Key(event.key()));
        if !actions.is_empty() {
            event.prevent_default();
        }
        apply_actions(planner.canvas(), &actions);
    })?);

    if let Some(window) = web_sys::window() {
        let p = Rc::clone(planner);
        listeners.push(Listener::attach(window.into(), "resize", None, move |_event| {
            fit_canvas(&mut p.borrow_mut());
        })?);
    }

    Ok(listeners)
}

fn first_touch(event: &Event) -> Option<(i32, i32)> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some((touch.client_x(), touch.client_y()))
}

/// Client coordinates to canvas coordinates.
fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
    let bounds = canvas.get_bounding_client_rect();
    Point::new(f64::from(client_x) - bounds.left(), f64::from(client_y) - bounds.top())
}

fn pointer_down(planner: &Shared, client_x: i32, client_y: i32) {
    let mut planner = planner.borrow_mut();
    let pt = canvas_point(planner.canvas(), client_x, client_y);
    let actions = planner.core.on_pointer_down(pt);
    apply_actions(planner.canvas(), &actions);
}

fn pointer_move(planner: &Shared, client_x: i32, client_y: i32) {
    let mut planner = planner.borrow_mut();
    let pt = canvas_point(planner.canvas(), client_x, client_y);
    planner.core.on_pointer_move(pt);
}

fn pointer_up(planner: &Shared) {
    let mut planner = planner.borrow_mut();
    let actions = planner.core.on_pointer_up();
    apply_actions(planner.canvas(), &actions);
}

fn apply_actions(canvas: &HtmlCanvasElement, actions: &[Action]) {
    for action in actions {
        match action {
            Action::SetCursor(cursor) => {
                if let Err(err) = canvas.style().set_property("cursor", cursor) {
                    log::warn!("web: failed to set cursor: {err:?}");
                }
            }
            Action::FurnitureSelected(index) => log::debug!("web: furniture {index} selected"),
            Action::FurnitureDeleted(index) => log::debug!("web: furniture {index} deleted"),
            Action::SelectionCleared => log::debug!("web: selection cleared"),
        }
    }
}

// =============================================================
// Frame loop
// =============================================================

/// Redraws the planner on every animation frame until dropped.
struct FrameLoop {
    callback: Rc<RefCell<Option<FrameCallback>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn start(planner: Shared) -> Result<Self, JsValue> {
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        // The closure reschedules itself through a weak handle so dropping
        // the loop frees it.
        let weak = Rc::downgrade(&callback);
        let pending_for_cb = Rc::clone(&pending);
        let cb = Closure::wrap(Box::new(move |_ts: f64| {
            pending_for_cb.set(None);
            if let Err(err) = planner.borrow().render() {
                log::warn!("web: frame failed: {err:?}");
            }
            let Some(callback) = weak.upgrade() else {
                return;
            };
            match request_frame(&callback) {
                Ok(id) => pending_for_cb.set(Some(id)),
                Err(err) => log::warn!("web: frame loop stopped: {err:?}"),
            }
        }) as Box<dyn FnMut(f64)>);
        *callback.borrow_mut() = Some(cb);

        pending.set(Some(request_frame(&callback)?));
        Ok(Self { callback, pending })
    }
}

fn request_frame(callback: &RefCell<Option<FrameCallback>>) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| PlannerError::Js("no window".into()))?;
    let callback = callback.borrow();
    let cb = callback
        .as_ref()
        .ok_or_else(|| PlannerError::Js("frame callback released".into()))?;
    window.request_animation_frame(cb.as_ref().unchecked_ref())
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
            if let Err(err) = window.cancel_animation_frame(id) {
                log::warn!("web: failed to cancel frame: {err:?}");
            }
        }
        self.callback.borrow_mut().take();
    }
}
