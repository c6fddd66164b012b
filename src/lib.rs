//! Interactive 2D room-layout editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It draws a
//! polygonal room outline and rectangular furniture on a canvas and lets the
//! user edit them directly: drag vertices (with axis snapping), move, rotate
//! (with cardinal snapping), resize, and delete furniture. The host page
//! creates a [`web::RoomPlanner`] on a `<canvas>` and uses its methods to add
//! furniture, reshape the room, and save or load the layout as plain data.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Planner controller and testable [`engine::PlannerCore`] |
//! | [`web`] | `#[wasm_bindgen]` handle, DOM listeners, frame loop |
//! | [`room`] | Wall polygon plus z-ordered furniture |
//! | [`furniture`] | Furniture presets, control buttons, move/rotate/resize |
//! | [`vertex`] | Draggable wall corners |
//! | [`geometry`] | Points, rectangles, polygon helpers |
//! | [`hit`] | Hit-testing in priority order |
//! | [`input`] | Keys, UI flags, and the gesture state machine |
//! | [`render`] | Scene rendering through the [`render::Surface`] trait |
//! | [`snapshot`] | Save/load and template data formats |
//! | [`config`] | Tunable thresholds and unit scale |
//! | [`error`] | Boundary errors |
//! | [`consts`] | Default values behind the config |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod furniture;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod room;
pub mod snapshot;
pub mod vertex;
pub mod web;
