#![allow(clippy::float_cmp)]

use super::*;
use crate::geometry::Rect;
use crate::snapshot::FurnitureRecord;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Core with one 120 x 80 table at (400, 250), clear of every default vertex.
///
/// Control centers: delete (520, 250), rotate (520, 330), width (520, 290),
/// height (460, 250).
fn core_with_table() -> PlannerCore {
    let mut core = PlannerCore::default();
    core.room.push_furniture(Furniture::new("Table", pt(400.0, 250.0)));
    core
}

fn core_with_selected_table() -> PlannerCore {
    let mut core = core_with_table();
    core.on_pointer_down(pt(450.0, 280.0));
    core.on_pointer_up();
    core
}

fn table(core: &PlannerCore) -> Rect {
    core.room.furniture()[0].rect
}

fn has_action(actions: &[Action], want: &Action) -> bool {
    actions.iter().any(|a| a == want)
}

// =============================================================
// Construction and defaults
// =============================================================

#[test]
fn core_new_is_idle_without_selection() {
    let core = PlannerCore::default();
    assert_eq!(core.mode, InteractionMode::Idle);
    assert!(core.selected_furniture().is_none());
    assert!(!core.show_furniture_overlay());
    assert!(!core.ui.show_grid);
}

#[test]
fn core_new_has_default_outline() {
    let core = PlannerCore::default();
    assert_eq!(core.room.vertices().len(), 6);
    assert!(core.room.furniture().is_empty());
}

// =============================================================
// Pointer down: selection
// =============================================================

#[test]
fn pointer_down_on_furniture_selects_and_drags() {
    let mut core = core_with_table();
    let actions = core.on_pointer_down(pt(450.0, 280.0));
    assert_eq!(core.selected_furniture(), Some(0));
    assert!(core.show_furniture_overlay());
    assert_eq!(core.mode, InteractionMode::DraggingFurniture(0));
    assert!(has_action(&actions, &Action::FurnitureSelected(0)));
    assert!(has_action(&actions, &Action::SetCursor("grabbing")));
}

#[test]
fn pointer_down_brings_lower_piece_to_top() {
    let mut core = core_with_table();
    core.room.push_furniture(Furniture::new("Chair", pt(700.0, 200.0)));
    core.on_pointer_down(pt(450.0, 280.0));
    assert_eq!(core.room.furniture()[1].kind, "Table");
    assert_eq!(core.selected_furniture(), Some(1));
    assert_eq!(core.mode, InteractionMode::DraggingFurniture(1));
}

#[test]
fn pointer_down_hits_topmost_of_overlapping_pieces() {
    let mut core = core_with_table();
    core.room.push_furniture(Furniture::new("Chair", pt(430.0, 260.0)));
    core.on_pointer_down(pt(440.0, 270.0));
    assert_eq!(core.room.furniture()[1].kind, "Chair");
    assert_eq!(core.selected_furniture(), Some(1));
}

#[test]
fn pointer_down_on_empty_space_clears_selection() {
    let mut core = core_with_selected_table();
    let actions = core.on_pointer_down(pt(50.0, 50.0));
    assert!(core.selected_furniture().is_none());
    assert!(!core.show_furniture_overlay());
    assert_eq!(core.mode, InteractionMode::Idle);
    assert_eq!(actions, vec![Action::SelectionCleared]);
}

#[test]
fn pointer_down_on_empty_space_without_selection_is_quiet() {
    let mut core = core_with_table();
    assert!(core.on_pointer_down(pt(50.0, 50.0)).is_empty());
}

#[test]
fn vertex_beats_furniture() {
    let mut core = PlannerCore::default();
    core.room.push_furniture(Furniture::new("Table", pt(850.0, 350.0)));
    core.on_pointer_down(pt(900.0, 400.0));
    assert_eq!(core.mode, InteractionMode::DraggingVertex(2));
    assert!(core.selected_furniture().is_none());
}

#[test]
fn vertex_hit_keeps_existing_selection() {
    let mut core = core_with_selected_table();
    core.on_pointer_down(pt(200.0, 100.0));
    assert_eq!(core.mode, InteractionMode::DraggingVertex(0));
    assert_eq!(core.selected_furniture(), Some(0));
}

// =============================================================
// Pointer down: overlay controls
// =============================================================

#[test]
fn delete_button_removes_selected_piece() {
    let mut core = core_with_selected_table();
    let actions = core.on_pointer_down(pt(520.0, 250.0));
    assert!(core.room.furniture().is_empty());
    assert!(!core.show_furniture_overlay());
    assert_eq!(core.mode, InteractionMode::Idle);
    assert!(has_action(&actions, &Action::FurnitureDeleted(0)));
    assert!(has_action(&actions, &Action::SelectionCleared));
}

#[test]
fn delete_button_ignored_without_overlay() {
    let mut core = core_with_table();
    core.on_pointer_down(pt(520.0, 250.0));
    // Lands on the body edge instead: selects, does not delete.
    assert_eq!(core.room.furniture().len(), 1);
    assert_eq!(core.mode, InteractionMode::DraggingFurniture(0));
}

#[test]
fn rotate_button_enters_rotating() {
    let mut core = core_with_selected_table();
    core.on_pointer_down(pt(520.0, 330.0));
    assert_eq!(core.mode, InteractionMode::Rotating(0));
}

#[test]
fn width_button_enters_resizing_width() {
    let mut core = core_with_selected_table();
    core.on_pointer_down(pt(520.0, 290.0));
    assert_eq!(core.mode, InteractionMode::ResizingWidth(0));
}

#[test]
fn height_button_enters_resizing_height() {
    let mut core = core_with_selected_table();
    core.on_pointer_down(pt(460.0, 250.0));
    assert_eq!(core.mode, InteractionMode::ResizingHeight(0));
}

#[test]
fn controls_beat_vertices() {
    let mut core = PlannerCore::default();
    // Rotate button (bottom-right) lands on vertex 0 at (200, 100).
    core.room.push_furniture(Furniture::new("Table", pt(80.0, 20.0)));
    core.select_furniture(0);
    core.on_pointer_down(pt(200.0, 100.0));
    assert_eq!(core.mode, InteractionMode::Rotating(0));
}

// =============================================================
// Pointer move
// =============================================================

#[test]
fn drag_moves_furniture_by_delta() {
    let mut core = core_with_table();
    core.on_pointer_down(pt(450.0, 280.0));
    assert!(core.on_pointer_move(pt(460.0, 275.0)));
    assert!(core.on_pointer_move(pt(470.0, 285.0)));
    let r = table(&core);
    assert_eq!((r.x, r.y), (420.0, 255.0));
}

#[test]
fn move_without_gesture_changes_nothing() {
    let mut core = core_with_selected_table();
    assert!(!core.on_pointer_move(pt(600.0, 600.0)));
    let r = table(&core);
    assert_eq!((r.x, r.y), (400.0, 250.0));
}

#[test]
fn move_tracks_pointer_even_when_idle() {
    let mut core = core_with_table();
    core.on_pointer_move(pt(10.0, 10.0));
    core.on_pointer_move(pt(450.0, 280.0));
    core.on_pointer_down(pt(450.0, 280.0));
    core.on_pointer_move(pt(451.0, 281.0));
    let r = table(&core);
    assert_eq!((r.x, r.y), (401.0, 251.0));
}

#[test]
fn rotate_gesture_snaps() {
    let mut core = core_with_selected_table();
    core.on_pointer_down(pt(520.0, 330.0));
    // Center (460, 290); pointer straight right, 3 px low: ~92 deg -> 90.
    core.on_pointer_move(pt(560.0, 293.0));
    assert_eq!(core.room.furniture()[0].angle, 90.0);
    // Pointer down-right at 45 deg off the axis: 135 deg, no snap.
    core.on_pointer_move(pt(560.0, 390.0));
    assert!((core.room.furniture()[0].angle - 135.0).abs() < 1e-9);
}

#[test]
fn width_gesture_resizes_from_right() {
    let mut core = core_with_selected_table();
    core.on_pointer_down(pt(520.0, 290.0));
    core.on_pointer_move(pt(540.0, 300.0));
    let r = table(&core);
    assert_eq!((r.x, r.width, r.height), (400.0, 140.0, 80.0));
}

#[test]
fn width_gesture_respects_floor() {
    let mut core = core_with_selected_table();
    core.on_pointer_down(pt(520.0, 290.0));
    core.on_pointer_move(pt(400.0, 290.0)); // -120: rejected
    assert_eq!(table(&core).width, 120.0);
    core.on_pointer_move(pt(310.0, 290.0)); // -90 from the new position: 30 wide
    assert_eq!(table(&core).width, 30.0);
}

#[test]
fn height_gesture_resizes_from_top() {
    let mut core = core_with_selected_table();
    core.on_pointer_down(pt(460.0, 250.0));
    core.on_pointer_move(pt(470.0, 230.0));
    let r = table(&core);
    assert_eq!((r.y, r.height, r.width), (230.0, 100.0, 120.0));
}

#[test]
fn vertex_drag_moves_and_snaps() {
    let mut core = PlannerCore::default();
    // Vertex 3 at (600, 400); drag to (895, 404): x snaps to 900, y to 400.
    core.on_pointer_down(pt(600.0, 400.0));
    core.on_pointer_move(pt(895.0, 404.0));
    assert_eq!(core.room.vertex_centers()[3], pt(900.0, 400.0));
}

// =============================================================
// Pointer up
// =============================================================

#[test]
fn pointer_up_ends_gesture_but_keeps_selection() {
    let mut core = core_with_table();
    core.on_pointer_down(pt(450.0, 280.0));
    let actions = core.on_pointer_up();
    assert_eq!(core.mode, InteractionMode::Idle);
    assert_eq!(core.selected_furniture(), Some(0));
    assert_eq!(actions, vec![Action::SetCursor("default")]);
}

#[test]
fn pointer_up_when_idle_is_quiet() {
    let mut core = PlannerCore::default();
    assert!(core.on_pointer_up().is_empty());
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn delete_key_removes_selection() {
    let mut core = core_with_selected_table();
    let actions = core.on_key_down(&Key("Delete".into()));
    assert!(core.room.furniture().is_empty());
    assert_eq!(actions, vec![Action::FurnitureDeleted(0), Action::SelectionCleared]);
}

#[test]
fn delete_key_without_selection_is_noop() {
    let mut core = core_with_table();
    assert!(core.on_key_down(&Key("Backspace".into())).is_empty());
    assert_eq!(core.room.furniture().len(), 1);
}

#[test]
fn escape_clears_selection() {
    let mut core = core_with_selected_table();
    assert_eq!(core.on_key_down(&Key("Escape".into())), vec![Action::SelectionCleared]);
    assert!(core.selected_furniture().is_none());
    assert_eq!(core.room.furniture().len(), 1);
}

// =============================================================
// Editing API
// =============================================================

#[test]
fn add_furniture_uses_presets() {
    let mut core = PlannerCore::default();
    let sofa = core.add_furniture("Sofa");
    let hammock = core.add_furniture("Hammock");
    assert_eq!((sofa, hammock), (0, 1));
    let pieces = core.room.furniture();
    assert_eq!((pieces[0].rect.width, pieces[0].rect.height), (200.0, 80.0));
    assert_eq!((pieces[1].rect.width, pieces[1].rect.height), (100.0, 80.0));
}

#[test]
fn add_furniture_is_seeded() {
    let mut a = PlannerCore::new(PlannerConfig::default(), 9);
    let mut b = PlannerCore::new(PlannerConfig::default(), 9);
    a.add_furniture("Bed");
    b.add_furniture("Bed");
    assert_eq!(a.room.furniture()[0].rect, b.room.furniture()[0].rect);
}

#[test]
fn delete_furniture_shifts_selection() {
    let mut core = PlannerCore::default();
    core.add_furniture("Bed");
    core.add_furniture("Chair");
    core.add_furniture("Sofa");
    core.ui.selected = Some(2);
    assert!(core.delete_furniture(0));
    assert_eq!(core.selected_furniture(), Some(1));
    assert!(core.delete_furniture(1));
    assert!(core.selected_furniture().is_none());
    assert!(!core.delete_furniture(5));
}

#[test]
fn select_furniture_brings_to_top() {
    let mut core = PlannerCore::default();
    core.add_furniture("Bed");
    core.add_furniture("Chair");
    assert_eq!(core.select_furniture(0), Some(1));
    assert_eq!(core.room.furniture()[1].kind, "Bed");
    assert_eq!(core.select_furniture(7), None);
}

#[test]
fn toggle_grid_flips() {
    let mut core = PlannerCore::default();
    assert!(core.toggle_grid());
    assert!(!core.toggle_grid());
}

#[test]
fn room_vertex_api_respects_bounds() {
    let mut core = PlannerCore::default();
    for _ in 0..10 {
        core.add_room_vertex();
    }
    assert_eq!(core.room.vertices().len(), 10);
    for _ in 0..10 {
        core.remove_room_vertex();
    }
    assert_eq!(core.room.vertices().len(), 3);
}

#[test]
fn removing_dragged_vertex_ends_gesture() {
    let mut core = PlannerCore::default();
    core.on_pointer_down(pt(200.0, 600.0)); // vertex 5, the last one
    assert_eq!(core.mode, InteractionMode::DraggingVertex(5));
    assert!(core.remove_room_vertex());
    assert_eq!(core.mode, InteractionMode::Idle);
}

#[test]
fn update_room_dimensions_makes_centered_rectangle() {
    let mut core = PlannerCore::default();
    let before = crate::geometry::centroid(&core.room.vertex_centers()).unwrap_or_default();
    assert!(core.update_room_dimensions(254.0, 127.0)); // 400 x 200 px
    let centers = core.room.vertex_centers();
    assert_eq!(centers.len(), 4);
    let after = crate::geometry::centroid(&centers).unwrap_or_default();
    assert!((after.x - before.x).abs() < 1e-9);
    assert!((after.y - before.y).abs() < 1e-9);
    assert!((centers[1].x - centers[0].x - 400.0).abs() < 1e-9);
    assert!((centers[2].y - centers[1].y - 200.0).abs() < 1e-9);
}

#[test]
fn update_room_dimensions_rejects_invalid() {
    let mut core = PlannerCore::default();
    assert!(!core.update_room_dimensions(-1.0, 100.0));
    assert_eq!(core.room.vertices().len(), 6);
}

// =============================================================
// Persistence
// =============================================================

#[test]
fn save_load_round_trip() {
    let mut core = PlannerCore::default();
    core.add_furniture("Bed");
    core.add_furniture("Lamp");
    if let Some(bed) = core.room.furniture_mut(0) {
        bed.angle = 90.0;
    }
    core.room.drag_vertex(0, -50.0, 0.0);
    core.toggle_grid();
    let saved = core.save_room_state();

    let mut other = PlannerCore::new(PlannerConfig::default(), 77);
    other.load_room_state(&saved);
    assert_eq!(other.room.furniture(), core.room.furniture());
    assert_eq!(other.room.vertex_centers(), core.room.vertex_centers());
    assert!(other.ui.show_grid);
}

#[test]
fn json_round_trip() {
    let mut core = PlannerCore::default();
    core.add_furniture("Desk");
    let json = core.export_json().unwrap_or_default();

    let mut other = PlannerCore::default();
    assert!(other.import_json(&json).is_ok());
    assert_eq!(other.room.furniture(), core.room.furniture());
}

#[test]
fn partial_load_keeps_vertices_and_grid() {
    let mut core = PlannerCore::default();
    core.toggle_grid();
    core.room.drag_vertex(1, 0.0, 33.0);
    let vertices = core.room.vertex_centers();

    let snapshot = RoomSnapshot {
        furniture: Some(vec![FurnitureRecord {
            kind: "Rug".into(),
            x: 1.0,
            y: 2.0,
            width: 30.0,
            height: 40.0,
            angle: 0.0,
            color: String::new(),
        }]),
        ..RoomSnapshot::default()
    };
    core.load_room_state(&snapshot);
    assert_eq!(core.room.furniture().len(), 1);
    assert_eq!(core.room.vertex_centers(), vertices);
    assert!(core.ui.show_grid);
}

#[test]
fn vertices_only_load_keeps_furniture() {
    let mut core = core_with_selected_table();
    let snapshot = RoomSnapshot {
        vertices: Some(vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)]),
        ..RoomSnapshot::default()
    };
    core.load_room_state(&snapshot);
    assert_eq!(core.room.vertices().len(), 3);
    assert_eq!(core.room.furniture().len(), 1);
    assert_eq!(core.selected_furniture(), Some(0));
}

#[test]
fn loading_furniture_clears_selection() {
    let mut core = core_with_selected_table();
    core.load_room_state(&RoomSnapshot { furniture: Some(Vec::new()), ..RoomSnapshot::default() });
    assert!(core.room.furniture().is_empty());
    assert!(core.selected_furniture().is_none());
}

#[test]
fn import_null_is_noop() {
    let mut core = core_with_table();
    assert!(core.import_json("null").is_ok());
    assert_eq!(core.room.furniture().len(), 1);
    assert_eq!(core.room.vertices().len(), 6);
}

#[test]
fn import_garbage_is_error_and_noop() {
    let mut core = core_with_table();
    assert!(matches!(core.import_json("{"), Err(PlannerError::Data(_))));
    assert_eq!(core.room.furniture().len(), 1);
}

#[test]
fn import_with_bad_ignored_field_still_loads_furniture() {
    let mut core = core_with_table();
    let json = r#"{"furniture": [{"type": "Chair", "x": 100, "y": 120, "width": 50, "height": 50}], "canvasWidth": "1200"}"#;
    assert!(core.import_json(json).is_ok());
    assert_eq!(core.room.furniture().len(), 1);
    assert_eq!(core.room.furniture()[0].kind, "Chair");
}

#[test]
fn import_skips_incomplete_record_and_applies_other_groups() {
    let mut core = core_with_table();
    let json = r#"{
        "furniture": [{"type": "Sofa", "x": 10, "y": 20}, {"type": "Bed", "x": 300, "y": 200, "width": 150, "height": 190}],
        "vertices": [{"x": 0, "y": 0}, {"x": 300, "y": 0}, {"x": 300, "y": 200}, {"x": 0, "y": 200}],
        "showGrid": true
    }"#;
    assert!(core.import_json(json).is_ok());
    let kinds: Vec<&str> = core.room.furniture().iter().map(|f| f.kind.as_str()).collect();
    assert_eq!(kinds, vec!["Bed"]);
    assert_eq!(core.room.vertices().len(), 4);
    assert!(core.ui.show_grid);
}

#[test]
fn import_malformed_group_keeps_current_state_for_that_group() {
    let mut core = core_with_table();
    let before = core.room.vertex_centers();
    let json = r#"{"furniture": "lots", "vertices": [{"x": 0}], "showGrid": true}"#;
    assert!(core.import_json(json).is_ok());
    assert_eq!(core.room.furniture().len(), 1);
    assert_eq!(core.room.vertex_centers(), before);
    assert!(core.ui.show_grid);
}

#[test]
fn import_non_object_is_noop() {
    let mut core = core_with_table();
    assert!(core.import_json("42").is_ok());
    assert_eq!(core.room.furniture().len(), 1);
}

#[test]
fn room_dimensions_apply_with_high_vertex_floor() {
    let config = PlannerConfig::from_json(r#"{"minVertices": 5}"#).unwrap_or_default();
    let mut core = PlannerCore::new(config, 7);
    assert!(core.update_room_dimensions(300.0, 200.0));
    assert_eq!(core.room.vertices().len(), 4);
}

#[test]
fn default_outline_fits_low_vertex_cap() {
    let config = PlannerConfig::from_json(r#"{"maxVertices": 4}"#).unwrap_or_default();
    let core = PlannerCore::new(config, 7);
    assert!(core.room.vertices().len() <= core.config().max_vertices);
}

#[test]
fn load_template_replaces_furniture() {
    let mut core = core_with_selected_table();
    let items = TemplateItem::list_from_json(
        r#"[{"id": 1, "type": "Bed", "x": 300, "y": 200, "width": 150, "height": 190, "rotation": 0},
            {"id": 2, "type": "Nightstand", "x": 460, "y": 200, "width": 40, "height": 40, "rotation": 180}]"#,
    )
    .unwrap_or_default();
    core.load_template(&items);
    let pieces = core.room.furniture();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].rect, Rect::new(300.0, 200.0, 150.0, 190.0));
    assert_eq!(pieces[1].angle, 180.0);
    assert!(core.selected_furniture().is_none());

    let saved = core.save_room_state();
    let kinds: Vec<String> = saved
        .furniture
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.kind)
        .collect();
    assert_eq!(kinds, vec!["Bed".to_owned(), "Nightstand".to_owned()]);
}

#[test]
fn save_records_canvas_size() {
    let mut core = PlannerCore::default();
    core.set_canvas_size(640.0, 480.0);
    let saved = core.save_room_state();
    assert_eq!((saved.canvas_width, saved.canvas_height), (Some(640.0), Some(480.0)));
}
