use super::*;

#[test]
fn key_delete_variants() {
    assert!(Key("Delete".into()).is_delete());
    assert!(Key("Backspace".into()).is_delete());
    assert!(!Key("d".into()).is_delete());
}

#[test]
fn key_escape() {
    assert!(Key("Escape".into()).is_escape());
    assert!(!Key("Esc".into()).is_escape());
}

#[test]
fn ui_state_default() {
    let ui = UiState::default();
    assert!(ui.selected.is_none());
    assert!(!ui.show_grid);
}

#[test]
fn mode_default_is_idle() {
    assert_eq!(InteractionMode::default(), InteractionMode::Idle);
}

#[test]
fn for_control_maps_held_buttons() {
    assert_eq!(InteractionMode::for_control(ControlButton::Rotate, 2), Some(InteractionMode::Rotating(2)));
    assert_eq!(
        InteractionMode::for_control(ControlButton::ResizeWidth, 0),
        Some(InteractionMode::ResizingWidth(0))
    );
    assert_eq!(
        InteractionMode::for_control(ControlButton::ResizeHeight, 1),
        Some(InteractionMode::ResizingHeight(1))
    );
    assert_eq!(InteractionMode::for_control(ControlButton::Delete, 1), None);
}

#[test]
fn furniture_index_per_mode() {
    assert_eq!(InteractionMode::Idle.furniture_index(), None);
    assert_eq!(InteractionMode::DraggingVertex(3).furniture_index(), None);
    assert_eq!(InteractionMode::DraggingFurniture(3).furniture_index(), Some(3));
    assert_eq!(InteractionMode::Rotating(1).furniture_index(), Some(1));
}

#[test]
fn cursor_per_mode() {
    assert_eq!(InteractionMode::Idle.cursor(), "default");
    assert_eq!(InteractionMode::DraggingFurniture(0).cursor(), "grabbing");
    assert_eq!(InteractionMode::ResizingWidth(0).cursor(), "ew-resize");
}
