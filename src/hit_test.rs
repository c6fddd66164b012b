use super::*;
use crate::furniture::Furniture;
use crate::geometry::Point;

const BUTTON: f64 = 20.0;

fn room_with_pieces(origins: &[(f64, f64)]) -> Room {
    let mut room = Room::default();
    for &(x, y) in origins {
        room.push_furniture(Furniture::new("Table", Point::new(x, y)));
    }
    room
}

#[test]
fn empty_space_is_none() {
    let room = room_with_pieces(&[]);
    assert_eq!(hit_test(Point::new(5.0, 5.0), &room, None, BUTTON), None);
}

#[test]
fn vertex_hit() {
    let room = room_with_pieces(&[]);
    assert_eq!(hit_test(Point::new(203.0, 97.0), &room, None, BUTTON), Some(Hit::Vertex(0)));
}

#[test]
fn topmost_furniture_wins() {
    let room = room_with_pieces(&[(400.0, 250.0), (450.0, 280.0)]);
    assert_eq!(hit_test(Point::new(460.0, 290.0), &room, None, BUTTON), Some(Hit::Furniture(1)));
    assert_eq!(hit_test(Point::new(410.0, 260.0), &room, None, BUTTON), Some(Hit::Furniture(0)));
}

#[test]
fn vertex_beats_furniture() {
    // Table covering vertex 2 at (900, 400).
    let room = room_with_pieces(&[(850.0, 350.0)]);
    assert_eq!(hit_test(Point::new(900.0, 400.0), &room, None, BUTTON), Some(Hit::Vertex(2)));
}

#[test]
fn controls_only_for_selected_piece() {
    let room = room_with_pieces(&[(400.0, 250.0)]);
    // Delete button center: top-right corner (520, 250).
    let pt = Point::new(520.0, 250.0);
    assert_eq!(
        hit_test(pt, &room, Some(0), BUTTON),
        Some(Hit::Control { index: 0, button: ControlButton::Delete })
    );
    assert_eq!(hit_test(pt, &room, None, BUTTON), Some(Hit::Furniture(0)));
}

#[test]
fn controls_beat_vertices() {
    // Piece whose rotate button (bottom-right) sits on vertex 0 at (200, 100).
    let room = room_with_pieces(&[(80.0, 20.0)]);
    assert_eq!(
        hit_test(Point::new(200.0, 100.0), &room, Some(0), BUTTON),
        Some(Hit::Control { index: 0, button: ControlButton::Rotate })
    );
}

#[test]
fn stale_selection_is_ignored() {
    let room = room_with_pieces(&[]);
    assert_eq!(hit_test(Point::new(5.0, 5.0), &room, Some(3), BUTTON), None);
}
