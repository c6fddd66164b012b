#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_matches_consts() {
    let config = PlannerConfig::default();
    assert_eq!(config.vertex_snap_px, 10.0);
    assert_eq!(config.rotation_snap_deg, 10.0);
    assert_eq!(config.min_furniture_size, 15.0);
    assert_eq!(config.min_vertices, 3);
    assert_eq!(config.max_vertices, 10);
}

#[test]
fn pixels_per_cm_derives_from_inches() {
    let config = PlannerConfig::default();
    assert!((config.pixels_per_cm() - 4.0 / 2.54).abs() < 1e-12);
}

#[test]
fn px_cm_conversions_are_inverse() {
    let config = PlannerConfig::default();
    let cm = config.px_to_cm(123.0);
    assert!((config.cm_to_px(cm) - 123.0).abs() < 1e-9);
}

#[test]
fn from_json_partial_keeps_defaults() {
    let config = PlannerConfig::from_json(r#"{"vertexSnapPx": 4}"#).unwrap_or_default();
    assert_eq!(config.vertex_snap_px, 4.0);
    assert_eq!(config.min_furniture_size, 15.0);
    assert_eq!(config.spawn_region, SpawnRegion::default());
}

#[test]
fn from_json_rejects_garbage() {
    assert!(PlannerConfig::from_json("not json").is_err());
}

#[test]
fn sanitize_repairs_bad_values() {
    let mut config = PlannerConfig {
        pixels_per_inch: 0.0,
        grid_spacing_px: f64::NAN,
        min_vertices: 1,
        max_vertices: 2,
        ..PlannerConfig::default()
    };
    config.sanitize();
    assert_eq!(config.pixels_per_inch, 4.0);
    assert_eq!(config.grid_spacing_px, 20.0);
    assert_eq!(config.min_vertices, 3);
    assert_eq!(config.max_vertices, 6);
}

#[test]
fn sanitize_bounds_vertex_limits() {
    let config = PlannerConfig::from_json(r#"{"minVertices": 5, "maxVertices": 4}"#).unwrap_or_default();
    assert_eq!(config.min_vertices, 4);
    assert_eq!(config.max_vertices, 6);
    let config = PlannerConfig::from_json(r#"{"minVertices": 4, "maxVertices": 8}"#).unwrap_or_default();
    assert_eq!(config.min_vertices, 4);
    assert_eq!(config.max_vertices, 8);
}

#[test]
fn sanitize_repairs_negative_lengths() {
    let config = PlannerConfig::from_json(
        r#"{"vertexSnapPx": -1, "minFurnitureSize": -5, "controlButtonSize": 0, "vertexRadius": -8, "rotationSnapDeg": -10}"#,
    )
    .unwrap_or_default();
    assert_eq!(config.vertex_snap_px, 10.0);
    assert_eq!(config.min_furniture_size, 15.0);
    assert_eq!(config.control_button_size, 20.0);
    assert_eq!(config.vertex_radius, 8.0);
    assert_eq!(config.rotation_snap_deg, 10.0);
}

#[test]
fn sanitize_keeps_zero_snap() {
    let config = PlannerConfig::from_json(r#"{"vertexSnapPx": 0, "rotationSnapDeg": 0}"#).unwrap_or_default();
    assert_eq!(config.vertex_snap_px, 0.0);
    assert_eq!(config.rotation_snap_deg, 0.0);
}

#[test]
fn sanitize_enforces_minimum_grid_spacing() {
    let config = PlannerConfig::from_json(r#"{"gridSpacingPx": 1e-9}"#).unwrap_or_default();
    assert_eq!(config.grid_spacing_px, 20.0);
    let config = PlannerConfig::from_json(r#"{"gridSpacingPx": 2}"#).unwrap_or_default();
    assert_eq!(config.grid_spacing_px, 2.0);
}

#[test]
fn sanitize_repairs_non_finite_spawn_region() {
    let mut config = PlannerConfig {
        spawn_region: SpawnRegion { min_x: f64::NAN, ..SpawnRegion::default() },
        ..PlannerConfig::default()
    };
    config.sanitize();
    assert_eq!(config.spawn_region, SpawnRegion::default());
}
