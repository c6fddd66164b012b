//! Plain-data persistence formats.
//!
//! [`RoomSnapshot`] is the planner's own save format. Every top-level field
//! is optional on load, so a snapshot may carry only furniture, only
//! vertices, and so on. [`TemplateItem`] is the furniture format produced by
//! the template gallery.
//!
//! Loading is lenient: a field group with the wrong shape is logged and
//! dropped, and a furniture record that fails to decode is skipped, without
//! affecting the other groups.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::furniture::Furniture;
use crate::geometry::{Point, Rect};
use crate::room::Room;

/// Version written into new snapshots. Loading ignores it.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One piece of furniture as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub angle: f64,
    /// Informational; color is re-derived from `kind` on load.
    #[serde(default)]
    pub color: String,
}

impl From<&Furniture> for FurnitureRecord {
    fn from(piece: &Furniture) -> Self {
        Self {
            kind: piece.kind.clone(),
            x: piece.rect.x,
            y: piece.rect.y,
            width: piece.rect.width,
            height: piece.rect.height,
            angle: piece.angle,
            color: piece.color.to_owned(),
        }
    }
}

impl FurnitureRecord {
    #[must_use]
    pub fn to_furniture(&self) -> Furniture {
        Furniture::restore(self.kind.clone(), Rect::new(self.x, self.y, self.width, self.height), self.angle)
    }
}

/// Full editable state of a room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default)]
    pub furniture: Option<Vec<FurnitureRecord>>,
    /// Pieces per type label. Derived data; ignored on load.
    #[serde(default)]
    pub furniture_count: Option<BTreeMap<String, usize>>,
    /// Vertex centers (not hit-boxes), in polygon order.
    #[serde(default)]
    pub vertices: Option<Vec<Point>>,
    #[serde(default)]
    pub show_grid: Option<bool>,
    #[serde(default)]
    pub canvas_width: Option<f64>,
    #[serde(default)]
    pub canvas_height: Option<f64>,
}

impl RoomSnapshot {
    /// Capture everything needed to rebuild `room`.
    #[must_use]
    pub fn capture(room: &Room, show_grid: bool, canvas_size: (f64, f64)) -> Self {
        Self {
            version: Some(SNAPSHOT_VERSION),
            furniture: Some(room.furniture().iter().map(FurnitureRecord::from).collect()),
            furniture_count: Some(room.furniture_counts()),
            vertices: Some(room.vertex_centers()),
            show_grid: Some(show_grid),
            canvas_width: Some(canvas_size.0),
            canvas_height: Some(canvas_size.1),
        }
    }

    /// Parse a snapshot from JSON. A bare `null` or a non-object yields
    /// `None`; malformed groups inside an object come back as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error only if `json` is not valid JSON text.
    pub fn from_json(json: &str) -> Result<Option<Self>, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Decode each field group of `value` on its own.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = match value {
            Value::Object(fields) => fields,
            Value::Null => return None,
            _ => {
                log::warn!("snapshot: expected an object, nothing loaded");
                return None;
            }
        };
        Some(Self {
            version: group(fields, "version"),
            furniture: fields.get("furniture").and_then(|v| records(v, "furniture")),
            furniture_count: group(fields, "furnitureCount"),
            vertices: group(fields, "vertices"),
            show_grid: group(fields, "showGrid"),
            canvas_width: group(fields, "canvasWidth"),
            canvas_height: group(fields, "canvasHeight"),
        })
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A furniture entry from the template gallery.
///
/// `rotation` maps onto a piece's `angle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateItem {
    /// Gallery-side identifier; opaque to the planner.
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl TemplateItem {
    #[must_use]
    pub fn to_furniture(&self) -> Furniture {
        Furniture::restore(self.kind.clone(), Rect::new(self.x, self.y, self.width, self.height), self.rotation)
    }

    /// Parse a template furniture list. A bare `null` yields an empty list;
    /// items that fail to decode are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not an array, or if it is a non-empty
    /// array none of whose items decode.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        records(&value, "template")
            .ok_or_else(|| <serde_json::Error as serde::de::Error>::custom("expected an array of template items"))
    }
}

/// Decode `fields[key]`. Absent, `null`, or malformed all give `None`.
fn group<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.get(key)?;
    match Option::<T>::deserialize(value) {
        Ok(decoded) => decoded,
        Err(err) => {
            log::warn!("snapshot: ignoring malformed {key}: {err}");
            None
        }
    }
}

/// Decode an array record by record, skipping the ones that fail.
///
/// `None` when `value` is `null`, not an array, or a non-empty array with no
/// usable record.
fn records<T: DeserializeOwned>(value: &Value, key: &str) -> Option<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return None,
        _ => {
            log::warn!("snapshot: ignoring malformed {key}: expected an array");
            return None;
        }
    };
    let decoded: Vec<T> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("snapshot: skipping {key}[{index}]: {err}");
                None
            }
        })
        .collect();
    if decoded.is_empty() && !items.is_empty() {
        log::warn!("snapshot: ignoring {key}, no record decoded");
        return None;
    }
    Some(decoded)
}
