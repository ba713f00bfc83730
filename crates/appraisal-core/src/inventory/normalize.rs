//! Normalization of raw inventory documents.
//!
//! Saved documents arrive as loosely-typed JSON: arrays may be missing, ids
//! absent, numeric fields stored as strings or empty strings. Normalization
//! repairs all of that into a typed [`Inventory`] without ever failing:
//! malformed nodes are dropped rather than poisoning the whole tree. The
//! operation is idempotent: normalizing an already-normalized document is a
//! no-op.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde_json::Value;

use super::model::{
    Area, Building, ConditionRating, ConstructionType, Inventory, Parcel, QualityGrade, SfType,
    UseType, SCHEMA_VERSION,
};
use crate::types::SquareFeet;

/// Normalize a raw inventory document into the typed tree.
pub fn normalize_inventory(raw: &Value) -> Inventory {
    let mut ids = IdAllocator::default();

    // First pass reserves every id already present so generated ids never
    // collide with them.
    if let Some(parcels) = raw.get("parcels").and_then(Value::as_array) {
        for parcel in parcels.iter().filter_map(Value::as_object) {
            ids.reserve(parcel.get("id"));
            if let Some(buildings) = parcel.get("buildings").and_then(Value::as_array) {
                for building in buildings.iter().filter_map(Value::as_object) {
                    ids.reserve(building.get("id"));
                    if let Some(areas) = building.get("areas").and_then(Value::as_array) {
                        for area in areas.iter().filter_map(Value::as_object) {
                            ids.reserve(area.get("id"));
                        }
                    }
                }
            }
        }
    }

    let parcels = raw
        .get("parcels")
        .and_then(Value::as_array)
        .map(|parcels| {
            parcels
                .iter()
                .enumerate()
                .filter_map(|(idx, p)| normalize_parcel(p, idx, &mut ids))
                .collect()
        })
        .unwrap_or_default();

    Inventory {
        schema_version: coerce_u32(raw.get("schemaVersion")).unwrap_or(SCHEMA_VERSION),
        parcels,
    }
}

fn normalize_parcel(raw: &Value, index: usize, ids: &mut IdAllocator) -> Option<Parcel> {
    let obj = raw.as_object()?;

    let buildings = obj
        .get("buildings")
        .and_then(Value::as_array)
        .map(|buildings| {
            buildings
                .iter()
                .enumerate()
                .filter_map(|(idx, b)| normalize_building(b, idx, ids))
                .collect()
        })
        .unwrap_or_default();

    Some(Parcel {
        id: ids.resolve(obj.get("id"), "parcel"),
        label: coerce_string(obj.get("label")).unwrap_or_else(|| format!("Parcel {}", index + 1)),
        tax_parcel_id: coerce_string(obj.get("taxParcelId")),
        address: coerce_string(obj.get("address")),
        legal_description: coerce_string(obj.get("legalDescription")),
        notes: coerce_string(obj.get("notes")),
        buildings,
    })
}

fn normalize_building(raw: &Value, index: usize, ids: &mut IdAllocator) -> Option<Building> {
    let obj = raw.as_object()?;

    let areas = obj
        .get("areas")
        .and_then(Value::as_array)
        .map(|areas| areas.iter().filter_map(|a| normalize_area(a, ids)).collect())
        .unwrap_or_default();

    Some(Building {
        id: ids.resolve(obj.get("id"), "building"),
        label: coerce_string(obj.get("label"))
            .unwrap_or_else(|| format!("Building {}", index + 1)),
        year_built: coerce_year(obj.get("yearBuilt")),
        year_remodeled: coerce_string(obj.get("yearRemodeled")),
        address_override: coerce_string(obj.get("addressOverride")),
        construction_type: parse_enum::<ConstructionType>(obj.get("constructionType")),
        quality: parse_enum::<QualityGrade>(obj.get("quality")),
        condition: parse_enum::<ConditionRating>(obj.get("condition")),
        notes: coerce_string(obj.get("notes")),
        areas,
    })
}

fn normalize_area(raw: &Value, ids: &mut IdAllocator) -> Option<Area> {
    let obj = raw.as_object()?;

    Some(Area {
        id: ids.resolve(obj.get("id"), "area"),
        use_type: parse_use_type(obj.get("useType"), obj.get("useTypeCustom")),
        sf: coerce_decimal(obj.get("sf")).unwrap_or(SquareFeet::ZERO),
        sf_type: parse_sf_type(obj.get("sfType"), obj.get("sfTypeCustom")),
        year_built_override: coerce_year(obj.get("yearBuiltOverride")),
        notes: coerce_string(obj.get("notes")),
    })
}

/// Parse a use type from either the tagged enum form (`"office"` or
/// `{"custom": "..."}`) or the legacy pair form (`useType` + `useTypeCustom`).
/// Unrecognized labels are preserved as custom variants rather than dropped.
fn parse_use_type(value: Option<&Value>, custom_text: Option<&Value>) -> UseType {
    match value {
        Some(Value::String(s)) => {
            let s = s.trim();
            match s.to_ascii_lowercase().as_str() {
                "office" => UseType::Office,
                "warehouse" | "" => UseType::Warehouse,
                "retail" => UseType::Retail,
                "apartment" => UseType::Apartment,
                "industrial" => UseType::Industrial,
                "flex" => UseType::Flex,
                "sfr" => UseType::Sfr,
                "custom" => UseType::Custom(coerce_string(custom_text).unwrap_or_default()),
                _ => UseType::Custom(s.to_string()),
            }
        }
        Some(Value::Object(map)) => {
            UseType::Custom(coerce_string(map.get("custom")).unwrap_or_default())
        }
        _ => UseType::default(),
    }
}

fn parse_sf_type(value: Option<&Value>, custom_text: Option<&Value>) -> SfType {
    match value {
        Some(Value::String(s)) => match s.trim().to_ascii_uppercase().as_str() {
            "GBA" | "" => SfType::Gba,
            "NRA" => SfType::Nra,
            "OTHER" => SfType::Other(coerce_string(custom_text).unwrap_or_default()),
            other => SfType::Other(other.to_string()),
        },
        Some(Value::Object(map)) => {
            SfType::Other(coerce_string(map.get("other")).unwrap_or_default())
        }
        _ => SfType::default(),
    }
}

/// Parse a serde-representable enum from a JSON value, dropping to `None` on
/// anything unrecognized.
fn parse_enum<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    value.and_then(|v| serde_json::from_value(v.clone()).ok())
}

/// Coerce a JSON value to a trimmed, non-empty string.
fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a JSON value to a Decimal. Accepts numbers and numeric strings;
/// empty strings, nulls, and garbage all resolve to `None`.
pub(crate) fn coerce_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else {
                Decimal::from_scientific(&n.to_string())
                    .ok()
                    .or_else(|| n.to_string().parse().ok())
            }
        }
        Value::String(s) => {
            let trimmed = s.trim().replace(',', "");
            if trimmed.is_empty() {
                None
            } else {
                trimmed
                    .parse()
                    .ok()
                    .or_else(|| Decimal::from_scientific(&trimmed).ok())
            }
        }
        _ => None,
    }
}

fn coerce_year(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_u32(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Deterministic id generation: missing ids are filled from a per-prefix
/// counter, skipping anything already present in the document so repeated
/// normalization never reassigns. Duplicate ids keep their first occurrence
/// and later occurrences are re-issued.
#[derive(Default)]
struct IdAllocator {
    reserved: HashSet<String>,
    assigned: HashSet<String>,
    next_parcel: u32,
    next_building: u32,
    next_area: u32,
}

impl IdAllocator {
    fn reserve(&mut self, id: Option<&Value>) {
        if let Some(id) = coerce_string(id) {
            self.reserved.insert(id);
        }
    }

    fn resolve(&mut self, id: Option<&Value>, prefix: &str) -> String {
        if let Some(existing) = coerce_string(id) {
            if self.assigned.insert(existing.clone()) {
                return existing;
            }
        }
        loop {
            let counter = match prefix {
                "parcel" => {
                    self.next_parcel += 1;
                    self.next_parcel
                }
                "building" => {
                    self.next_building += 1;
                    self.next_building
                }
                _ => {
                    self.next_area += 1;
                    self.next_area
                }
            };
            let candidate = format!("{prefix}-{counter}");
            if !self.reserved.contains(&candidate) && self.assigned.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
