//! Helpers for cached JSON collections of entities
//!
//! Lists are JSON arrays of objects carrying a numeric `id`. Anything else is
//! left untouched: a non-array "list" yields `None` from the editing helpers.

use serde_json::{Map, Value};

/// Hidden field tagging a provisional entity with the mutation that inserted it
pub const PROVISIONAL_FIELD: &str = "_provisional";

/// The numeric `id` of an entity object
pub fn id_of(value: &Value) -> Option<i64> {
    value.get("id").and_then(Value::as_i64)
}

/// Append `item` to `list`
pub fn insert(list: &Value, item: Value) -> Option<Value> {
    let mut items = list.as_array()?.clone();
    items.push(item);
    Some(Value::Array(items))
}

/// Replace the entity with id `id` by `item`. The list is returned unchanged
/// when no entity has that id.
pub fn replace_by_id(list: &Value, id: i64, item: Value) -> Option<Value> {
    let items = list
        .as_array()?
        .iter()
        .map(|existing| {
            if id_of(existing) == Some(id) {
                item.clone()
            } else {
                existing.clone()
            }
        })
        .collect();
    Some(Value::Array(items))
}

/// Tag `item` as provisional under `marker`
pub fn mark_provisional(item: &mut Value, marker: &str) {
    if let Value::Object(fields) = item {
        fields.insert(PROVISIONAL_FIELD.to_string(), Value::String(marker.to_string()));
    }
}

/// Replace the provisional entity tagged with `marker` by `item`. Other
/// provisional entities, even with the same placeholder id, are kept.
pub fn replace_provisional(list: &Value, marker: &str, item: Value) -> Option<Value> {
    let items = list
        .as_array()?
        .iter()
        .map(|existing| {
            if existing.get(PROVISIONAL_FIELD).and_then(Value::as_str) == Some(marker) {
                item.clone()
            } else {
                existing.clone()
            }
        })
        .collect();
    Some(Value::Array(items))
}

/// Apply `f` to the entity with id `id`
pub fn update_by_id(list: &Value, id: i64, f: impl Fn(&Value) -> Value) -> Option<Value> {
    let items = list
        .as_array()?
        .iter()
        .map(|existing| {
            if id_of(existing) == Some(id) {
                f(existing)
            } else {
                existing.clone()
            }
        })
        .collect();
    Some(Value::Array(items))
}

/// The list without the entity with id `id`
pub fn remove_by_id(list: &Value, id: i64) -> Option<Value> {
    let items = list
        .as_array()?
        .iter()
        .filter(|existing| id_of(existing) != Some(id))
        .cloned()
        .collect();
    Some(Value::Array(items))
}

/// Shallow merge: fields of `patch` overwrite fields of `base`.
///
/// A non-object `base` is replaced by `patch`.
pub fn merge(base: &Value, patch: &Value) -> Value {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            let mut merged: Map<String, Value> = base.clone();
            for (key, value) in patch {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        _ => patch.clone(),
    }
}
