//! Path resolution over a value tree.
//!
//! These functions implement the walk behind `find`, `get` and `delete`.
//! Objects are descended by key. Arrays are descended only by a segment that
//! parses as an in-range index; any other segment treats the array like a
//! scalar.

use crate::path::seg_index;
use serde_json::{Map, Value};

/// Look up a direct child of `current` without creating anything.
fn child<'a>(current: &'a Value, seg: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(seg),
        Value::Array(items) => items.get(seg_index(seg)?),
        _ => None,
    }
}

/// Mutable variant of [`child`].
fn child_mut<'a>(current: &'a mut Value, seg: &str) -> Option<&'a mut Value> {
    match current {
        Value::Object(map) => map.get_mut(seg),
        Value::Array(items) => items.get_mut(seg_index(seg)?),
        _ => None,
    }
}

/// Get a reference to the value at a path (for reading).
pub(crate) fn get_at_path<'a>(doc: &'a Value, segments: &[String]) -> Option<&'a Value> {
    let mut current = doc;
    for seg in segments {
        current = child(current, seg)?;
    }
    Some(current)
}

/// Get a mutable reference to the value at a path without creating anything.
///
/// Fails on the first missing key or on any attempt to descend into a scalar.
pub(crate) fn get_at_path_mut<'a>(
    current: &'a mut Value,
    segments: &[String],
) -> Option<&'a mut Value> {
    match segments.split_first() {
        None => Some(current),
        Some((seg, rest)) => get_at_path_mut(child_mut(current, seg)?, rest),
    }
}

/// Resolve a path, creating whatever is missing along the way.
///
/// Missing keys are inserted. Intermediate slots that are missing or hold a
/// non-container are replaced by an empty object before descending. A terminal
/// slot that did not exist is created as `Null`. Nothing created here is rolled
/// back if the caller later abandons the slot.
pub(crate) fn vivify<'a>(current: &'a mut Value, segments: &[String]) -> &'a mut Value {
    let Some((seg, rest)) = segments.split_first() else {
        return current;
    };

    let element = match current {
        Value::Array(items) => seg_index(seg).filter(|idx| *idx < items.len()),
        _ => None,
    };

    let next = match (element, current) {
        (Some(idx), Value::Array(items)) => &mut items[idx],
        (_, current) => ensure_object(current)
            .entry(seg.clone())
            .or_insert(Value::Null),
    };
    vivify(next, rest)
}

/// Remove the value at a path and return it.
///
/// With `compact`, every ancestor object left empty by the removal is removed
/// from its own parent, walking back toward the root and stopping at the first
/// ancestor that still has entries. Elements of arrays are never pruned.
pub(crate) fn remove_at_path(
    current: &mut Value,
    segments: &[String],
    compact: bool,
) -> Option<Value> {
    let (seg, rest) = segments.split_first()?;
    if rest.is_empty() {
        return detach(current, seg);
    }

    let next = child_mut(current, seg)?;
    let removed = remove_at_path(next, rest, compact)?;
    let emptied = compact && is_empty_object(next);

    if emptied && current.is_object() {
        detach(current, seg);
    }
    Some(removed)
}

/// Remove a direct child, keeping the order of its siblings.
fn detach(current: &mut Value, seg: &str) -> Option<Value> {
    match current {
        Value::Object(map) => map.shift_remove(seg),
        Value::Array(items) => {
            let idx = seg_index(seg).filter(|idx| *idx < items.len())?;
            Some(items.remove(idx))
        }
        _ => None,
    }
}

/// Replace `value` with an empty object unless it already is one.
pub(crate) fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}

#[inline]
pub(crate) fn is_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}
