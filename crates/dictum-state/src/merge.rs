//! Structural merge and compaction of value trees.

use crate::resolve::is_empty_object;
use serde_json::{Map, Value};

/// Deep-merge `incoming` into `target`.
///
/// When both sides hold an object under the same key the two are merged
/// recursively. In every other case the incoming value replaces the existing
/// one, so incoming wins on conflicts at any depth and arrays are replaced
/// whole. Keys already in `target` keep their position; new keys are appended
/// in the order they appear in `incoming`.
pub(crate) fn merge_into(target: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        match value {
            Value::Object(nested) => match target.get_mut(&key) {
                Some(Value::Object(existing)) => merge_into(existing, nested),
                _ => {
                    target.insert(key, Value::Object(nested));
                }
            },
            value => {
                target.insert(key, value);
            }
        }
    }
}

/// Merge in "merge-back" mode.
///
/// `data` is merged into `existing` exactly as [`merge_into`] does, then the
/// merged tree is copied back into `data`. `data` gains the keys it lacked,
/// and the key order of `existing` is kept on both sides.
pub(crate) fn merge_back_into(existing: &mut Map<String, Value>, data: &mut Map<String, Value>) {
    merge_into(existing, data.clone());
    *data = existing.clone();
}

/// Remove every empty object beneath `value`, bottom-up.
///
/// Children are compacted before their parent is inspected, so an object that
/// only held empty objects is removed too. Arrays are searched for nested
/// objects but their elements are never removed. `value` itself is kept even if
/// it ends up empty. Returns the number of objects removed.
pub(crate) fn compact_value(value: &mut Value) -> usize {
    match value {
        Value::Object(map) => {
            let nested: usize = map.values_mut().map(compact_value).sum();
            let before = map.len();
            map.retain(|_, child| !is_empty_object(child));
            nested + (before - map.len())
        }
        Value::Array(items) => items.iter_mut().map(compact_value).sum(),
        _ => 0,
    }
}
