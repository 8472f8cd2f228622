//! Edge case tests for dictum-state.

use dictum_state::{path, DictumError, Path, PathMap};
use serde_json::{json, Value};

fn map_of(value: Value) -> PathMap {
    PathMap::try_from(value).unwrap()
}

// ============================================================================
// Path parsing edge cases
// ============================================================================

#[test]
fn test_empty_segments_are_skipped() {
    let mut map = PathMap::new();
    map.set("..a...b.", 1);
    assert_eq!(map.get("a.b"), Some(&json!(1)));
    assert_eq!(map.serialize(), json!({"a": {"b": 1}}));
}

#[test]
fn test_empty_path_is_root() {
    let mut map = map_of(json!({"a": 1}));
    assert_eq!(map.get(""), Some(&json!({"a": 1})));
    assert_eq!(map.get("."), Some(&json!({"a": 1})));
    assert!(map.exists(""));
    assert!(map.get_mut("").is_some());
}

#[test]
fn test_path_macro_and_string_forms_agree() {
    let mut map = PathMap::new();
    map.set(path!("users", 0, "name"), "Alice");
    assert_eq!(map.get("users.0.name"), Some(&json!("Alice")));
    assert_eq!(path!("users", 0, "name"), Path::parse("users.0.name"));
}

#[test]
fn test_unicode_and_whitespace_keys() {
    let mut map = PathMap::new();
    map.set("用户.名字", "张三");
    map.set("with space.inner key", true);
    assert_eq!(map.get("用户.名字"), Some(&json!("张三")));
    assert_eq!(map.get("with space.inner key"), Some(&json!(true)));
}

#[test]
fn test_key_containing_delimiter_is_unreachable() {
    let mut map = PathMap::new();
    map.all().insert("a.b".into(), json!(1));
    // The string form always splits on the delimiter.
    assert!(!map.exists("a.b"));
    assert_eq!(map.len(), 1);
}

// ============================================================================
// Scalars and sequences in the way
// ============================================================================

#[test]
fn test_get_through_scalar_is_miss() {
    let map = map_of(json!({"a": 5}));
    assert_eq!(map.get("a.b"), None);
    assert!(!map.exists("a.b.c"));
    assert_eq!(map.get_or("a.b", "d"), json!("d"));
}

#[test]
fn test_set_through_scalar_replaces_it() {
    let mut map = map_of(json!({"a": 5, "z": 0}));
    map.set("a.b", 1);
    assert_eq!(map.serialize(), json!({"a": {"b": 1}, "z": 0}));
}

#[test]
fn test_set_through_null_replaces_it() {
    let mut map = map_of(json!({"a": null}));
    map.set("a.b", 1);
    assert_eq!(map.get("a"), Some(&json!({"b": 1})));
}

#[test]
fn test_array_index_read_and_write() {
    let mut map = map_of(json!({"items": [{"id": 1}, {"id": 2}]}));
    assert_eq!(map.get("items.1.id"), Some(&json!(2)));

    map.set("items.0.id", 10);
    assert_eq!(map.get("items"), Some(&json!([{"id": 10}, {"id": 2}])));
}

#[test]
fn test_array_out_of_range_is_miss_without_create() {
    let map = map_of(json!({"items": [1, 2]}));
    assert_eq!(map.get("items.2"), None);
    assert_eq!(map.get("items.first"), None);
}

#[test]
fn test_array_out_of_range_with_create_replaces_array() {
    let mut map = map_of(json!({"items": [1, 2]}));
    map.set("items.5", "x");
    assert_eq!(map.get("items"), Some(&json!({"5": "x"})));
}

#[test]
fn test_delete_array_element_shifts_rest() {
    let mut map = map_of(json!({"items": ["a", "b", "c"]}));
    assert_eq!(map.delete("items.1", true), Some(json!("b")));
    assert_eq!(map.get("items"), Some(&json!(["a", "c"])));
}

#[test]
fn test_delete_compaction_stops_at_array() {
    let mut map = map_of(json!({"items": [{"only": 1}]}));
    map.delete("items.0.only", true);
    assert_eq!(map.serialize(), json!({"items": [{}]}));
}

// ============================================================================
// Delete edge cases
// ============================================================================

#[test]
fn test_delete_missing_is_noop() {
    let mut map = map_of(json!({"a": {"b": {}}}));
    assert_eq!(map.delete("a.b.c", true), None);
    // Nothing was removed, so nothing is pruned either.
    assert_eq!(map.serialize(), json!({"a": {"b": {}}}));
}

#[test]
fn test_delete_through_scalar_is_noop() {
    let mut map = map_of(json!({"a": 1}));
    assert_eq!(map.delete("a.b", true), None);
    assert_eq!(map.serialize(), json!({"a": 1}));
}

#[test]
fn test_delete_compaction_stops_at_first_non_empty_ancestor() {
    let mut map = PathMap::new();
    map.set("a.keep", 1);
    map.set("a.b.c.d", 2);
    map.delete("a.b.c.d", true);
    assert_eq!(map.serialize(), json!({"a": {"keep": 1}}));
}

#[test]
fn test_delete_compaction_leaves_unrelated_empty_containers() {
    let mut map = map_of(json!({"empty": {}, "a": {"b": 1}}));
    map.delete("a.b", true);
    assert_eq!(map.serialize(), json!({"empty": {}}));
}

#[test]
fn test_delete_keeps_sibling_order() {
    let mut map = PathMap::new();
    for key in ["one", "two", "three", "four"] {
        map.set(key, key);
    }
    map.delete("two", true);
    let keys: Vec<_> = map.keys().cloned().collect();
    assert_eq!(keys, vec!["one", "three", "four"]);
}

#[test]
fn test_delete_null_value_reports_it() {
    let mut map = map_of(json!({"n": null}));
    assert_eq!(map.delete("n", true), Some(Value::Null));
    assert!(!map.exists("n"));
}

// ============================================================================
// find / find_with edge cases
// ============================================================================

#[test]
fn test_find_create_leaves_intermediates_behind() {
    let mut map = PathMap::new();
    assert_eq!(map.find("a.b.c", true), Some(&mut Value::Null));
    // Auto-vivified levels are not rolled back.
    assert_eq!(map.serialize(), json!({"a": {"b": {"c": null}}}));
}

#[test]
fn test_find_create_keeps_existing_value() {
    let mut map = map_of(json!({"a": {"b": 7}}));
    assert_eq!(map.find("a.b", true), Some(&mut json!(7)));
}

#[test]
fn test_find_with_sees_existing_slot() {
    let mut map = map_of(json!({"list": [1]}));
    map.find_with("list", false, |slot| {
        if let Value::Array(items) = slot {
            items.push(json!(2));
        }
    });
    assert_eq!(map.get("list"), Some(&json!([1, 2])));
}

// ============================================================================
// Composite operation edge cases
// ============================================================================

#[test]
fn test_increment_null_slot_starts_at_zero() {
    let mut map = map_of(json!({"n": null}));
    assert_eq!(map.increment("n", 2).unwrap(), json!(2));
}

#[test]
fn test_decrement_below_zero() {
    let mut map = PathMap::new();
    assert_eq!(map.decrement("n", 3).unwrap(), json!(-3));
}

#[test]
fn test_decrement_underflow_is_error() {
    let mut map = map_of(json!({"n": i64::MIN}));
    let err = map.decrement("n", 1).unwrap_err();
    assert!(matches!(err, DictumError::InvalidOperation { .. }));
}

#[test]
fn test_increment_error_message_names_path() {
    let mut map = map_of(json!({"a": {"b": "text"}}));
    let err = map.increment("a.b", 1).unwrap_err();
    assert!(err.to_string().contains("$.a.b"), "{err}");
}

#[test]
fn test_append_to_null_slot() {
    let mut map = map_of(json!({"log": null}));
    map.append("log", json!({"line": 1})).unwrap();
    assert_eq!(map.get("log"), Some(&json!([{"line": 1}])));
}

#[test]
fn test_append_to_scalar_leaves_it_untouched() {
    let mut map = map_of(json!({"log": 3}));
    assert!(map.append("log", 4).is_err());
    assert_eq!(map.get("log"), Some(&json!(3)));
}

// ============================================================================
// Loading edge cases
// ============================================================================

#[test]
fn test_load_json_rejects_invalid_document() {
    let mut map = map_of(json!({"keep": 1}));
    let err = map.load_json("{not json").unwrap_err();
    assert!(matches!(err, DictumError::Serialization(_)));
    assert!(map.exists("keep"));
}

#[test]
fn test_load_json_rejects_scalar_document() {
    let mut map = PathMap::new();
    let err = map.load_json("42").unwrap_err();
    assert!(matches!(
        err,
        DictumError::TypeMismatch {
            expected: "object",
            found: "number",
            ..
        }
    ));
}

#[test]
fn test_load_json_null_is_ignored() {
    let mut map = map_of(json!({"keep": 1}));
    map.load_json("null").unwrap();
    assert!(map.exists("keep"));
}

#[test]
fn test_try_from_non_object_fails() {
    assert!(PathMap::try_from(json!("text")).is_err());
    assert!(PathMap::try_from(Value::Null).unwrap().is_empty());
}
