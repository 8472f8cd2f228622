//! Integration tests for namespaced dictionaries and the registry.

use dictum_state::{namespace, Dictionary, DictionaryRegistry, DictumError, Map, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;

namespace!(pub AppConfig);
namespace!(pub UserSession);
namespace!(
    /// Feature switches read at startup.
    pub Features = "features"
);

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Database {
    host: String,
    port: u16,
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

// ============================================================================
// Dictionary facade
// ============================================================================

#[test]
fn test_new_namespace_needs_no_code() {
    let mut features = Dictionary::<Features>::new();
    features.set("beta.search", true);
    assert_eq!(features.name(), "features");
    assert_eq!(features.get("beta.search"), Some(&json!(true)));
}

#[test]
fn test_facade_full_lifecycle() {
    let mut config = Dictionary::<AppConfig>::new();
    config.load_json(r#"{"server": {"port": 8080}, "name": "demo"}"#)
        .unwrap();
    config.merge(object(json!({"server": {"host": "0.0.0.0"}})));
    config.increment("server.restarts", 1).unwrap();
    config.append("server.log", "started").unwrap();

    assert_eq!(
        config.serialize(),
        json!({
            "server": {"port": 8080, "host": "0.0.0.0", "restarts": 1, "log": ["started"]},
            "name": "demo"
        })
    );

    config.delete("server", true);
    config.delete("name", true);
    assert_eq!(config.serialize(), json!({}));

    config.set("again", 1);
    config.clear();
    assert!(!config.exists("again"));
}

#[test]
fn test_facade_defaults_protocol() {
    let mut config = Dictionary::<AppConfig>::new();
    assert_eq!(config.get_or("port", 80), json!(80));
    assert_eq!(config.get_or_else("host", || json!("localhost")), json!("localhost"));

    let failed: Result<Value, DictumError> = config.try_get_or_else("secret", || {
        Err(DictumError::invalid_operation("secret is not configured"))
    });
    assert!(matches!(failed, Err(DictumError::InvalidOperation { .. })));
    assert!(!config.exists("port"));

    config.get_or_insert_with("retries", || json!(3));
    assert_eq!(config.get("retries"), Some(&json!(3)));
}

#[test]
fn test_facade_typed_access() {
    let mut config = Dictionary::<AppConfig>::new();
    let db = Database {
        host: "db.internal".into(),
        port: 5432,
    };
    config.set_as("services.db", &db).unwrap();

    assert_eq!(config.get_as::<Database>("services.db").unwrap(), Some(db));
    assert_eq!(config.get_as::<u16>("services.db.port").unwrap(), Some(5432));
    assert!(config.get_as::<Database>("services.cache").unwrap().is_none());
}

#[test]
fn test_facade_live_references() {
    let mut config = Dictionary::<AppConfig>::new();
    config.set("counter", 1);

    if let Some(slot) = config.get_mut("counter") {
        *slot = json!(5);
    }
    config.all().insert("direct".into(), json!("yes"));

    assert_eq!(config.get("counter"), Some(&json!(5)));
    assert_eq!(config.get("direct"), Some(&json!("yes")));
}

#[test]
fn test_facade_merge_back_fills_caller_map() {
    let mut config = Dictionary::<AppConfig>::new();
    config.set("log.level", "debug");
    config.set("log.color", true);

    let mut incoming = object(json!({"log": {"level": "info", "format": "json"}}));
    config.merge_back(&mut incoming);

    let expected = json!({"log": {"level": "info", "color": true, "format": "json"}});
    assert_eq!(config.serialize(), expected);
    assert_eq!(Value::Object(incoming), expected);
}

#[test]
fn test_facade_serializes_as_plain_structure() {
    let mut session = Dictionary::<UserSession>::new();
    session.set("user.id", 42);
    assert_eq!(
        serde_json::to_string(&session).unwrap(),
        r#"{"user":{"id":42}}"#
    );
}

// ============================================================================
// Namespace isolation
// ============================================================================

#[test]
fn test_dictionaries_do_not_share_data() {
    let mut config = Dictionary::<AppConfig>::new();
    let mut session = Dictionary::<UserSession>::new();

    config.set("key", "config");
    session.set("key", "session");
    config.delete("key", true);

    assert!(!config.exists("key"));
    assert_eq!(session.get("key"), Some(&json!("session")));
}

#[test]
fn test_registry_isolates_namespaces() {
    let mut registry = DictionaryRegistry::new();
    registry.dictionary::<AppConfig>().set("user.name", "Frank");
    registry.dictionary::<UserSession>().set("user.name", "Castle");

    registry.dictionary::<AppConfig>().clear();

    assert!(!registry.dictionary::<AppConfig>().exists("user.name"));
    assert_eq!(
        registry.dictionary::<UserSession>().get("user.name"),
        Some(&json!("Castle"))
    );
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_snapshot_uses_namespace_names() {
    let mut registry = DictionaryRegistry::new();
    registry.dictionary::<Features>().set("dark_mode", true);
    registry.dictionary::<AppConfig>().set("name", "demo");

    assert_eq!(registry.names(), vec!["features", "AppConfig"]);
    assert_eq!(
        serde_json::to_string(&registry).unwrap(),
        r#"{"features":{"dark_mode":true},"AppConfig":{"name":"demo"}}"#
    );
}

#[test]
fn test_registry_remove_returns_owned_dictionary() {
    let mut registry = DictionaryRegistry::new();
    registry.dictionary::<UserSession>().set("token", "abc");

    let session = registry.remove::<UserSession>().unwrap();
    assert_eq!(session.get("token"), Some(&json!("abc")));
    assert!(registry.remove::<UserSession>().is_none());

    // Requesting it again starts from scratch.
    assert!(!registry.dictionary::<UserSession>().exists("token"));
}

#[test]
fn test_registry_compact_all_counts_removed_containers() {
    let mut registry = DictionaryRegistry::new();
    registry.dictionary::<AppConfig>().set("a.b.c", 1);
    registry.dictionary::<AppConfig>().delete("a.b.c", false);
    registry.dictionary::<UserSession>();

    assert_eq!(registry.compact_all(), 2);
    assert_eq!(registry.snapshot(), json!({"AppConfig": {}}));
}

#[test]
fn test_registry_can_move_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DictionaryRegistry>();
    assert_send_sync::<Dictionary<AppConfig>>();
}
