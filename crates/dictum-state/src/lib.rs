//! Hierarchical key/value dictionaries addressed by dot-separated paths.
//!
//! `dictum-state` stores nested data in a single ordered tree and lets callers
//! reach any level with a path such as `user.address.city`.
//!
//! # Core Concepts
//!
//! - **PathMap**: the container. Writes auto-create intermediate levels, reads
//!   never create anything, and deletes can prune branches left empty.
//! - **Path**: a parsed dot-separated key path.
//! - **Dictionary**: a facade owning one lazily created `PathMap` for a
//!   namespace marker type.
//! - **DictionaryRegistry**: the application-level owner of one `Dictionary`
//!   per namespace.
//!
//! # Quick Start
//!
//! ```
//! use dictum_state::PathMap;
//! use serde_json::json;
//!
//! let mut map = PathMap::new();
//! map.set("user.name", "Frank");
//! map.set("user.surname", "Castle");
//!
//! assert_eq!(map.get("user.name"), Some(&json!("Frank")));
//! assert_eq!(map.get_or("missing.path", "fallback"), json!("fallback"));
//! assert!(!map.exists("missing"));
//!
//! map.delete("user.name", true);
//! map.delete("user.surname", true);
//! assert!(!map.exists("user"));
//! ```
//!
//! # Merging
//!
//! ```
//! use dictum_state::PathMap;
//! use serde_json::json;
//!
//! let mut map = PathMap::try_from(json!({"a": {"x": 1, "y": 2}})).unwrap();
//! let incoming = json!({"a": {"y": 3, "z": 4}});
//! map.merge(incoming.as_object().cloned().unwrap_or_default());
//!
//! assert_eq!(map.serialize(), json!({"a": {"x": 1, "y": 3, "z": 4}}));
//! ```
//!
//! # Limitations
//!
//! Keys containing `.` cannot be addressed: the delimiter has no escape.
//! Nothing here is synchronized; share a store across threads behind your own
//! lock.

mod dictionary;
mod error;
mod map;
mod merge;
mod op;
mod path;
mod registry;
mod resolve;

pub use dictionary::{Dictionary, Namespace};
pub use error::{value_type_name, DictumError, DictumResult};
pub use map::PathMap;
pub use op::Number;
pub use path::{Path, DELIMITER};
pub use registry::DictionaryRegistry;

// Re-export serde_json types for convenience
pub use serde_json::{Map, Value};
