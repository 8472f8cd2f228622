//! Namespaced facade over a lazily created [`PathMap`].
//!
//! A namespace is an empty marker type. `Dictionary<N>` owns the one `PathMap`
//! holding that namespace's data and exposes the full accessor surface, so a
//! new dictionary needs nothing beyond its marker:
//!
//! ```
//! use dictum_state::{namespace, Dictionary};
//! use serde_json::json;
//!
//! namespace!(pub MyConfig);
//!
//! let mut config = Dictionary::<MyConfig>::new();
//! config.set("user", json!({"name": "Frank", "surname": "Castle"}));
//! assert_eq!(config.get("user.name"), Some(&json!("Frank")));
//! ```

use crate::error::DictumResult;
use crate::{Number, Path, PathMap};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// Marker for a dictionary namespace.
pub trait Namespace: 'static {
    /// Name used in logs and when a registry is serialized.
    const NAME: &'static str;
}

/// Declare a namespace marker type.
///
/// `namespace!(pub Config)` declares `pub struct Config;` and implements
/// [`Namespace`] for it with the type name as `NAME`. An explicit name can be
/// given with `namespace!(pub Config = "app.config")`.
#[macro_export]
macro_rules! namespace {
    ($(#[$meta:meta])* $vis:vis $name:ident = $label:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Namespace for $name {
            const NAME: &'static str = $label;
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $crate::namespace!($(#[$meta])* $vis $name = stringify!($name));
    };
}

/// The data of one namespace.
///
/// The backing `PathMap` is created on the first mutating call. Reads on a
/// dictionary that was never written return misses without allocating.
pub struct Dictionary<N: Namespace> {
    fields: Option<PathMap>,
    _namespace: PhantomData<fn() -> N>,
}

impl<N: Namespace> Dictionary<N> {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self {
            fields: None,
            _namespace: PhantomData,
        }
    }

    /// The namespace name.
    pub fn name(&self) -> &'static str {
        N::NAME
    }

    fn fields(&mut self) -> &mut PathMap {
        self.fields.get_or_insert_with(PathMap::new)
    }

    /// Live access to the root-level entries.
    pub fn all(&mut self) -> &mut Map<String, Value> {
        self.fields().all()
    }

    /// Get the value at `path`.
    pub fn get(&self, path: impl Into<Path>) -> Option<&Value> {
        self.fields.as_ref()?.get(path)
    }

    /// Get a mutable reference to the value at `path` without creating it.
    pub fn get_mut(&mut self, path: impl Into<Path>) -> Option<&mut Value> {
        if !self.is_initialized() {
            return None;
        }
        self.find(path, false)
    }

    /// Get the value at `path`, or `default` on a miss.
    pub fn get_or(&self, path: impl Into<Path>, default: impl Into<Value>) -> Value {
        match self.get(path) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Get the value at `path`, computing a default only on a miss.
    pub fn get_or_else<F>(&self, path: impl Into<Path>, default: F) -> Value
    where
        F: FnOnce() -> Value,
    {
        self.get(path).cloned().unwrap_or_else(default)
    }

    /// Get the value at `path`, falling back to a fallible default whose
    /// error is returned unchanged.
    pub fn try_get_or_else<F, E>(&self, path: impl Into<Path>, default: F) -> Result<Value, E>
    where
        F: FnOnce() -> Result<Value, E>,
    {
        match self.get(path) {
            Some(value) => Ok(value.clone()),
            None => default(),
        }
    }

    /// Get the value at `path`, storing `default()` there first on a miss.
    pub fn get_or_insert_with<F>(&mut self, path: impl Into<Path>, default: F) -> &mut Value
    where
        F: FnOnce() -> Value,
    {
        self.fields().get_or_insert_with(path, default)
    }

    /// Deserialize the value at `path` into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: impl Into<Path>) -> DictumResult<Option<T>> {
        match &self.fields {
            Some(fields) => fields.get_as(path),
            None => Ok(None),
        }
    }

    /// Store `value` at `path` and return the slot.
    pub fn set(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> &mut Value {
        self.fields().set(path, value)
    }

    /// Serialize `value` and store it at `path`.
    pub fn set_as<T: Serialize + ?Sized>(
        &mut self,
        path: impl Into<Path>,
        value: &T,
    ) -> DictumResult<&mut Value> {
        self.fields().set_as(path, value)
    }

    /// Remove the value at `path`, pruning emptied ancestors when `compact`.
    pub fn delete(&mut self, path: impl Into<Path>, compact: bool) -> Option<Value> {
        self.fields().delete(path, compact)
    }

    /// Whether anything, including `null`, is stored at `path`.
    pub fn exists(&self, path: impl Into<Path>) -> bool {
        self.get(path).is_some()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.fields().clear();
    }

    /// Replace the whole content with `data`.
    pub fn load(&mut self, data: Map<String, Value>) {
        self.fields().load(data);
    }

    /// Replace the whole content with a JSON document.
    pub fn load_json(&mut self, json: &str) -> DictumResult<()> {
        self.fields().load_json(json)
    }

    /// Deep-merge `data`; incoming values win on conflicts.
    pub fn merge(&mut self, data: Map<String, Value>) {
        self.fields().merge(data);
    }

    /// Deep-merge `data`, then write the merged result back into `data`.
    pub fn merge_back(&mut self, data: &mut Map<String, Value>) {
        self.fields().merge_back(data);
    }

    /// Add `amount` to the number at `path`.
    pub fn increment(
        &mut self,
        path: impl Into<Path>,
        amount: impl Into<Number>,
    ) -> DictumResult<Value> {
        self.fields().increment(path, amount)
    }

    /// Subtract `amount` from the number at `path`.
    pub fn decrement(
        &mut self,
        path: impl Into<Path>,
        amount: impl Into<Number>,
    ) -> DictumResult<Value> {
        self.fields().decrement(path, amount)
    }

    /// Push `value` onto the array at `path`.
    pub fn append(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> DictumResult<()> {
        self.fields().append(path, value)
    }

    /// Plain nested structure of the whole content.
    pub fn serialize(&self) -> Value {
        match &self.fields {
            Some(fields) => fields.serialize(),
            None => Value::Object(Map::new()),
        }
    }

    pub(crate) fn find(&mut self, path: impl Into<Path>, create: bool) -> Option<&mut Value> {
        self.fields().find(path, create)
    }

    pub(crate) fn compact(&mut self) -> usize {
        self.fields().compact()
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.fields.is_some()
    }
}

impl<N: Namespace> Default for Dictionary<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Namespace> Clone for Dictionary<N> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            _namespace: PhantomData,
        }
    }
}

impl<N: Namespace> fmt::Debug for Dictionary<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("namespace", &N::NAME)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<N: Namespace> Serialize for Dictionary<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.fields {
            Some(fields) => Serialize::serialize(fields, serializer),
            None => Map::<String, Value>::new().serialize(serializer),
        }
    }
}
