//! The path-addressed container.

use crate::error::{value_type_name, DictumError, DictumResult};
use crate::merge::{compact_value, merge_back_into, merge_into};
use crate::resolve::{ensure_object, get_at_path, get_at_path_mut, remove_at_path, vivify};
use crate::Path;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

/// A hierarchical key/value store addressed by dot-separated paths.
///
/// Every level is an insertion-ordered object; leaves are scalars or arrays.
/// Writes auto-create missing intermediate levels, reads never create
/// anything, and a missing path is reported as `None`/`false` rather than
/// as an error.
///
/// # Examples
///
/// ```
/// use dictum_state::PathMap;
/// use serde_json::json;
///
/// let mut map = PathMap::new();
/// map.set("user.name", "Frank");
/// map.set("user.surname", "Castle");
///
/// assert_eq!(map.get("user.name"), Some(&json!("Frank")));
/// assert_eq!(
///     map.serialize(),
///     json!({"user": {"name": "Frank", "surname": "Castle"}})
/// );
/// ```
///
/// # Live references
///
/// [`find`](Self::find), [`get_mut`](Self::get_mut) and [`all`](Self::all)
/// hand out references into the stored tree. They borrow the map mutably, so a
/// reference cannot outlive a later structural change such as
/// [`compact`](Self::compact).
#[derive(Clone, Debug, PartialEq)]
pub struct PathMap {
    root: Value,
}

impl PathMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Resolve `path` to its slot.
    ///
    /// Without `create`, resolution fails on the first missing key or on an
    /// attempt to descend into a scalar, and nothing is modified. With `create`,
    /// missing levels are inserted and scalars standing in the way are replaced
    /// by empty objects; a missing terminal slot is created as `Null`. Levels
    /// created this way stay in place even if the caller never writes to the
    /// returned slot.
    ///
    /// The empty path resolves to the root.
    pub fn find(&mut self, path: impl Into<Path>, create: bool) -> Option<&mut Value> {
        let path = path.into();
        if create {
            Some(vivify(&mut self.root, path.segments()))
        } else {
            get_at_path_mut(&mut self.root, path.segments())
        }
    }

    /// Resolve `path` like [`find`](Self::find) and run `operation` on the slot
    /// before returning it.
    pub fn find_with<F>(
        &mut self,
        path: impl Into<Path>,
        create: bool,
        operation: F,
    ) -> Option<&mut Value>
    where
        F: FnOnce(&mut Value),
    {
        let slot = self.find(path, create)?;
        operation(&mut *slot);
        Some(slot)
    }

    /// Get the value at `path`.
    pub fn get(&self, path: impl Into<Path>) -> Option<&Value> {
        let path = path.into();
        get_at_path(&self.root, path.segments())
    }

    /// Get a mutable reference to the value at `path` without creating it.
    pub fn get_mut(&mut self, path: impl Into<Path>) -> Option<&mut Value> {
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

    /// Get the value at `path`, falling back to a fallible default.
    ///
    /// The callback runs only on a miss and its error is returned unchanged.
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
        let path = path.into();
        let missing = get_at_path(&self.root, path.segments()).is_none();
        let slot = vivify(&mut self.root, path.segments());
        if missing {
            trace!(path = %path, "storing default for missing path");
            *slot = default();
        }
        slot
    }

    /// Deserialize the value at `path` into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: impl Into<Path>) -> DictumResult<Option<T>> {
        self.get(path)
            .map(|value| T::deserialize(value))
            .transpose()
            .map_err(DictumError::from)
    }

    /// Store `value` at `path`, creating missing levels, and return the slot.
    ///
    /// Setting the root path replaces the whole content when `value` is an
    /// object; any other value is ignored because the root must stay a
    /// container.
    pub fn set(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> &mut Value {
        let path = path.into();
        let value = value.into();
        if path.is_empty() {
            if value.is_object() {
                self.root = value;
            } else {
                warn!(
                    found = value_type_name(&value),
                    "ignoring non-object value set at the root"
                );
            }
            return &mut self.root;
        }

        trace!(path = %path, "set");
        let slot = vivify(&mut self.root, path.segments());
        *slot = value;
        slot
    }

    /// Serialize `value` and store it at `path`.
    pub fn set_as<T: Serialize + ?Sized>(
        &mut self,
        path: impl Into<Path>,
        value: &T,
    ) -> DictumResult<&mut Value> {
        let value = serde_json::to_value(value)?;
        Ok(self.set(path, value))
    }

    /// Whether anything, including `null`, is stored at `path`.
    pub fn exists(&self, path: impl Into<Path>) -> bool {
        self.get(path).is_some()
    }

    /// Remove the value at `path` and return it.
    ///
    /// With `compact`, ancestors left empty by the removal are removed as well,
    /// up to the first ancestor that still has entries. Deleting the root path
    /// clears the map.
    pub fn delete(&mut self, path: impl Into<Path>, compact: bool) -> Option<Value> {
        let path = path.into();
        if path.is_empty() {
            let previous = std::mem::replace(&mut self.root, Value::Object(Map::new()));
            return Some(previous);
        }

        let removed = remove_at_path(&mut self.root, path.segments(), compact);
        trace!(path = %path, found = removed.is_some(), compact, "delete");
        removed
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        debug!(entries = self.len(), "clearing path map");
        self.root = Value::Object(Map::new());
    }

    /// Remove every empty object in the tree, bottom-up.
    ///
    /// Returns the number of objects removed. Running it again right away
    /// removes nothing.
    pub fn compact(&mut self) -> usize {
        let removed = compact_value(&mut self.root);
        debug!(removed, "compacted path map");
        removed
    }

    /// Live access to the root-level entries.
    pub fn all(&mut self) -> &mut Map<String, Value> {
        ensure_object(&mut self.root)
    }

    /// Replace the whole content with `data`.
    pub fn load(&mut self, data: Map<String, Value>) {
        debug!(entries = data.len(), "loading path map");
        self.root = Value::Object(data);
    }

    /// Replace the whole content with a decoded value.
    ///
    /// `null` leaves the map untouched; anything but an object is rejected.
    pub fn load_value(&mut self, data: Value) -> DictumResult<()> {
        match data {
            Value::Object(map) => {
                self.load(map);
                Ok(())
            }
            Value::Null => Ok(()),
            other => Err(DictumError::type_mismatch(
                Path::root(),
                "object",
                value_type_name(&other),
            )),
        }
    }

    /// Parse a JSON document and load it with [`load_value`](Self::load_value).
    pub fn load_json(&mut self, json: &str) -> DictumResult<()> {
        let data: Value = serde_json::from_str(json)?;
        self.load_value(data)
    }

    /// Deep-merge `data` into the map; incoming values win on conflicts.
    pub fn merge(&mut self, data: Map<String, Value>) {
        debug!(entries = data.len(), "merging into path map");
        merge_into(ensure_object(&mut self.root), data);
    }

    /// Deep-merge `data` like [`merge`](Self::merge), then write the merged
    /// result back into `data`.
    ///
    /// Incoming values win on conflicts, so `data` keeps its own values and
    /// gains whatever it lacked from the map. Both sides end up identical, in
    /// the map's key order.
    pub fn merge_back(&mut self, data: &mut Map<String, Value>) {
        debug!(entries = data.len(), "merging back into path map");
        merge_back_into(ensure_object(&mut self.root), data);
    }

    /// Produce a plain nested structure of the whole content.
    pub fn serialize(&self) -> Value {
        self.root.clone()
    }

    /// Consume the map and return its content.
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Number of root-level entries.
    pub fn len(&self) -> usize {
        self.root.as_object().map_or(0, Map::len)
    }

    /// Whether the root holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over root-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.root.as_object().into_iter().flat_map(Map::iter)
    }

    /// Root-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.iter().map(|(key, _)| key)
    }
}

impl Default for PathMap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Map<String, Value>> for PathMap {
    fn from(data: Map<String, Value>) -> Self {
        Self {
            root: Value::Object(data),
        }
    }
}

impl TryFrom<Value> for PathMap {
    type Error = DictumError;

    fn try_from(data: Value) -> DictumResult<Self> {
        let mut map = PathMap::new();
        map.load_value(data)?;
        Ok(map)
    }
}

impl Serialize for PathMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PathMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(PathMap::from)
    }
}
