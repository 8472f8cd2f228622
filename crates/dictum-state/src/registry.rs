//! Registry owning one dictionary per namespace.
//!
//! The registry is an explicit application-context object: it is constructed
//! once and handed to whatever needs dictionary access. Each namespace type gets
//! its own `Dictionary`, created the first time it is requested.

use crate::{Dictionary, Namespace};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Type-erased view of a `Dictionary<N>` stored in the registry.
trait ErasedDictionary: Send + Sync {
    fn name(&self) -> &'static str;
    fn snapshot(&self) -> Value;
    fn compact(&mut self) -> usize;
    fn is_initialized(&self) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<N: Namespace> ErasedDictionary for Dictionary<N> {
    fn name(&self) -> &'static str {
        N::NAME
    }

    fn snapshot(&self) -> Value {
        self.serialize()
    }

    fn compact(&mut self) -> usize {
        if self.is_initialized() {
            Dictionary::<N>::compact(self)
        } else {
            0
        }
    }

    fn is_initialized(&self) -> bool {
        Dictionary::<N>::is_initialized(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// One [`Dictionary`] per namespace type.
///
/// # Examples
///
/// ```
/// use dictum_state::{namespace, DictionaryRegistry};
/// use serde_json::json;
///
/// namespace!(pub Config);
/// namespace!(pub Session);
///
/// let mut registry = DictionaryRegistry::new();
/// registry.dictionary::<Config>().set("app.name", "demo");
/// registry.dictionary::<Session>().set("user.id", 7);
///
/// assert!(!registry.dictionary::<Session>().exists("app.name"));
/// assert_eq!(
///     registry.snapshot(),
///     json!({"Config": {"app": {"name": "demo"}}, "Session": {"user": {"id": 7}}})
/// );
/// ```
#[derive(Default)]
pub struct DictionaryRegistry {
    entries: HashMap<TypeId, Box<dyn ErasedDictionary>>,
    order: Vec<TypeId>,
}

impl DictionaryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The dictionary for namespace `N`, created on first access.
    pub fn dictionary<N: Namespace>(&mut self) -> &mut Dictionary<N> {
        let id = TypeId::of::<N>();
        if !self.entries.contains_key(&id) {
            debug!(namespace = N::NAME, "registering dictionary");
            self.entries.insert(id, Box::new(Dictionary::<N>::new()));
            self.order.push(id);
        }

        self.entries
            .get_mut(&id)
            .and_then(|entry| entry.as_any_mut().downcast_mut::<Dictionary<N>>())
            .expect("registry entries are keyed by their namespace type")
    }

    /// The dictionary for namespace `N`, if it was ever requested.
    pub fn get<N: Namespace>(&self) -> Option<&Dictionary<N>> {
        self.entries
            .get(&TypeId::of::<N>())
            .and_then(|entry| entry.as_any().downcast_ref::<Dictionary<N>>())
    }

    /// Whether namespace `N` has been registered.
    pub fn contains<N: Namespace>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<N>())
    }

    /// Remove namespace `N` and return its dictionary.
    pub fn remove<N: Namespace>(&mut self) -> Option<Dictionary<N>> {
        let id = TypeId::of::<N>();
        let entry = self.entries.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        entry
            .into_any()
            .downcast::<Dictionary<N>>()
            .ok()
            .map(|dictionary| *dictionary)
    }

    /// Names of registered namespaces in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.ordered().map(|entry| entry.name()).collect()
    }

    /// Number of registered namespaces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no namespace has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact every initialized dictionary and return the total number of
    /// containers removed.
    pub fn compact_all(&mut self) -> usize {
        self.entries.values_mut().map(|entry| entry.compact()).sum()
    }

    /// Drop every namespace.
    pub fn clear(&mut self) {
        debug!(namespaces = self.entries.len(), "clearing dictionary registry");
        self.entries.clear();
        self.order.clear();
    }

    /// Contents of every initialized dictionary keyed by namespace name.
    pub fn snapshot(&self) -> Value {
        let mut out = Map::new();
        for entry in self.ordered().filter(|entry| entry.is_initialized()) {
            out.insert(entry.name().to_string(), entry.snapshot());
        }
        Value::Object(out)
    }

    fn ordered(&self) -> impl Iterator<Item = &dyn ErasedDictionary> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|entry| &**entry))
    }
}

impl fmt::Debug for DictionaryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryRegistry")
            .field("namespaces", &self.names())
            .finish()
    }
}

impl Serialize for DictionaryRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let initialized: Vec<_> = self
            .ordered()
            .filter(|entry| entry.is_initialized())
            .collect();
        let mut map = serializer.serialize_map(Some(initialized.len()))?;
        for entry in initialized {
            map.serialize_entry(entry.name(), &entry.snapshot())?;
        }
        map.end()
    }
}
