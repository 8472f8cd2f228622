//! Optional JSON configuration for the `dictum` binary.

use crate::error::CliError;
use dictum_state::{Map, PathMap, Value};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Prune emptied ancestors on `delete` unless `--no-compact` is given.
    pub compact_on_delete: bool,
    /// Pretty-print JSON output and written documents.
    pub pretty: bool,
    /// Values filled into every loaded document where it has none.
    pub defaults: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compact_on_delete: true,
            pretty: false,
            defaults: Map::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &raw)
    }

    /// Lay `document` over the configured defaults. Document values win and
    /// defaults only fill the keys it lacks.
    pub fn apply_defaults(&self, mut document: PathMap) -> PathMap {
        if self.defaults.is_empty() {
            return document;
        }
        let mut merged = PathMap::from(self.defaults.clone());
        merged.merge(std::mem::take(document.all()));
        merged
    }

    fn parse(path: &Path, raw: &str) -> Result<Self, CliError> {
        serde_json::from_str(raw).map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
