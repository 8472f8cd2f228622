//! Loading and atomically saving the JSON document a command works on.

use crate::error::CliError;
use dictum_state::{Map, PathMap, Value};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Load the document at `path`. A file that does not exist yet is an empty
/// document.
pub fn open(path: &Path) -> Result<PathMap, CliError> {
    if !path.exists() {
        debug!(path = %path.display(), "document does not exist yet, starting empty");
        return Ok(PathMap::new());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if raw.trim().is_empty() {
        return Ok(PathMap::new());
    }
    read_object(path, &raw).map(PathMap::from)
}

/// Parse `raw` as a JSON object.
pub fn read_object(path: &Path, raw: &str) -> Result<Map<String, Value>, CliError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Write the document to `path` atomically.
pub fn save(path: &Path, document: &PathMap, pretty: bool) -> Result<(), CliError> {
    let content = render(&document.serialize(), pretty)?;
    write_atomically(path, content.as_bytes()).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), entries = document.len(), "saved document");
    Ok(())
}

/// Write `content` to a uniquely named temporary file next to `path`, then
/// rename it over `path`. The temporary file is removed if anything fails.
fn write_atomically(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content)?;
    file.write_all(b"\n")?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn render(value: &Value, pretty: bool) -> Result<String, CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}
