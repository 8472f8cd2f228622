//! Subcommands and their effect on a loaded document.

use crate::config::Config;
use crate::document;
use crate::error::CliError;
use clap::Subcommand;
use dictum_state::{PathMap, Value};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the value stored at a path.
    Get {
        path: String,
        /// Printed instead when the path is missing.
        #[arg(long)]
        default: Option<String>,
    },
    /// Store a value at a path, creating missing levels.
    Set {
        path: String,
        /// JSON value; anything that is not valid JSON is stored as a string.
        value: String,
    },
    /// Remove the value at a path.
    Delete {
        path: String,
        /// Keep ancestors left empty by the removal.
        #[arg(long)]
        no_compact: bool,
    },
    /// Exit with status 0 when the path exists, 1 otherwise.
    Exists { path: String },
    /// Deep-merge the object in a JSON file into the document.
    Merge {
        source: PathBuf,
        /// Also write the merged document back into the source file.
        #[arg(long)]
        back: bool,
    },
    /// Remove every empty object from the document.
    Compact,
    /// Print the whole document.
    Dump,
}

/// What a command produced.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// A value to print; the document is unchanged.
    Show(Value),
    /// The path was not found.
    Missing,
    /// The document was changed and must be written back.
    Modified,
}

impl Command {
    pub fn execute(&self, document: &mut PathMap, config: &Config) -> Result<Outcome, CliError> {
        let outcome = match self {
            Command::Get { path, default } => match (document.get(path.as_str()), default) {
                (Some(value), _) => Outcome::Show(value.clone()),
                (None, Some(default)) => Outcome::Show(parse_value(default)),
                (None, None) => Outcome::Missing,
            },
            Command::Set { path, value } => {
                document.set(path.as_str(), parse_value(value));
                Outcome::Modified
            }
            Command::Delete { path, no_compact } => {
                let compact = config.compact_on_delete && !no_compact;
                match document.delete(path.as_str(), compact) {
                    Some(_) => Outcome::Modified,
                    None => Outcome::Missing,
                }
            }
            Command::Exists { path } => {
                if document.exists(path.as_str()) {
                    Outcome::Show(Value::Bool(true))
                } else {
                    Outcome::Missing
                }
            }
            Command::Merge { source, back } => {
                let raw = std::fs::read_to_string(source).map_err(|e| CliError::Read {
                    path: source.clone(),
                    source: e,
                })?;
                let mut data = document::read_object(source, &raw)?;
                if *back {
                    document.merge_back(&mut data);
                    document::save(source, &PathMap::from(data), config.pretty)?;
                } else {
                    document.merge(data);
                }
                Outcome::Modified
            }
            Command::Compact => {
                let removed = document.compact();
                info!(removed, "compacted document");
                Outcome::Modified
            }
            Command::Dump => Outcome::Show(document.serialize()),
        };
        Ok(outcome)
    }
}

/// Parse a command-line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
