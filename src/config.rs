//! Parser configuration: the grammar tables plus the recursion limit.
//!
//! Configuration files are YAML (`.yaml`, `.yml`) or JSON (`.json`). Every
//! field is optional; whatever is left out falls back to the standard grammar
//! and [`DEFAULT_MAX_DEPTH`]. The grammar may sit under a `grammar` key or be
//! the whole document. A loaded grammar is validated unless the caller asks
//! for the raw tables.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{config_error, QuillError};
use crate::syntax::grammar::GrammarTables;
use crate::syntax::parser::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigDocument")]
pub struct ParserConfig {
    pub grammar: GrammarTables,
    pub max_depth: usize,
}

/// On-disk shape: a nested `grammar` wins over top-level table fields.
#[derive(Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    grammar: Option<GrammarTables>,
    #[serde(default)]
    max_depth: Option<usize>,
    #[serde(flatten)]
    tables: GrammarTables,
}

impl From<ConfigDocument> for ParserConfig {
    fn from(document: ConfigDocument) -> Self {
        Self {
            grammar: document.grammar.unwrap_or(document.tables),
            max_depth: document.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            grammar: GrammarTables::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self, QuillError> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|e| config_error(origin, e.to_string()))?;
        config.checked()
    }

    pub fn from_json_str(text: &str, origin: &str) -> Result<Self, QuillError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| config_error(origin, e.to_string()))?;
        config.checked()
    }

    /// Reads and validates a configuration file, picking the format from its
    /// extension.
    pub fn load(path: &Path) -> Result<Self, QuillError> {
        Self::load_unchecked(path)?.checked()
    }

    /// Reads a configuration file without validating the grammar, for tools
    /// that report every finding themselves.
    pub fn load_unchecked(path: &Path) -> Result<Self, QuillError> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| config_error(&origin, e.to_string()))?;
        debug!(path = %origin, "loading parser configuration");

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                serde_json::from_str(&text).map_err(|e| config_error(&origin, e.to_string()))
            }
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&text).map_err(|e| config_error(&origin, e.to_string()))
            }
            other => Err(config_error(
                &origin,
                format!(
                    "unsupported configuration format '{}', expected .yaml, .yml or .json",
                    other.unwrap_or("")
                ),
            )),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn checked(self) -> Result<Self, QuillError> {
        let grammar = self.grammar.checked()?;
        Ok(Self { grammar, ..self })
    }
}
