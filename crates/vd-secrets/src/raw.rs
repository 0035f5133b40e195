//! The raw two-level configuration mapping supplied by the host.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Error loading a raw configuration file.
#[derive(Debug, Error)]
pub enum RawConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw configuration: `{scope: {key: value}}`, all strings.
///
/// The hosting application sources this from files, environment, or a
/// secrets manager. The only contract consumers rely on is
/// [`RawConfig::get`]: a missing scope and a missing key under a
/// present scope are indistinguishable, both read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawConfig(HashMap<String, HashMap<String, String>>);

impl RawConfig {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a single value by its two-level address.
    pub fn get(&self, scope: &str, key: &str) -> Option<&str> {
        self.0
            .get(scope)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Insert a value, creating the scope if needed.
    pub fn insert(
        &mut self,
        scope: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.0
            .entry(scope.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Whether the mapping holds no scopes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All scope names present in the mapping.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Parse a mapping from a JSON object of objects of strings.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load a mapping from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, RawConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&text)?)
    }
}
