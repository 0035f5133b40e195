//! Descriptors addressing a single configuration value.

use serde::{Deserialize, Serialize};

/// How to look up one configuration value in the raw mapping.
///
/// A descriptor is the two-level address `scope.key`. It says where a
/// value lives, never what the value is, so it is safe to print in
/// diagnostics. Both parts are always non-empty; the fields are
/// private so neither struct literals nor deserialization can bypass
/// that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConfigDescription {
    /// Top-level grouping, usually a provider name (e.g. "together").
    scope: String,

    /// Key within the scope (e.g. "api_key").
    key: String,
}

impl ConfigDescription {
    /// Create a descriptor.
    ///
    /// Descriptors are authored in code, so an empty scope or key is a
    /// programming error and panics.
    pub fn new(scope: impl Into<String>, key: impl Into<String>) -> Self {
        let scope = scope.into();
        let key = key.into();
        assert!(!scope.is_empty(), "descriptor scope must be non-empty");
        assert!(!key.is_empty(), "descriptor key must be non-empty");
        Self { scope, key }
    }

    /// Top-level grouping.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Key within the scope.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Display for ConfigDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.scope, self.key)
    }
}

impl<'de> Deserialize<'de> for ConfigDescription {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Parts {
            scope: String,
            key: String,
        }

        let parts = Parts::deserialize(deserializer)?;
        if parts.scope.is_empty() || parts.key.is_empty() {
            return Err(serde::de::Error::custom(
                "descriptor scope and key must be non-empty",
            ));
        }
        Ok(Self {
            scope: parts.scope,
            key: parts.key,
        })
    }
}
