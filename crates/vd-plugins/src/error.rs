//! Errors raised by plugins after successful construction.

use thiserror::Error;

/// Error from running a plugin (never from constructing it; missing
/// configuration is reported through `vd_secrets::MissingConfigValues`
/// before any of this code runs).
#[derive(Debug, Error)]
pub enum PluginError {
    /// The provider backing this plugin failed.
    #[error("provider call failed: {0}")]
    Provider(String),

    /// The provider answered, but not in a shape we can read.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The annotation could not be serialized for erased reporting.
    #[error("annotation serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
