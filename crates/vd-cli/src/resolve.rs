//! Secrets file discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG path
//! → system path → empty mapping.

use std::path::{Path, PathBuf};

/// Where the secrets file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SecretsSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/verdict/.
    SystemConfig,

    /// No file anywhere; an empty mapping is used.
    #[default]
    EmptyMapping,
}

impl std::fmt::Display for SecretsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretsSource::CliArgument => write!(f, "CLI argument"),
            SecretsSource::Environment => write!(f, "environment variable"),
            SecretsSource::XdgConfig => write!(f, "XDG config"),
            SecretsSource::SystemConfig => write!(f, "system config"),
            SecretsSource::EmptyMapping => write!(f, "empty mapping"),
        }
    }
}

/// Environment variable naming the secrets file directly.
const ENV_SECRETS_PATH: &str = "VERDICT_SECRETS";

/// Environment variable naming a directory holding `secrets.json`.
const ENV_CONFIG_DIR: &str = "VERDICT_CONFIG_DIR";

/// Standard secrets file name.
const SECRETS_FILENAME: &str = "secrets.json";

/// Application name for XDG directories.
const APP_NAME: &str = "verdict";

/// Resolve the secrets file path.
///
/// Resolution order:
/// 1. Explicit CLI path (returned as-is; a load error is the user's
///    signal that the named file is bad)
/// 2. VERDICT_SECRETS environment variable
/// 3. VERDICT_CONFIG_DIR environment variable + `secrets.json`
/// 4. XDG config directory (~/.config/verdict/)
/// 5. System config (/etc/verdict/)
/// 6. None — the caller falls back to an empty mapping
pub fn resolve_secrets(cli_path: Option<&Path>) -> (Option<PathBuf>, SecretsSource) {
    if let Some(path) = cli_path {
        return (Some(path.to_path_buf()), SecretsSource::CliArgument);
    }

    if let Ok(env_path) = std::env::var(ENV_SECRETS_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return (Some(path), SecretsSource::Environment);
        }
    }

    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(SECRETS_FILENAME);
        if path.exists() {
            return (Some(path), SecretsSource::Environment);
        }
    }

    if let Some(xdg_config) = dirs::config_dir() {
        let path = xdg_config.join(APP_NAME).join(SECRETS_FILENAME);
        if path.exists() {
            return (Some(path), SecretsSource::XdgConfig);
        }
    }

    let system_path = PathBuf::from("/etc").join(APP_NAME).join(SECRETS_FILENAME);
    if system_path.exists() {
        return (Some(system_path), SecretsSource::SystemConfig);
    }

    (None, SecretsSource::EmptyMapping)
}
