//! Verdict secret and configuration handling.
//!
//! This crate provides:
//! - The raw two-level configuration mapping ([`RawConfig`])
//! - Descriptors addressing a single value ([`ConfigDescription`])
//! - Required/optional value carriers ([`Required`], [`Optional`])
//! - Aggregated missing-value reporting ([`MissingConfigValues`])
//! - The injector seam for deferred construction ([`Injector`])
//!
//! Nothing here performs I/O beyond loading the mapping itself;
//! resolving a value is a pure lookup, and failures are plain data
//! that callers merge so an operator sees every gap in one report.

pub mod config;
pub mod description;
pub mod inject;
pub mod missing;
pub mod raw;

pub use config::{Config, ConfigKey, FromRawConfig, Optional, Required};
pub use description::ConfigDescription;
pub use inject::Injector;
pub use missing::{gather2, gather3, MissingConfigValues};
pub use raw::{RawConfig, RawConfigError};
