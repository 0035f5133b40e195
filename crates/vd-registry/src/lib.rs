//! Verdict instance factory.
//!
//! Maps stable string uids to deferred constructors for pluggable
//! components, so a catalog can be registered at startup and
//! instances built later, once the raw secrets mapping is known.

pub mod factory;

pub use factory::{InstanceFactory, Loader, RegistryError};
