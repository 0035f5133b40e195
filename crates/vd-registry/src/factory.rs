//! The uid → loader table and its failure policy.
//!
//! Registration is pure bookkeeping over `&mut self`; resolution runs
//! over `&self`. The intended lifecycle is "populate once at startup,
//! read many times afterwards" — the write-then-read phase discipline
//! falls out of the borrow checker, with no internal locking.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;
use vd_secrets::{FromRawConfig, Injector, MissingConfigValues, RawConfig};

/// Deferred constructor for one registered component.
pub type Loader<T> =
    Box<dyn Fn(&RawConfig) -> Result<Box<T>, MissingConfigValues> + Send + Sync>;

/// Error from factory operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// `register` called twice with one uid: a startup-time defect,
    /// reported loudly instead of silently overwriting.
    #[error("uid `{0}` is already registered")]
    DuplicateUid(String),

    /// `make_instance` called with a uid never registered. Adding
    /// configuration will not fix this; registering the component
    /// will.
    #[error("no component registered under uid `{0}`")]
    UnknownUid(String),

    /// One or more configuration values the component needs were
    /// absent. Recoverable: supply the values and retry.
    #[error(transparent)]
    MissingConfig(#[from] MissingConfigValues),
}

/// Table of named component loaders, generic over the component's
/// capability trait (`InstanceFactory<dyn Annotator>` and so on).
///
/// The factory never caches: every [`InstanceFactory::make_instance`]
/// call re-resolves configuration and hands a fresh box to the
/// caller, which owns it outright.
pub struct InstanceFactory<T: ?Sized> {
    entries: BTreeMap<String, Loader<T>>,
}

impl<T: ?Sized> Default for InstanceFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> InstanceFactory<T> {
    /// Create an empty factory.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Bind `uid` to a deferred constructor.
    ///
    /// Nothing is instantiated and no configuration is read here.
    /// Loaders that need several independent values should resolve
    /// each to a `Result` first and merge with `vd_secrets::gather2`
    /// (or `combine`), so one failed `make_instance` reports every
    /// missing address for the component at once.
    pub fn register<F>(&mut self, uid: impl Into<String>, loader: F) -> Result<(), RegistryError>
    where
        F: Fn(&RawConfig) -> Result<Box<T>, MissingConfigValues> + Send + Sync + 'static,
    {
        let uid = uid.into();
        if self.entries.contains_key(&uid) {
            return Err(RegistryError::DuplicateUid(uid));
        }
        debug!(target: "verdict::registry", uid = %uid, "component registered");
        self.entries.insert(uid, Box::new(loader));
        Ok(())
    }

    /// Bind `uid` to a component whose construction is described by an
    /// [`Injector`]: the entry records that the component is a
    /// secret-backed value of type `C` without this factory knowing
    /// what `C` requires. `wrap` boxes the injected value behind the
    /// capability trait.
    pub fn register_injected<C, F>(
        &mut self,
        uid: impl Into<String>,
        wrap: F,
    ) -> Result<(), RegistryError>
    where
        C: FromRawConfig + 'static,
        F: Fn(C) -> Box<T> + Send + Sync + 'static,
    {
        let injector = Injector::<C>::new();
        self.register(uid, move |raw| Ok(wrap(injector.inject(raw)?)))
    }

    /// Build the component bound to `uid` against `raw`.
    ///
    /// An unregistered uid is [`RegistryError::UnknownUid`], never a
    /// missing-config report; a registered component whose
    /// configuration is incomplete fails with one combined
    /// [`MissingConfigValues`].
    pub fn make_instance(&self, uid: &str, raw: &RawConfig) -> Result<Box<T>, RegistryError> {
        let loader = self
            .entries
            .get(uid)
            .ok_or_else(|| RegistryError::UnknownUid(uid.to_string()))?;
        let instance = loader(raw)?;
        debug!(target: "verdict::registry", uid, "component constructed");
        Ok(instance)
    }

    /// All registered uids, sorted.
    pub fn known_uids(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Whether `uid` is registered.
    pub fn contains(&self, uid: &str) -> bool {
        self.entries.contains_key(uid)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the factory holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
