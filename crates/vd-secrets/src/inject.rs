//! The injector seam between generic registries and typed secrets.

use std::marker::PhantomData;

use crate::config::FromRawConfig;
use crate::missing::MissingConfigValues;
use crate::raw::RawConfig;

/// Defers construction of a `C` until the raw mapping is available.
///
/// An injector holds nothing beyond the type it builds. `inject`
/// delegates to [`FromRawConfig::make`] and adds no failure modes of
/// its own, so a registry entry can record "this argument is a
/// secret-backed value of type `C`" without knowing what `C` needs.
pub struct Injector<C: FromRawConfig> {
    _target: PhantomData<fn() -> C>,
}

impl<C: FromRawConfig> Injector<C> {
    /// Create the injector.
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }

    /// Build the target from `raw`.
    pub fn inject(&self, raw: &RawConfig) -> Result<C, MissingConfigValues> {
        C::make(raw)
    }
}

impl<C: FromRawConfig> Default for Injector<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: FromRawConfig> Clone for Injector<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: FromRawConfig> Copy for Injector<C> {}

impl<C: FromRawConfig> std::fmt::Debug for Injector<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Injector<{}>", std::any::type_name::<C>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigKey, Required};

    struct Token;
    impl ConfigKey for Token {
        const SCOPE: &'static str = "auth";
        const KEY: &'static str = "token";
    }

    #[test]
    fn test_inject_delegates_to_make() {
        let mut raw = RawConfig::new();
        raw.insert("auth", "token", "t0k3n");
        let injector = Injector::<Required<Token>>::new();
        let secret = injector.inject(&raw).unwrap();
        assert_eq!(secret.value(), "t0k3n");
    }

    #[test]
    fn test_inject_propagates_make_failure_unchanged() {
        let raw = RawConfig::new();
        let injector = Injector::<Required<Token>>::new();
        let error = injector.inject(&raw).unwrap_err();
        assert_eq!(error, Required::<Token>::make(&raw).unwrap_err());
    }

    #[test]
    fn test_debug_names_the_target() {
        let injector = Injector::<Required<Token>>::new();
        assert!(format!("{:?}", injector).starts_with("Injector<"));
    }
}
