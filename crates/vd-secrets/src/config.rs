//! The config capability contract and its required/optional carriers.

use std::marker::PhantomData;

use crate::description::ConfigDescription;
use crate::missing::MissingConfigValues;
use crate::raw::RawConfig;

/// Anything constructible from the raw mapping alone.
///
/// This is the whole contract between the generic factory machinery
/// and secret-requiring types: no construction happens until the
/// mapping is available, and the only failure mode is missing values.
pub trait FromRawConfig: Sized {
    /// Build this value from `raw`, or report every address it could
    /// not resolve.
    fn make(raw: &RawConfig) -> Result<Self, MissingConfigValues>;
}

/// A configuration value tied to a single well-known address.
///
/// `description` is class-level: every instance of one implementation
/// reports the same descriptor.
pub trait Config: FromRawConfig {
    /// Where this value lives in the raw mapping.
    fn description() -> ConfigDescription;
}

/// Names the `scope.key` address of one configuration value.
///
/// Implementors are unit marker types:
///
/// ```
/// use vd_secrets::ConfigKey;
///
/// struct TogetherApiKey;
///
/// impl ConfigKey for TogetherApiKey {
///     const SCOPE: &'static str = "together";
///     const KEY: &'static str = "api_key";
/// }
/// ```
pub trait ConfigKey {
    const SCOPE: &'static str;
    const KEY: &'static str;

    /// The address as a descriptor.
    fn description() -> ConfigDescription {
        ConfigDescription::new(Self::SCOPE, Self::KEY)
    }
}

/// A required value: construction fails loudly when it is absent.
///
/// Immutable once built; the held string never changes and never
/// appears in `Debug` output.
pub struct Required<K: ConfigKey> {
    value: String,
    _key: PhantomData<K>,
}

impl<K: ConfigKey> Required<K> {
    /// The resolved string, exactly as found in the raw mapping.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl<K: ConfigKey> FromRawConfig for Required<K> {
    fn make(raw: &RawConfig) -> Result<Self, MissingConfigValues> {
        match raw.get(K::SCOPE, K::KEY) {
            Some(value) => Ok(Self {
                value: value.to_string(),
                _key: PhantomData,
            }),
            None => Err(MissingConfigValues::single(K::description())),
        }
    }
}

impl<K: ConfigKey> Config for Required<K> {
    fn description() -> ConfigDescription {
        K::description()
    }
}

impl<K: ConfigKey> Clone for Required<K> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _key: PhantomData,
        }
    }
}

impl<K: ConfigKey> PartialEq for Required<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K: ConfigKey> Eq for Required<K> {}

impl<K: ConfigKey> std::fmt::Debug for Required<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The value may be a secret; print only the address.
        f.debug_struct("Required")
            .field("description", &K::description())
            .finish_non_exhaustive()
    }
}

/// An optional value: absence is a state, not a failure.
pub struct Optional<K: ConfigKey> {
    value: Option<String>,
    _key: PhantomData<K>,
}

impl<K: ConfigKey> Optional<K> {
    /// The resolved string, or `None` when the address was absent.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<K: ConfigKey> FromRawConfig for Optional<K> {
    fn make(raw: &RawConfig) -> Result<Self, MissingConfigValues> {
        Ok(Self {
            value: raw.get(K::SCOPE, K::KEY).map(str::to_string),
            _key: PhantomData,
        })
    }
}

impl<K: ConfigKey> Config for Optional<K> {
    fn description() -> ConfigDescription {
        K::description()
    }
}

impl<K: ConfigKey> Clone for Optional<K> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _key: PhantomData,
        }
    }
}

impl<K: ConfigKey> PartialEq for Optional<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K: ConfigKey> Eq for Optional<K> {}

impl<K: ConfigKey> std::fmt::Debug for Optional<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Optional")
            .field("description", &K::description())
            .field("present", &self.value.is_some())
            .finish_non_exhaustive()
    }
}
