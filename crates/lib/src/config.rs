//! Typed configuration parameters.
//!
//! Properties and property sets carry an open-ended [`Configuration`]: a map of
//! named parameters whose value type is declared by the [`ConfigParam`] used to
//! read them. Any consumer can define its own namespaced parameters without
//! coordinating with this crate; the declared type is checked when reading.
//!
//! ```
//! use propbox::config::{ConfigParam, Configuration};
//!
//! const PAGE_SIZE: ConfigParam<u32> = ConfigParam::new("paging.size");
//!
//! let config = Configuration::builder().with(&PAGE_SIZE, 25).build();
//! assert_eq!(config.parameter(&PAGE_SIZE)?, Some(25));
//! # Ok::<(), propbox::Error>(())
//! ```

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    marker::PhantomData,
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when reading configuration parameters.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A parameter was stored with a different type than the one used to read it.
    #[error("Configuration parameter '{key}' has type {actual}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },
}

impl ConfigError {
    /// Check if this error is a type mismatch
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, ConfigError::TypeMismatch { .. })
    }

    /// Get the parameter key this error refers to
    pub fn key(&self) -> &str {
        match self {
            ConfigError::TypeMismatch { key, .. } => key,
        }
    }
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}

/// A typed configuration key.
///
/// The key is a plain string; the type parameter records the type a value read
/// through this key is expected to have.
pub struct ConfigParam<T> {
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ConfigParam<T> {
    /// Declares a parameter with the given key.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    /// The parameter key.
    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl<T> Clone for ConfigParam<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ConfigParam<T> {}

impl<T> fmt::Debug for ConfigParam<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigParam")
            .field("key", &self.key)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

struct Parameter {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Clone for Parameter {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            type_name: self.type_name,
        }
    }
}

/// An immutable set of typed parameters.
///
/// Cloning is cheap: parameter values are shared.
#[derive(Clone, Default)]
pub struct Configuration {
    parameters: HashMap<String, Parameter>,
}

impl Configuration {
    /// An empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a configuration.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// Returns a builder seeded with this configuration's parameters.
    pub fn to_builder(&self) -> ConfigurationBuilder {
        ConfigurationBuilder {
            parameters: self.parameters.clone(),
        }
    }

    /// Returns `true` if a value is present for `key`.
    pub fn has_parameter(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }

    /// Reads a parameter value.
    ///
    /// Returns `Ok(None)` if the parameter is not present, and
    /// [`ConfigError::TypeMismatch`] if it was stored with another type.
    pub fn parameter<T>(&self, param: &ConfigParam<T>) -> Result<Option<T>, ConfigError>
    where
        T: Clone + Send + Sync + 'static,
    {
        match self.parameters.get(param.key) {
            None => Ok(None),
            Some(parameter) => match parameter.value.downcast_ref::<T>() {
                Some(value) => Ok(Some(value.clone())),
                None => Err(ConfigError::TypeMismatch {
                    key: param.key.to_string(),
                    expected: std::any::type_name::<T>().to_string(),
                    actual: parameter.type_name.to_string(),
                }),
            },
        }
    }

    /// Reads a parameter value, falling back to `default` when absent.
    pub fn parameter_or<T>(&self, param: &ConfigParam<T>, default: T) -> Result<T, ConfigError>
    where
        T: Clone + Send + Sync + 'static,
    {
        Ok(self.parameter(param)?.unwrap_or(default))
    }

    /// Returns `true` if `key` is present and holds exactly `value`.
    pub fn has_parameter_value<T>(&self, param: &ConfigParam<T>, value: &T) -> bool
    where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        self.parameters
            .get(param.key)
            .and_then(|p| p.value.downcast_ref::<T>())
            .is_some_and(|v| v == value)
    }

    /// Iterates over the parameter keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns `true` if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.parameters.iter().map(|(k, p)| (k, p.type_name)))
            .finish()
    }
}

/// Builder for [`Configuration`].
#[derive(Default)]
pub struct ConfigurationBuilder {
    parameters: HashMap<String, Parameter>,
}

impl ConfigurationBuilder {
    /// Sets a parameter, replacing any previous value for the same key.
    pub fn with<T>(mut self, param: &ConfigParam<T>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.set(param, value);
        self
    }

    /// Sets a parameter in place.
    pub fn set<T>(&mut self, param: &ConfigParam<T>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.parameters.insert(
            param.key.to_string(),
            Parameter {
                value: Arc::new(value),
                type_name: std::any::type_name::<T>(),
            },
        );
    }

    /// Copies every parameter of `other`, overriding keys already present.
    pub fn merge(mut self, other: &Configuration) -> Self {
        for (key, parameter) in &other.parameters {
            self.parameters.insert(key.clone(), parameter.clone());
        }
        self
    }

    /// Removes a parameter.
    pub fn remove(mut self, key: &str) -> Self {
        self.parameters.remove(key);
        self
    }

    /// Freezes the builder.
    pub fn build(self) -> Configuration {
        Configuration {
            parameters: self.parameters,
        }
    }
}

/// Granularity of a temporal property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemporalType {
    /// A calendar date without time of day
    Date,
    /// A time of day without date
    Time,
    /// A date with time of day
    DateTime,
}

/// Temporal granularity of a property, set by the temporal converters.
pub const TEMPORAL_TYPE: ConfigParam<TemporalType> = ConfigParam::new("propbox.temporal-type");
