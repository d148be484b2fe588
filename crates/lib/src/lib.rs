//!
//! propbox: typed, path-addressable property containers.
//! This library provides schema-driven records whose fields are first-class, typed descriptors.
//!
//! ## Core Concepts
//!
//! * **Properties (`property::Property`)**: Immutable, typed descriptors used as keys. Path properties are named
//!   within a hierarchy of [`Path`]s; virtual properties compute their value from the record being read.
//! * **Property sets (`set::PropertySet`)**: The schema of a record: an ordered list of properties, a subset of them
//!   marked as identifiers, and a shared configuration.
//! * **Property boxes (`boxed::PropertyBox`)**: The records. A box holds one optional value per property of its set,
//!   and every write is type-checked, converted and validated.
//! * **Converters (`convert::PropertyValueConverter`)**: Bidirectional mappings between a property type and the model
//!   type used by external data.
//! * **Validators (`validation::Validator`)**: Composable rules run on every write and on demand.
//! * **Adapters (`adapter::PathPropertySetAdapter`)**: Resolve externally supplied paths to the properties of a set.

pub mod adapter;
pub mod boxed;
pub mod config;
pub mod convert;
pub mod path;
pub mod property;
pub mod set;
pub mod validation;
pub mod value;

/// Re-export the core types for easier access.
pub use boxed::PropertyBox;
pub use path::Path;
pub use property::{Property, PropertyRef};
pub use set::PropertySet;

/// Result type used throughout the propbox library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the propbox library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured property access errors from the property module
    #[error(transparent)]
    Property(property::PropertyError),

    /// Structured conversion errors from the convert module
    #[error(transparent)]
    Conversion(convert::ConversionError),

    /// Structured validation failures from the validation module
    #[error(transparent)]
    Validation(validation::ValidationError),

    /// Structured property set errors from the set module
    #[error(transparent)]
    Set(set::PropertySetError),

    /// Structured path errors from the path module
    #[error(transparent)]
    Path(path::PathError),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Property(_) => "property",
            Error::Conversion(_) => "convert",
            Error::Validation(_) => "validation",
            Error::Set(_) => "set",
            Error::Path(_) => "path",
            Error::Config(_) => "config",
        }
    }

    /// Check if this error indicates a property was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Property(property_err) => property_err.is_not_found(),
            Error::Set(set_err) => set_err.is_not_member(),
            _ => false,
        }
    }

    /// Check if this error is a read-only violation.
    pub fn is_read_only(&self) -> bool {
        match self {
            Error::Property(property_err) => property_err.is_read_only(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_mismatch(&self) -> bool {
        match self {
            Error::Property(property_err) => property_err.is_type_mismatch(),
            Error::Conversion(conversion_err) => conversion_err.is_type_error(),
            Error::Config(config_err) => config_err.is_type_mismatch(),
            _ => false,
        }
    }

    /// Check if this error is a conversion failure.
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, Error::Conversion(_))
    }

    /// Check if this error is a validation failure.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this error is a failure to read a value.
    pub fn is_access_error(&self) -> bool {
        match self {
            Error::Property(property_err) => property_err.is_access_error(),
            _ => false,
        }
    }

    /// Get the validation failure, if this is one.
    pub fn validation_error(&self) -> Option<&validation::ValidationError> {
        match self {
            Error::Validation(validation_err) => Some(validation_err),
            _ => None,
        }
    }
}
