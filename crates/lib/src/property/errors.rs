//! Error types for property access.
//!
//! These cover everything that can go wrong when a property is used against a
//! property box: referencing a property the box does not know, writing a
//! read-only property, values of the wrong runtime type, and failures of a
//! virtual property's value provider.

use thiserror::Error;

/// Structured error types for property access.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PropertyError {
    /// The property is not part of the property set in use
    #[error("Property '{property}' not found in property set")]
    NotFound { property: String },

    /// A write was attempted on a read-only property
    #[error("Property '{property}' is read-only")]
    ReadOnly { property: String },

    /// A value's runtime type does not match the property's declared type
    #[error("Type mismatch for property '{property}': expected {expected}, found {actual}")]
    TypeMismatch {
        property: String,
        expected: String,
        actual: String,
    },

    /// A virtual property's value provider failed
    #[error("Failed to read virtual property '{property}': {source}")]
    ValueProvider {
        property: String,
        #[source]
        source: Box<crate::Error>,
    },

    /// A virtual property was evaluated without a value provider
    #[error("Virtual property '{property}' has no value provider")]
    MissingValueProvider { property: String },

    /// A parent cannot be set on this property
    #[error("Cannot set parent of property '{property}': {reason}")]
    InvalidParent { property: String, reason: String },

    /// A builder of the wrong kind was requested for the property
    #[error("Property '{property}' is a {actual} property, not a {expected} property")]
    KindMismatch {
        property: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl PropertyError {
    /// Check if this error indicates a property was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PropertyError::NotFound { .. })
    }

    /// Check if this error is a read-only violation
    pub fn is_read_only(&self) -> bool {
        matches!(self, PropertyError::ReadOnly { .. })
    }

    /// Check if this error is a type mismatch
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, PropertyError::TypeMismatch { .. })
    }

    /// Check if this error is a value access failure
    pub fn is_access_error(&self) -> bool {
        matches!(
            self,
            PropertyError::ValueProvider { .. } | PropertyError::MissingValueProvider { .. }
        )
    }

    /// Get the name of the property this error refers to
    pub fn property(&self) -> &str {
        match self {
            PropertyError::NotFound { property }
            | PropertyError::ReadOnly { property }
            | PropertyError::TypeMismatch { property, .. }
            | PropertyError::ValueProvider { property, .. }
            | PropertyError::MissingValueProvider { property }
            | PropertyError::InvalidParent { property, .. }
            | PropertyError::KindMismatch { property, .. } => property,
        }
    }
}

// Conversion from PropertyError to the main Error type
impl From<PropertyError> for crate::Error {
    fn from(err: PropertyError) -> Self {
        crate::Error::Property(err)
    }
}
