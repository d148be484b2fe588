//! Error types for property set construction.

use thiserror::Error;

/// Structured error types for property sets.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PropertySetError {
    /// An identifier must be a member of the set
    #[error("Cannot mark '{property}' as identifier: not a member of the property set")]
    NotMember { property: String },
}

impl PropertySetError {
    /// Check if this error is a membership violation
    pub fn is_not_member(&self) -> bool {
        matches!(self, PropertySetError::NotMember { .. })
    }
}

// Conversion from PropertySetError to the main Error type
impl From<PropertySetError> for crate::Error {
    fn from(err: PropertySetError) -> Self {
        crate::Error::Set(err)
    }
}
