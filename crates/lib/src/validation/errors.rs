//! Error types for value validation.
//!
//! Validation is exhaustive: every validator attached to a property runs, and
//! all failures are collected. A pass with a single failure surfaces that failure
//! as is; a pass with several surfaces them together as
//! [`ValidationError::Aggregate`].

use thiserror::Error;

/// Structured validation failures.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A validator rejected the value
    #[error("{message}")]
    Invalid {
        message: String,
        message_code: Option<String>,
        arguments: Vec<String>,
    },

    /// A validator cannot inspect values of this runtime type
    #[error("Validator expects values of type {expected}, got {actual}")]
    UnsupportedType { expected: String, actual: String },

    /// More than one failure in a single validation pass
    #[error("{} validation failures: {}", .failures.len(), join_messages(.failures))]
    Aggregate { failures: Vec<ValidationError> },
}

fn join_messages(failures: &[ValidationError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// A plain failure with a message and no localization code.
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError::Invalid {
            message: message.into(),
            message_code: None,
            arguments: Vec::new(),
        }
    }

    /// A failure with a default message, a localization code and its arguments.
    pub fn localized(
        message: impl Into<String>,
        message_code: impl Into<String>,
        arguments: Vec<String>,
    ) -> Self {
        ValidationError::Invalid {
            message: message.into(),
            message_code: Some(message_code.into()),
            arguments,
        }
    }

    /// Folds the failures of one validation pass into a result.
    ///
    /// No failures yields `Ok(())`, exactly one is returned unchanged, and more
    /// than one are wrapped in [`ValidationError::Aggregate`].
    pub fn from_failures(mut failures: Vec<ValidationError>) -> Result<(), ValidationError> {
        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => Err(ValidationError::Aggregate { failures }),
        }
    }

    /// Check if this error signals an unsupported value type
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, ValidationError::UnsupportedType { .. })
    }

    /// Check if this error aggregates several failures
    pub fn is_aggregate(&self) -> bool {
        matches!(self, ValidationError::Aggregate { .. })
    }

    /// The leaf failures carried by this error, flattening aggregates.
    pub fn failures(&self) -> Vec<&ValidationError> {
        match self {
            ValidationError::Aggregate { failures } => {
                failures.iter().flat_map(ValidationError::failures).collect()
            }
            other => vec![other],
        }
    }

    /// Get the localization code if this is a single failure carrying one
    pub fn message_code(&self) -> Option<&str> {
        match self {
            ValidationError::Invalid { message_code, .. } => message_code.as_deref(),
            _ => None,
        }
    }

    /// Get the message arguments if this is a single failure
    pub fn arguments(&self) -> &[String] {
        match self {
            ValidationError::Invalid { arguments, .. } => arguments,
            _ => &[],
        }
    }
}

impl From<ValidationError> for crate::Error {
    fn from(err: ValidationError) -> Self {
        crate::Error::Validation(err)
    }
}
