//! Error types for value conversion.

use thiserror::Error;

/// Structured errors raised while converting between a property's value type and
/// its model type.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// No enum constant has the given name
    #[error("No constant named '{value}' in enum {enum_type}")]
    UnknownEnumName { value: String, enum_type: String },

    /// The ordinal is outside the enum's constant range
    #[error("Ordinal {ordinal} out of range for enum {enum_type} with {len} constants")]
    OrdinalOutOfRange {
        ordinal: i64,
        enum_type: String,
        len: usize,
    },

    /// The value is not an instance of the type the converter expects
    #[error("Converter expects a value of type {expected}, got {actual}")]
    InvalidModelType { expected: String, actual: String },

    /// A numeric value could not be coerced to the target numeric type
    #[error("Cannot coerce {value} to {target}")]
    NumericCoercion { value: String, target: String },

    /// A temporal value has no representation in the target type
    #[error("Temporal conversion failed: {reason}")]
    Temporal { reason: String },

    /// JSON encoding or decoding failed
    #[error("JSON conversion failed: {reason}")]
    Json { reason: String },

    /// A caller-supplied conversion function failed
    #[error("Conversion failed: {reason}")]
    Failed { reason: String },
}

impl ConversionError {
    /// Convenience constructor for custom converters.
    pub fn failed(reason: impl Into<String>) -> Self {
        ConversionError::Failed {
            reason: reason.into(),
        }
    }

    /// Check if this error concerns an enum name or ordinal
    pub fn is_enum_error(&self) -> bool {
        matches!(
            self,
            ConversionError::UnknownEnumName { .. } | ConversionError::OrdinalOutOfRange { .. }
        )
    }

    /// Check if this error is a model type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, ConversionError::InvalidModelType { .. })
    }

    /// Check if this error is a numeric coercion failure
    pub fn is_coercion_error(&self) -> bool {
        matches!(self, ConversionError::NumericCoercion { .. })
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        ConversionError::Json {
            reason: err.to_string(),
        }
    }
}

impl From<ConversionError> for crate::Error {
    fn from(err: ConversionError) -> Self {
        crate::Error::Conversion(err)
    }
}
