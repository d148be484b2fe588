//! Structured values stored as JSON text.

use std::marker::PhantomData;

use serde::{Serialize, de::DeserializeOwned};

use super::{ConversionError, PropertyValueConverter};

/// Maps a serializable property type to its JSON text representation.
pub struct JsonConverter<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonConverter<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PropertyValueConverter<T, String> for JsonConverter<T>
where
    T: Serialize + DeserializeOwned,
{
    fn from_model(&self, value: Option<&String>) -> Result<Option<T>, ConversionError> {
        value
            .map(|json| serde_json::from_str(json).map_err(ConversionError::from))
            .transpose()
    }

    fn to_model(&self, value: Option<&T>) -> Result<Option<String>, ConversionError> {
        value
            .map(|v| serde_json::to_string(v).map_err(ConversionError::from))
            .transpose()
    }
}
