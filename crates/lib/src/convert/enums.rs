//! Enum converters.

use std::marker::PhantomData;

use super::{ConversionError, PropertyValueConverter};

/// Enums whose constants can be listed, named and numbered.
///
/// ```
/// use propbox::convert::EnumValue;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Status { Active, Suspended }
///
/// impl EnumValue for Status {
///     fn variants() -> &'static [Self] {
///         &[Status::Active, Status::Suspended]
///     }
///     fn name(&self) -> &'static str {
///         match self {
///             Status::Active => "ACTIVE",
///             Status::Suspended => "SUSPENDED",
///         }
///     }
/// }
/// ```
pub trait EnumValue: Sized + Copy + PartialEq + 'static {
    /// Every constant, in declaration order.
    fn variants() -> &'static [Self];

    /// The constant's textual name.
    fn name(&self) -> &'static str;

    /// Zero-based position of the constant in [`EnumValue::variants`].
    fn ordinal(&self) -> Option<usize> {
        Self::variants().iter().position(|v| v == self)
    }
}

/// Stores an enum constant as its name.
pub struct EnumByName<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E> EnumByName<E> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E> Default for EnumByName<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnumValue> PropertyValueConverter<E, String> for EnumByName<E> {
    fn from_model(&self, value: Option<&String>) -> Result<Option<E>, ConversionError> {
        let Some(name) = value else {
            return Ok(None);
        };
        E::variants()
            .iter()
            .find(|v| v.name() == name)
            .copied()
            .map(Some)
            .ok_or_else(|| ConversionError::UnknownEnumName {
                value: name.clone(),
                enum_type: std::any::type_name::<E>().to_string(),
            })
    }

    fn to_model(&self, value: Option<&E>) -> Result<Option<String>, ConversionError> {
        Ok(value.map(|v| v.name().to_string()))
    }
}

/// Stores an enum constant as its zero-based ordinal.
pub struct EnumByOrdinal<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E> EnumByOrdinal<E> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E> Default for EnumByOrdinal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnumValue> PropertyValueConverter<E, i64> for EnumByOrdinal<E> {
    fn from_model(&self, value: Option<&i64>) -> Result<Option<E>, ConversionError> {
        let Some(&ordinal) = value else {
            return Ok(None);
        };
        let variants = E::variants();
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| variants.get(index))
            .copied()
            .map(Some)
            .ok_or_else(|| ConversionError::OrdinalOutOfRange {
                ordinal,
                enum_type: std::any::type_name::<E>().to_string(),
                len: variants.len(),
            })
    }

    fn to_model(&self, value: Option<&E>) -> Result<Option<i64>, ConversionError> {
        let Some(constant) = value else {
            return Ok(None);
        };
        constant
            .ordinal()
            .and_then(|o| i64::try_from(o).ok())
            .map(Some)
            .ok_or_else(|| ConversionError::UnknownEnumName {
                value: constant.name().to_string(),
                enum_type: std::any::type_name::<E>().to_string(),
            })
    }
}
