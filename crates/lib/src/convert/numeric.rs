//! Boolean values stored as numbers.

use std::{fmt::Debug, marker::PhantomData};

use super::{ConversionError, PropertyValueConverter};

/// Maps a `bool` property to a numeric model value.
///
/// Reading from the model, an absent value or zero is `false` and any other
/// number is `true`. Writing to the model, `false` (or absence) becomes `0` and
/// `true` becomes `1`, coerced to the numeric model type `N`.
pub struct NumericBooleanConverter<N> {
    _marker: PhantomData<fn() -> N>,
}

impl<N> NumericBooleanConverter<N> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<N> Default for NumericBooleanConverter<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn coerce<N>(flag: u8) -> Result<N, ConversionError>
where
    N: TryFrom<u8>,
    <N as TryFrom<u8>>::Error: Debug,
{
    N::try_from(flag).map_err(|e| ConversionError::NumericCoercion {
        value: format!("{flag} ({e:?})"),
        target: std::any::type_name::<N>().to_string(),
    })
}

impl<N> PropertyValueConverter<bool, N> for NumericBooleanConverter<N>
where
    N: Default + PartialEq + TryFrom<u8> + Send + Sync,
    <N as TryFrom<u8>>::Error: Debug,
{
    fn from_model(&self, value: Option<&N>) -> Result<Option<bool>, ConversionError> {
        Ok(Some(value.is_some_and(|n| *n != N::default())))
    }

    fn to_model(&self, value: Option<&bool>) -> Result<Option<N>, ConversionError> {
        let flag = u8::from(value.copied().unwrap_or(false));
        coerce::<N>(flag).map(Some)
    }
}
