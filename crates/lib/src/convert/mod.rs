//! Conversion between property values and model values.
//!
//! A property stores values of its own type `T`. External data (rows, wire
//! records, forms) often represents the same information with another *model*
//! type `M`: an enum as its name, a boolean as a number, a date as a
//! timestamp. A [`PropertyValueConverter<T, M>`] attached to a property maps
//! between the two, and a [`crate::PropertyBox`] applies it transparently when
//! values are written or read in model form.
//!
//! # Built-in converters
//!
//! - [`EnumByName`] / [`EnumByOrdinal`] for enums implementing [`EnumValue`]
//! - [`NumericBooleanConverter`] for booleans stored as numbers
//! - [`LocalDateConverter`], [`LocalDateTimeConverter`], [`LocalTimeConverter`]
//! - [`CollectionConverter`] lifting an element converter to collections
//! - [`JsonConverter`] for structured values stored as JSON text
//! - [`CallbackConverter`] built from a pair of closures

pub mod collection;
pub mod enums;
pub mod errors;
pub mod json;
pub mod numeric;
pub mod temporal;

use std::{marker::PhantomData, sync::Arc};

pub use collection::CollectionConverter;
pub use enums::{EnumByName, EnumByOrdinal, EnumValue};
pub use errors::ConversionError;
pub use json::JsonConverter;
pub use numeric::NumericBooleanConverter;
pub use temporal::{LocalDateConverter, LocalDateTimeConverter, LocalTimeConverter};

use crate::{
    config::TemporalType,
    value::{PropertyValue, ValueType},
};

/// Bidirectional mapping between a property type `T` and a model type `M`.
///
/// Both directions are pure. `None` stands for "no value"; most converters map
/// it to `None`, but a converter may give absence a meaning (the numeric boolean
/// converter reads a missing number as `false`).
pub trait PropertyValueConverter<T, M>: Send + Sync {
    /// Maps a model value to the property type.
    fn from_model(&self, value: Option<&M>) -> Result<Option<T>, ConversionError>;

    /// Maps a property value to the model type.
    fn to_model(&self, value: Option<&T>) -> Result<Option<M>, ConversionError>;

    /// Temporal granularity of the property values, for temporal converters.
    fn temporal_type(&self) -> Option<TemporalType> {
        None
    }
}

/// Type-erased converter as attached to a property.
pub trait AnyConverter: Send + Sync {
    /// Type of the property values.
    fn property_type(&self) -> ValueType;

    /// Type of the model values.
    fn model_type(&self) -> ValueType;

    /// Maps an erased model value to the property type.
    ///
    /// Fails with [`ConversionError::InvalidModelType`] if `value` is not of the
    /// model type.
    fn from_model_dyn(
        &self,
        value: Option<&dyn PropertyValue>,
    ) -> Result<Option<Arc<dyn PropertyValue>>, ConversionError>;

    /// Maps an erased property value to the model type.
    fn to_model_dyn(
        &self,
        value: Option<&dyn PropertyValue>,
    ) -> Result<Option<Arc<dyn PropertyValue>>, ConversionError>;

    /// Temporal granularity declared by the underlying converter.
    fn temporal_type(&self) -> Option<TemporalType>;
}

pub(crate) struct TypedConverter<T, M, C> {
    converter: C,
    _marker: PhantomData<fn(T) -> M>,
}

impl<T, M, C> TypedConverter<T, M, C> {
    pub(crate) fn new(converter: C) -> Self {
        Self {
            converter,
            _marker: PhantomData,
        }
    }
}

fn downcast<V: PropertyValue>(value: Option<&dyn PropertyValue>) -> Result<Option<&V>, ConversionError> {
    value
        .map(|v| {
            v.downcast_ref::<V>()
                .ok_or_else(|| ConversionError::InvalidModelType {
                    expected: std::any::type_name::<V>().to_string(),
                    actual: v.value_type().name().to_string(),
                })
        })
        .transpose()
}

impl<T, M, C> AnyConverter for TypedConverter<T, M, C>
where
    T: PropertyValue,
    M: PropertyValue,
    C: PropertyValueConverter<T, M>,
{
    fn property_type(&self) -> ValueType {
        ValueType::of::<T>()
    }

    fn model_type(&self) -> ValueType {
        ValueType::of::<M>()
    }

    fn from_model_dyn(
        &self,
        value: Option<&dyn PropertyValue>,
    ) -> Result<Option<Arc<dyn PropertyValue>>, ConversionError> {
        let model = downcast::<M>(value)?;
        Ok(self
            .converter
            .from_model(model)?
            .map(|v| Arc::new(v) as Arc<dyn PropertyValue>))
    }

    fn to_model_dyn(
        &self,
        value: Option<&dyn PropertyValue>,
    ) -> Result<Option<Arc<dyn PropertyValue>>, ConversionError> {
        let typed = downcast::<T>(value)?;
        Ok(self
            .converter
            .to_model(typed)?
            .map(|v| Arc::new(v) as Arc<dyn PropertyValue>))
    }

    fn temporal_type(&self) -> Option<TemporalType> {
        self.converter.temporal_type()
    }
}

/// A converter built from two closures.
///
/// `None` maps to `None` in both directions.
///
/// ```
/// use propbox::convert::{CallbackConverter, PropertyValueConverter, ConversionError};
///
/// let cents = CallbackConverter::new(
///     |m: &String| m.parse::<i64>().map_err(|e| ConversionError::failed(e.to_string())),
///     |v: &i64| Ok(v.to_string()),
/// );
/// assert_eq!(cents.from_model(Some(&"120".to_string()))?, Some(120));
/// assert_eq!(cents.to_model(Some(&5))?, Some("5".to_string()));
/// # Ok::<(), ConversionError>(())
/// ```
pub struct CallbackConverter<T, M, F, G> {
    from_model: F,
    to_model: G,
    _marker: PhantomData<fn(T) -> M>,
}

impl<T, M, F, G> CallbackConverter<T, M, F, G>
where
    F: Fn(&M) -> Result<T, ConversionError> + Send + Sync,
    G: Fn(&T) -> Result<M, ConversionError> + Send + Sync,
{
    /// Creates a converter from a model→property and a property→model function.
    pub fn new(from_model: F, to_model: G) -> Self {
        Self {
            from_model,
            to_model,
            _marker: PhantomData,
        }
    }
}

impl<T, M, F, G> PropertyValueConverter<T, M> for CallbackConverter<T, M, F, G>
where
    F: Fn(&M) -> Result<T, ConversionError> + Send + Sync,
    G: Fn(&T) -> Result<M, ConversionError> + Send + Sync,
{
    fn from_model(&self, value: Option<&M>) -> Result<Option<T>, ConversionError> {
        value.map(&self.from_model).transpose()
    }

    fn to_model(&self, value: Option<&T>) -> Result<Option<M>, ConversionError> {
        value.map(&self.to_model).transpose()
    }
}
