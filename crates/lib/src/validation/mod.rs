//! Composable value validators.
//!
//! A [`Validator<T>`] inspects an optional value and either accepts it or
//! returns a [`ValidationError`]. Validators are stateless and can be shared
//! between any number of properties. Closures with the right signature are
//! validators:
//!
//! ```
//! use propbox::validation::{Validator, ValidationError};
//!
//! let short = |v: Option<&String>| match v {
//!     Some(s) if s.len() > 3 => Err(ValidationError::new("too long")),
//!     _ => Ok(()),
//! };
//! assert!(short.validate(Some(&"abc".to_string())).is_ok());
//! assert!(short.validate(Some(&"abcd".to_string())).is_err());
//! ```
//!
//! Ready-made validators live in [`builtin`].

pub mod builtin;
pub mod errors;

use std::marker::PhantomData;

pub use builtin::*;
pub use errors::ValidationError;

use crate::value::PropertyValue;

/// A rule that accepts or rejects a candidate value.
///
/// `None` stands for "no value"; most validators accept it and leave absence
/// checks to [`builtin::not_null`].
pub trait Validator<T: ?Sized>: Send + Sync {
    /// Validates `value`.
    fn validate(&self, value: Option<&T>) -> Result<(), ValidationError>;
}

impl<T, F> Validator<T> for F
where
    T: ?Sized,
    F: Fn(Option<&T>) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(&self, value: Option<&T>) -> Result<(), ValidationError> {
        self(value)
    }
}

/// A validator built from a predicate over present values.
///
/// `None` is always accepted.
pub struct Predicate<T: ?Sized, P> {
    predicate: P,
    message: String,
    message_code: Option<String>,
    arguments: Vec<String>,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized, P> Predicate<T, P> {
    /// Sets the localization code reported on failure.
    pub fn with_code(mut self, message_code: impl Into<String>) -> Self {
        self.message_code = Some(message_code.into());
        self
    }

    /// Sets the localization arguments reported on failure.
    pub fn with_arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }
}

impl<T, P> Validator<T> for Predicate<T, P>
where
    T: ?Sized,
    P: Fn(&T) -> bool + Send + Sync,
{
    fn validate(&self, value: Option<&T>) -> Result<(), ValidationError> {
        match value {
            Some(v) if !(self.predicate)(v) => Err(ValidationError::Invalid {
                message: self.message.clone(),
                message_code: self.message_code.clone(),
                arguments: self.arguments.clone(),
            }),
            _ => Ok(()),
        }
    }
}

/// Creates a validator that fails with `message` when `predicate` returns false.
pub fn predicate<T, P>(predicate: P, message: impl Into<String>) -> Predicate<T, P>
where
    T: ?Sized,
    P: Fn(&T) -> bool + Send + Sync,
{
    Predicate {
        predicate,
        message: message.into(),
        message_code: None,
        arguments: Vec::new(),
        _marker: PhantomData,
    }
}

/// Runs every inner validator and reports all failures together.
pub struct AllOf<T: ?Sized> {
    validators: Vec<Box<dyn Validator<T>>>,
}

impl<T: ?Sized> Validator<T> for AllOf<T> {
    fn validate(&self, value: Option<&T>) -> Result<(), ValidationError> {
        let failures = self
            .validators
            .iter()
            .filter_map(|v| v.validate(value).err())
            .collect();
        ValidationError::from_failures(failures)
    }
}

/// Composes validators; failures are collected, never short-circuited.
pub fn all_of<T: ?Sized>(validators: Vec<Box<dyn Validator<T>>>) -> AllOf<T> {
    AllOf { validators }
}

/// Type-erased validator attached to a property descriptor.
pub(crate) trait ErasedValidator: Send + Sync {
    /// Validates an erased value, reporting [`ValidationError::UnsupportedType`]
    /// when the value is not of the validator's type.
    fn validate_dyn(&self, value: Option<&dyn PropertyValue>) -> Result<(), ValidationError>;
}

pub(crate) struct TypedValidator<T, V> {
    validator: V,
    _marker: PhantomData<fn(&T)>,
}

impl<T, V> TypedValidator<T, V> {
    pub(crate) fn new(validator: V) -> Self {
        Self {
            validator,
            _marker: PhantomData,
        }
    }
}

impl<T, V> ErasedValidator for TypedValidator<T, V>
where
    T: 'static,
    V: Validator<T>,
{
    fn validate_dyn(&self, value: Option<&dyn PropertyValue>) -> Result<(), ValidationError> {
        match value {
            None => self.validator.validate(None),
            Some(value) => match value.downcast_ref::<T>() {
                Some(typed) => self.validator.validate(Some(typed)),
                None => Err(ValidationError::UnsupportedType {
                    expected: std::any::type_name::<T>().to_string(),
                    actual: value.value_type().name().to_string(),
                }),
            },
        }
    }
}
