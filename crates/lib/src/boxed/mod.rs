//! The property box: a typed, heterogeneous value container.
//!
//! A [`PropertyBox`] is bound to one [`PropertySet`] for its whole life and
//! stores at most one value per member property. Every write goes through the
//! same pipeline:
//!
//! 1. the property must be a member of the set, and writable;
//! 2. a value of the converter's model type is converted to the property type,
//!    any other value must already have the property type;
//! 3. unless the box allows invalid values, the property validators run, and a
//!    failure leaves the box untouched;
//! 4. the value is stored, or the entry removed when the value is `None`.
//!
//! Reads of virtual properties evaluate the property's value provider against
//! the box instead of consulting stored values.
//!
//! ```
//! use propbox::{Property, PropertyBox, PropertySet, validation::not_negative};
//!
//! let name = Property::<String>::builder("name").build();
//! let seq = Property::<i64>::builder("seq").validator(not_negative()).build();
//! let set = PropertySet::builder().add(&name).add(&seq).build();
//!
//! let mut pbox = PropertyBox::builder(set)
//!     .set(&name, "test".to_string())
//!     .set(&seq, 1)
//!     .build()?;
//! assert_eq!(pbox.get_value(&name)?, Some("test".to_string()));
//!
//! assert!(pbox.set_value(&seq, -1).is_err());
//! assert_eq!(pbox.get_value(&seq)?, Some(1));
//! # Ok::<(), propbox::Error>(())
//! ```

pub mod builder;

use std::{
    collections::HashMap,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

pub use builder::PropertyBoxBuilder;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::{
    Result,
    property::{Property, PropertyError, PropertyRef},
    set::PropertySet,
    validation::ValidationError,
    value::{PropertyValue, erase},
};

pub(crate) type EqualsHandler = Arc<dyn Fn(&PropertyBox, &PropertyBox) -> bool + Send + Sync>;
pub(crate) type HashHandler = Arc<dyn Fn(&PropertyBox, &mut dyn Hasher) + Send + Sync>;

/// A container holding one optional value per property of its property set.
///
/// Two boxes are equal when every identifier property of the set holds equal
/// values in both. Without identifiers a box is only equal to itself. Custom
/// handlers given to the builder replace both rules.
pub struct PropertyBox {
    instance_id: Uuid,
    property_set: Arc<PropertySet>,
    values: HashMap<PropertyRef, Arc<dyn PropertyValue>>,
    invalid_allowed: bool,
    equals_handler: Option<EqualsHandler>,
    hash_handler: Option<HashHandler>,
}

impl PropertyBox {
    /// Starts building a box bound to `property_set`.
    pub fn builder(property_set: impl Into<Arc<PropertySet>>) -> PropertyBoxBuilder {
        PropertyBoxBuilder::new(property_set.into())
    }

    /// An empty box bound to `property_set`.
    pub fn create(property_set: impl Into<Arc<PropertySet>>) -> Self {
        Self::empty(property_set.into())
    }

    pub(crate) fn empty(property_set: Arc<PropertySet>) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            property_set,
            values: HashMap::new(),
            invalid_allowed: false,
            equals_handler: None,
            hash_handler: None,
        }
    }

    /// The bound property set.
    pub fn property_set(&self) -> &PropertySet {
        &self.property_set
    }

    pub(crate) fn shared_property_set(&self) -> Arc<PropertySet> {
        Arc::clone(&self.property_set)
    }

    /// Number of properties in the bound set.
    pub fn len(&self) -> usize {
        self.property_set.len()
    }

    /// Returns `true` if the bound set has no properties.
    pub fn is_empty(&self) -> bool {
        self.property_set.is_empty()
    }

    /// Returns `true` if writes skip validation.
    pub fn is_invalid_allowed(&self) -> bool {
        self.invalid_allowed
    }

    /// Enables or disables validation on write.
    pub fn set_invalid_allowed(&mut self, invalid_allowed: bool) {
        self.invalid_allowed = invalid_allowed;
    }

    /// Returns `true` if `property` is a member of the bound set.
    pub fn contains(&self, property: &PropertyRef) -> bool {
        self.property_set.contains(property)
    }

    fn check_member(&self, property: &PropertyRef) -> Result<()> {
        if self.contains(property) {
            Ok(())
        } else {
            Err(PropertyError::NotFound {
                property: property.to_string(),
            }
            .into())
        }
    }

    /// Reads the value of `property`.
    ///
    /// Fails with [`PropertyError::NotFound`] for non-members. Virtual
    /// properties are evaluated against this box.
    pub fn get_value<T: PropertyValue + Clone>(&self, property: &Property<T>) -> Result<Option<T>> {
        let Some(value) = self.get_value_dyn(property)? else {
            return Ok(None);
        };
        match value.downcast_ref::<T>() {
            Some(typed) => Ok(Some(typed.clone())),
            None => Err(PropertyError::TypeMismatch {
                property: property.to_string(),
                expected: property.value_type().name().to_string(),
                actual: value.value_type().name().to_string(),
            }
            .into()),
        }
    }

    /// Reads the erased value of `property`.
    pub fn get_value_dyn(&self, property: &PropertyRef) -> Result<Option<Arc<dyn PropertyValue>>> {
        self.check_member(property)?;
        if property.is_virtual() {
            return property.evaluate(self);
        }
        match self.values.get(property) {
            Some(value) => {
                property.check_type(value.as_ref())?;
                Ok(Some(Arc::clone(value)))
            }
            None => Ok(None),
        }
    }

    /// Reads the value of `property` in its model form.
    ///
    /// Without a converter the model form is the value itself.
    pub fn get_model_value<M: PropertyValue + Clone>(&self, property: &PropertyRef) -> Result<Option<M>> {
        let Some(model) = self.get_model_value_dyn(property)? else {
            return Ok(None);
        };
        match model.downcast_ref::<M>() {
            Some(typed) => Ok(Some(typed.clone())),
            None => Err(PropertyError::TypeMismatch {
                property: property.to_string(),
                expected: std::any::type_name::<M>().to_string(),
                actual: model.value_type().name().to_string(),
            }
            .into()),
        }
    }

    /// Reads the erased model value of `property`.
    pub fn get_model_value_dyn(
        &self,
        property: &PropertyRef,
    ) -> Result<Option<Arc<dyn PropertyValue>>> {
        let value = self.get_value_dyn(property)?;
        match property.converter() {
            Some(converter) => Ok(converter.to_model_dyn(value.as_deref())?),
            None => Ok(value),
        }
    }

    /// Returns `true` if `property` is a member and currently has a value.
    ///
    /// A virtual property has a value when its provider returns one. Provider
    /// failures count as no value.
    pub fn contains_value(&self, property: &PropertyRef) -> bool {
        if !self.contains(property) {
            return false;
        }
        if !property.is_virtual() {
            return self.values.contains_key(property);
        }
        match property.evaluate(self) {
            Ok(value) => value.is_some(),
            Err(err) => {
                warn!(property = %property, error = %err, "Virtual property evaluation failed");
                false
            }
        }
    }

    /// Writes `value` to `property`. `None` removes the current value.
    ///
    /// Fails with [`PropertyError::ReadOnly`] on read-only properties.
    pub fn set_value<T: PropertyValue>(
        &mut self,
        property: &Property<T>,
        value: impl Into<Option<T>>,
    ) -> Result<()> {
        self.set_value_dyn(property, value.into().map(erase), false)
    }

    /// Writes `value` to `property` even if the property is read-only.
    ///
    /// Virtual properties still reject writes.
    pub fn set_value_ignore_read_only<T: PropertyValue>(
        &mut self,
        property: &Property<T>,
        value: impl Into<Option<T>>,
    ) -> Result<()> {
        self.set_value_dyn(property, value.into().map(erase), true)
    }

    /// Writes an erased value.
    ///
    /// A value of the converter's model type is converted first; any other
    /// value must be of the property type.
    pub fn set_value_dyn(
        &mut self,
        property: &PropertyRef,
        value: Option<Arc<dyn PropertyValue>>,
        ignore_read_only: bool,
    ) -> Result<()> {
        self.check_writable(property, ignore_read_only)?;
        let value = match (value, property.converter()) {
            (Some(value), Some(converter)) if converter.model_type().is_instance(value.as_ref()) => {
                converter.from_model_dyn(Some(value.as_ref()))?
            }
            (value, _) => value,
        };
        self.store(property, value)
    }

    /// Writes a model value, converting it with the property converter.
    ///
    /// Without a converter the model value is written as is. `None` removes the
    /// current value without consulting the converter; a bare `None` needs the
    /// model type spelled out (`set_model_value::<i64>(&p, None)`), or use
    /// [`clear_value`](Self::clear_value).
    pub fn set_model_value<M: PropertyValue>(
        &mut self,
        property: &PropertyRef,
        value: impl Into<Option<M>>,
    ) -> Result<()> {
        self.check_writable(property, false)?;
        let Some(model) = value.into().map(erase) else {
            return self.store(property, None);
        };
        let value = match property.converter() {
            Some(converter) => converter.from_model_dyn(Some(model.as_ref()))?,
            None => Some(model),
        };
        self.store(property, value)
    }

    /// Removes the value of `property`.
    ///
    /// Fails like any other write on non-members and read-only properties.
    pub fn clear_value(&mut self, property: &PropertyRef) -> Result<()> {
        self.set_value_dyn(property, None, false)
    }

    fn check_writable(&self, property: &PropertyRef, ignore_read_only: bool) -> Result<()> {
        self.check_member(property)?;
        if property.is_virtual() || (property.is_read_only() && !ignore_read_only) {
            return Err(PropertyError::ReadOnly {
                property: property.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn store(&mut self, property: &PropertyRef, value: Option<Arc<dyn PropertyValue>>) -> Result<()> {
        if let Some(value) = &value {
            property.check_type(value.as_ref())?;
        }
        if !self.invalid_allowed {
            if let Err(err) = property.validate_value(value.as_deref()) {
                debug!(property = %property, error = %err, "Rejected invalid value");
                return Err(err.into());
            }
        }
        match value {
            Some(value) => {
                trace!(property = %property, "Storing value");
                self.values.insert(property.clone(), value);
            }
            None => {
                trace!(property = %property, "Clearing value");
                self.values.remove(property);
            }
        }
        Ok(())
    }

    /// Validates the current value of every property.
    ///
    /// Read failures are returned as is. Validation failures of all properties
    /// are aggregated.
    pub fn validate(&self) -> Result<()> {
        let mut failures = Vec::new();
        for property in self.property_set.iter() {
            let value = self.get_value_dyn(property)?;
            if let Err(err) = property.validate_value(value.as_deref()) {
                failures.push(err);
            }
        }
        Ok(ValidationError::from_failures(failures)?)
    }

    /// Returns `true` if [`PropertyBox::validate`] succeeds.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Stored values in property set order. Virtual properties are not included.
    pub fn property_values(&self) -> impl Iterator<Item = (&PropertyRef, &Arc<dyn PropertyValue>)> {
        self.property_set
            .iter()
            .filter_map(|p| self.values.get(p).map(|v| (p, v)))
    }

    /// A new box with the same property set, values and settings.
    pub fn duplicate(&self) -> PropertyBox {
        PropertyBox {
            instance_id: Uuid::new_v4(),
            property_set: Arc::clone(&self.property_set),
            values: self.values.clone(),
            invalid_allowed: self.invalid_allowed,
            equals_handler: self.equals_handler.clone(),
            hash_handler: self.hash_handler.clone(),
        }
    }

    /// A new box bound to `property_set`, holding this box's values for the
    /// properties both sets share.
    ///
    /// Read-only properties are copied; values are validated unless this box
    /// allows invalid values.
    pub fn duplicate_into(&self, property_set: impl Into<Arc<PropertySet>>) -> Result<PropertyBox> {
        PropertyBox::builder(property_set)
            .invalid_allowed(self.invalid_allowed)
            .copy_values(self)
            .build()
    }

    fn identifier_equals(&self, other: &PropertyBox) -> bool {
        let identifiers = self.property_set.identifiers();
        if identifiers.is_empty() {
            return self.instance_id == other.instance_id;
        }
        identifiers.iter().all(|id| {
            match (self.get_value_dyn(id), other.get_value_dyn(id)) {
                (Ok(a), Ok(b)) => match (a, b) {
                    (Some(a), Some(b)) => a.eq_value(b.as_ref()),
                    (None, None) => true,
                    _ => false,
                },
                (Err(err), _) | (_, Err(err)) => {
                    warn!(property = %id, error = %err, "Identifier read failed during comparison");
                    false
                }
            }
        })
    }

    fn identifier_hash(&self, mut state: &mut dyn Hasher) {
        let identifiers = self.property_set.identifiers();
        if identifiers.is_empty() {
            self.instance_id.hash(&mut state);
            return;
        }
        for id in identifiers {
            match self.get_value_dyn(id) {
                Ok(Some(value)) => {
                    1u8.hash(&mut state);
                    value.hash_value(state);
                }
                Ok(None) => 0u8.hash(&mut state),
                Err(err) => {
                    warn!(property = %id, error = %err, "Identifier read failed during hashing");
                    0u8.hash(&mut state);
                }
            }
        }
    }
}

impl PartialEq for PropertyBox {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match &self.equals_handler {
            Some(handler) => handler(self, other),
            None => self.identifier_equals(other),
        }
    }
}

impl Eq for PropertyBox {}

impl Hash for PropertyBox {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.hash_handler {
            Some(handler) => handler(self, state),
            None => self.identifier_hash(state),
        }
    }
}

impl fmt::Debug for PropertyBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.property_values().map(|(p, v)| (p.relative_name(), v)))
            .finish()
    }
}
