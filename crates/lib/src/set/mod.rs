//! Property sets.
//!
//! A [`PropertySet`] is the schema of a [`crate::PropertyBox`]: an ordered,
//! duplicate-free list of properties, a subset of them marked as identifiers,
//! and a [`Configuration`] shared by the whole set.
//!
//! Sets are built once and never mutated. Every derived set (joining, extending
//! with more properties) is a new value.

pub mod errors;

use std::slice;

pub use errors::PropertySetError;
use tracing::trace;

use crate::{
    config::{ConfigParam, Configuration, ConfigurationBuilder},
    property::PropertyRef,
};

/// Builds a [`PropertySet`] from a list of properties.
///
/// Accepts anything a `PropertyRef` can be built from by reference, so typed
/// properties of different value types can be mixed.
///
/// ```
/// use propbox::{Property, property_set};
///
/// let name = Property::<String>::builder("name").build();
/// let seq = Property::<i64>::builder("seq").build();
/// let set = property_set![name, seq];
/// assert_eq!(set.len(), 2);
/// ```
#[macro_export]
macro_rules! property_set {
    ($($property:expr),* $(,)?) => {
        $crate::PropertySet::of([$($crate::PropertyRef::from(&$property)),*])
    };
}

/// An ordered, immutable collection of properties.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    properties: Vec<PropertyRef>,
    identifiers: Vec<PropertyRef>,
    configuration: Configuration,
}

impl PropertySet {
    /// Starts building a set.
    pub fn builder() -> PropertySetBuilder {
        PropertySetBuilder::default()
    }

    /// A set made of `properties`, without identifiers or configuration.
    pub fn of<I, P>(properties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PropertyRef>,
    {
        Self::builder().add_all(properties).build()
    }

    /// A builder seeded with this set's members, identifiers and configuration.
    pub fn to_builder(&self) -> PropertySetBuilder {
        PropertySetBuilder::default().add_set(self)
    }

    /// A new set with this set's content followed by `properties`.
    pub fn with<I, P>(&self, properties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PropertyRef>,
    {
        self.to_builder().add_all(properties).build()
    }

    /// A new set with the members, identifiers and configuration of both sets.
    ///
    /// Members of `other` already present here are skipped; configuration
    /// parameters of `other` win on conflict.
    pub fn join(&self, other: &PropertySet) -> Self {
        self.to_builder().add_set(other).build()
    }

    /// Returns `true` if `property` is a member.
    pub fn contains(&self, property: &PropertyRef) -> bool {
        self.properties.contains(property)
    }

    /// Returns `true` if every property of `other` is a member.
    pub fn contains_all(&self, other: &PropertySet) -> bool {
        other.iter().all(|p| self.contains(p))
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, PropertyRef> {
        self.properties.iter()
    }

    /// Identifier properties in declaration order.
    pub fn identifiers(&self) -> &[PropertyRef] {
        &self.identifiers
    }

    /// The first identifier, if any.
    pub fn first_identifier(&self) -> Option<&PropertyRef> {
        self.identifiers.first()
    }

    /// Returns `true` if `property` is one of the identifiers.
    pub fn is_identifier(&self, property: &PropertyRef) -> bool {
        self.identifiers.contains(property)
    }

    /// The first member whose relative name is `name`.
    pub fn property_by_name(&self, name: &str) -> Option<&PropertyRef> {
        self.properties.iter().find(|p| p.relative_name() == name)
    }

    /// Set configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = &'a PropertyRef;
    type IntoIter = slice::Iter<'a, PropertyRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for [`PropertySet`].
#[derive(Default)]
pub struct PropertySetBuilder {
    properties: Vec<PropertyRef>,
    identifiers: Vec<PropertyRef>,
    configuration: ConfigurationBuilder,
}

impl PropertySetBuilder {
    /// Appends a property. Adding a property already present does nothing.
    pub fn add(mut self, property: impl Into<PropertyRef>) -> Self {
        let property = property.into();
        if self.properties.contains(&property) {
            trace!(property = %property, "Property already in set");
        } else {
            self.properties.push(property);
        }
        self
    }

    /// Appends several properties.
    pub fn add_all<I, P>(self, properties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PropertyRef>,
    {
        properties.into_iter().fold(self, |builder, p| builder.add(p))
    }

    /// Copies members, identifiers and configuration of `set`.
    pub fn add_set(mut self, set: &PropertySet) -> Self {
        for property in set.iter() {
            self = self.add(property.clone());
        }
        for identifier in set.identifiers() {
            if !self.identifiers.contains(identifier) {
                self.identifiers.push(identifier.clone());
            }
        }
        self.configuration = self.configuration.merge(set.configuration());
        self
    }

    /// Removes a property, and its identifier mark if any.
    pub fn remove(mut self, property: &PropertyRef) -> Self {
        self.properties.retain(|p| p != property);
        self.identifiers.retain(|p| p != property);
        self
    }

    /// Marks a member as identifier.
    ///
    /// Fails with [`PropertySetError::NotMember`] if `property` has not been added.
    pub fn identifier(mut self, property: impl Into<PropertyRef>) -> Result<Self, PropertySetError> {
        let property = property.into();
        if !self.properties.contains(&property) {
            return Err(PropertySetError::NotMember {
                property: property.to_string(),
            });
        }
        if !self.identifiers.contains(&property) {
            self.identifiers.push(property);
        }
        Ok(self)
    }

    /// Marks several members as identifiers.
    pub fn identifiers<I, P>(self, properties: I) -> Result<Self, PropertySetError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PropertyRef>,
    {
        properties
            .into_iter()
            .try_fold(self, |builder, p| builder.identifier(p))
    }

    /// Sets a configuration parameter.
    pub fn configuration<T>(mut self, param: &ConfigParam<T>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.configuration.set(param, value);
        self
    }

    /// Freezes the set.
    pub fn build(self) -> PropertySet {
        PropertySet {
            properties: self.properties,
            identifiers: self.identifiers,
            configuration: self.configuration.build(),
        }
    }
}
