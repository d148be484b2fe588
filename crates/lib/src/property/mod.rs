//! Property definitions.
//!
//! A property is an immutable, typed descriptor used as a key into a
//! [`crate::PropertyBox`]. There are two kinds:
//!
//! - **Path properties** have a name and an optional parent [`Path`]; their
//!   relative name (`"address.city"`) is what path-based lookups match.
//! - **Virtual properties** never store a value. Reading one evaluates its
//!   value provider against the box being read, and writing one always fails.
//!
//! Properties are built once with a [`PropertyBuilder`] or a
//! [`VirtualPropertyBuilder`] and then shared freely; cloning a property clones
//! a handle to the same descriptor. [`Property<T>`] carries the value type
//! statically, while [`PropertyRef`] is the erased handle stored in property
//! sets and boxes.
//!
//! Equality is by reference unless a [`PropertyIdentity`] was attached at build
//! time, in which case it decides.
//!
//! ```
//! use propbox::{Path, Property, validation::not_negative};
//!
//! let address = Path::new("address");
//! let zip = Property::<i64>::builder("zip")
//!     .parent(address)?
//!     .validator(not_negative())
//!     .build();
//! assert_eq!(zip.relative_name(), "address.zip");
//! assert!(zip.validate(Some(&-1)).is_err());
//! # Ok::<(), propbox::Error>(())
//! ```

pub mod builder;
pub mod errors;
pub mod identity;

use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::Deref,
    sync::Arc,
};

pub use builder::{DuplicateBuilder, PropertyBuilder, VirtualPropertyBuilder};
pub use errors::PropertyError;
pub use identity::PropertyIdentity;
use tracing::debug;
use uuid::Uuid;

use crate::{
    boxed::PropertyBox,
    config::Configuration,
    convert::AnyConverter,
    path::Path,
    validation::{ErasedValidator, ValidationError},
    value::{PropertyValue, ValueType},
};

pub(crate) type ValueProvider =
    Arc<dyn Fn(&PropertyBox) -> crate::Result<Option<Arc<dyn PropertyValue>>> + Send + Sync>;

/// Localizable description attached to a property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Localizable {
    message: Option<String>,
    message_code: Option<String>,
    arguments: Vec<String>,
}

impl Localizable {
    /// Default message, used when no translation is available.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Translation lookup code.
    pub fn message_code(&self) -> Option<&str> {
        self.message_code.as_deref()
    }

    /// Translation arguments.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Returns `true` if neither a message nor a code is set.
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.message_code.is_none()
    }
}

/// Attributes common to every property kind.
#[derive(Clone, Default)]
pub(crate) struct Attributes {
    pub(crate) converter: Option<Arc<dyn AnyConverter>>,
    pub(crate) validators: Vec<Arc<dyn ErasedValidator>>,
    pub(crate) read_only: bool,
    pub(crate) localizable: Localizable,
    pub(crate) configuration: Configuration,
    pub(crate) identity: Option<PropertyIdentity>,
}

#[derive(Clone)]
pub(crate) enum PropertyKind {
    Path {
        parent: Option<Path>,
        final_path: bool,
    },
    Virtual {
        provider: Option<ValueProvider>,
        generated_name: bool,
    },
}

pub(crate) struct PropertyDef {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) kind: PropertyKind,
    pub(crate) value_type: ValueType,
    pub(crate) attributes: Attributes,
}

pub(crate) fn virtual_name(id: &Uuid) -> String {
    format!("$virtual:{id}")
}

/// Erased handle to a property descriptor.
///
/// Cloning is cheap and the clone is the same property.
#[derive(Clone)]
pub struct PropertyRef(Arc<PropertyDef>);

impl PropertyRef {
    pub(crate) fn new(def: PropertyDef) -> Self {
        Self(Arc::new(def))
    }

    pub(crate) fn def(&self) -> &PropertyDef {
        &self.0
    }

    /// Unique id assigned when the property was built.
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    /// The property name. Unnamed virtual properties get a generated name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Declared value type.
    pub fn value_type(&self) -> ValueType {
        self.0.value_type
    }

    /// Returns `true` for virtual properties.
    pub fn is_virtual(&self) -> bool {
        matches!(self.0.kind, PropertyKind::Virtual { .. })
    }

    /// Returns `true` for path properties.
    pub fn is_path(&self) -> bool {
        matches!(self.0.kind, PropertyKind::Path { .. })
    }

    /// Returns `true` if writes are rejected. Virtual properties are always read-only.
    pub fn is_read_only(&self) -> bool {
        self.is_virtual() || self.0.attributes.read_only
    }

    /// Parent path of a path property.
    pub fn parent(&self) -> Option<&Path> {
        match &self.0.kind {
            PropertyKind::Path { parent, .. } => parent.as_ref(),
            PropertyKind::Virtual { .. } => None,
        }
    }

    /// Returns `true` if the path property cannot be given a parent.
    pub fn is_final_path(&self) -> bool {
        matches!(
            self.0.kind,
            PropertyKind::Path {
                final_path: true,
                ..
            }
        )
    }

    /// The property as a path, for path properties.
    pub fn path(&self) -> Option<Path> {
        match &self.0.kind {
            PropertyKind::Path { parent, .. } => {
                let path = Path::new(self.0.name.clone());
                Some(match parent {
                    Some(parent) => path.with_parent(parent.clone()),
                    None => path,
                })
            }
            PropertyKind::Virtual { .. } => None,
        }
    }

    /// Dot-joined name excluding root parents. Virtual properties report their name.
    pub fn relative_name(&self) -> String {
        self.path()
            .map(|p| p.relative_name())
            .unwrap_or_else(|| self.0.name.clone())
    }

    /// Dot-joined name including root parents. Virtual properties report their name.
    pub fn full_name(&self) -> String {
        self.path()
            .map(|p| p.full_name())
            .unwrap_or_else(|| self.0.name.clone())
    }

    /// Attached converter, if any.
    pub fn converter(&self) -> Option<&dyn AnyConverter> {
        self.0.attributes.converter.as_deref()
    }

    /// Number of attached validators.
    pub fn validator_count(&self) -> usize {
        self.0.attributes.validators.len()
    }

    /// Localizable description.
    pub fn message(&self) -> &Localizable {
        &self.0.attributes.localizable
    }

    /// Property configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.0.attributes.configuration
    }

    /// Identity strategy, if one was attached.
    pub fn identity(&self) -> Option<&PropertyIdentity> {
        self.0.attributes.identity.as_ref()
    }

    /// Returns the typed handle if the declared type is `T`.
    pub fn downcast<T: PropertyValue>(&self) -> Option<Property<T>> {
        self.0.value_type.is::<T>().then(|| Property {
            inner: self.clone(),
            _marker: PhantomData,
        })
    }

    /// Runs every validator against `value` and aggregates the failures.
    ///
    /// A validator that cannot handle the property type is retried once against
    /// the model value when a converter is attached. If the conversion itself
    /// fails, the original failure is reported.
    pub fn validate_value(&self, value: Option<&dyn PropertyValue>) -> Result<(), ValidationError> {
        let mut failures = Vec::new();
        let mut model: Option<Option<Arc<dyn PropertyValue>>> = None;
        for validator in &self.0.attributes.validators {
            match validator.validate_dyn(value) {
                Ok(()) => {}
                Err(err) if err.is_unsupported_type() => {
                    let Some(converter) = self.converter() else {
                        failures.push(err);
                        continue;
                    };
                    if model.is_none() {
                        match converter.to_model_dyn(value) {
                            Ok(converted) => model = Some(converted),
                            Err(conversion) => {
                                debug!(property = %self, error = %conversion, "Model conversion for validation failed");
                                failures.push(err);
                                continue;
                            }
                        }
                    }
                    let converted = model.as_ref().and_then(|m| m.as_deref());
                    if let Err(retry) = validator.validate_dyn(converted) {
                        failures.push(retry);
                    }
                }
                Err(err) => failures.push(err),
            }
        }
        ValidationError::from_failures(failures)
    }

    /// Fails with [`PropertyError::TypeMismatch`] unless `value` has the declared type.
    pub(crate) fn check_type(&self, value: &dyn PropertyValue) -> Result<(), PropertyError> {
        if self.0.value_type.is_instance(value) {
            Ok(())
        } else {
            Err(PropertyError::TypeMismatch {
                property: self.name().to_string(),
                expected: self.0.value_type.name().to_string(),
                actual: value.value_type().name().to_string(),
            })
        }
    }

    /// Evaluates a virtual property against `pbox`.
    pub(crate) fn evaluate(
        &self,
        pbox: &PropertyBox,
    ) -> crate::Result<Option<Arc<dyn PropertyValue>>> {
        let PropertyKind::Virtual { provider, .. } = &self.0.kind else {
            return Ok(None);
        };
        let provider = provider
            .as_ref()
            .ok_or_else(|| PropertyError::MissingValueProvider {
                property: self.name().to_string(),
            })?;
        let value = provider(pbox).map_err(|source| PropertyError::ValueProvider {
            property: self.name().to_string(),
            source: Box::new(source),
        })?;
        if let Some(value) = &value {
            self.check_type(value.as_ref())?;
        }
        Ok(value)
    }

    /// Creates an independent copy with a new id and the same attributes.
    pub fn duplicate(&self) -> PropertyRef {
        PropertyRef::new(self.0.duplicate())
    }
}

impl PropertyDef {
    pub(crate) fn duplicate(&self) -> PropertyDef {
        let id = Uuid::new_v4();
        let name = match self.kind {
            PropertyKind::Virtual {
                generated_name: true,
                ..
            } => virtual_name(&id),
            _ => self.name.clone(),
        };
        PropertyDef {
            id,
            name,
            kind: self.kind.clone(),
            value_type: self.value_type,
            attributes: self.attributes.clone(),
        }
    }
}

impl PartialEq for PropertyRef {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        match (self.identity(), other.identity()) {
            (Some(identity), Some(theirs)) if identity.is_same(theirs) => {
                identity.equals(self, other)
            }
            _ => self.0.id == other.0.id,
        }
    }
}

impl Eq for PropertyRef {}

impl Hash for PropertyRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.identity() {
            Some(identity) => identity.hash(self, state),
            None => self.0.id.hash(state),
        }
    }
}

impl fmt::Debug for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.0.name)
            .field("type", &self.0.value_type.name())
            .field("virtual", &self.is_virtual())
            .field("id", &self.0.id)
            .finish()
    }
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_name())
    }
}

/// A property with value type `T`.
///
/// Dereferences to [`PropertyRef`] for everything that does not depend on `T`.
pub struct Property<T> {
    inner: PropertyRef,
    _marker: PhantomData<fn() -> T>,
}

impl<T: PropertyValue> Property<T> {
    /// Starts building a path property.
    pub fn builder(name: impl Into<String>) -> PropertyBuilder<T> {
        PropertyBuilder::new(name)
    }

    /// Starts building a virtual property.
    pub fn virtual_builder() -> VirtualPropertyBuilder<T> {
        VirtualPropertyBuilder::new()
    }

    pub(crate) fn from_def(def: PropertyDef) -> Self {
        Self {
            inner: PropertyRef::new(def),
            _marker: PhantomData,
        }
    }

    /// The erased handle.
    pub fn erased(&self) -> &PropertyRef {
        &self.inner
    }

    /// Converts into the erased handle.
    pub fn into_erased(self) -> PropertyRef {
        self.inner
    }

    /// Validates a candidate value with every attached validator.
    pub fn validate(&self, value: Option<&T>) -> Result<(), ValidationError> {
        self.inner
            .validate_value(value.map(|v| v as &dyn PropertyValue))
    }

    /// Creates an independent copy with a new id and the same attributes.
    pub fn duplicate(&self) -> Property<T> {
        Property::from_def(self.inner.0.duplicate())
    }

    /// Creates an independent copy, letting `mutator` adjust it first.
    ///
    /// The builder type selects the property kind; asking for a
    /// [`PropertyBuilder`] on a virtual property (or the reverse) fails with
    /// [`PropertyError::KindMismatch`].
    pub fn duplicate_with<B, F>(&self, mutator: F) -> crate::Result<Property<T>>
    where
        B: DuplicateBuilder<T>,
        F: FnOnce(B) -> crate::Result<B>,
    {
        let builder = B::seed(self)?;
        Ok(mutator(builder)?.finish())
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> Deref for Property<T> {
    type Target = PropertyRef;

    fn deref(&self) -> &PropertyRef {
        &self.inner
    }
}

impl<T> AsRef<PropertyRef> for Property<T> {
    fn as_ref(&self) -> &PropertyRef {
        &self.inner
    }
}

impl<T> From<Property<T>> for PropertyRef {
    fn from(property: Property<T>) -> Self {
        property.inner
    }
}

impl<T> From<&Property<T>> for PropertyRef {
    fn from(property: &Property<T>) -> Self {
        property.inner.clone()
    }
}

impl From<&PropertyRef> for PropertyRef {
    fn from(property: &PropertyRef) -> Self {
        property.clone()
    }
}

impl<T> PartialEq for Property<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Eq for Property<T> {}

impl<T> Hash for Property<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state)
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl<T> fmt::Display for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}
