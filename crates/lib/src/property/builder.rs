//! Builders for path and virtual properties.

use std::{marker::PhantomData, sync::Arc};

use uuid::Uuid;

use super::{
    Attributes, Property, PropertyDef, PropertyError, PropertyIdentity, PropertyKind,
    ValueProvider, virtual_name,
};
use crate::{
    boxed::PropertyBox,
    config::{ConfigParam, TEMPORAL_TYPE},
    convert::{AnyConverter, PropertyValueConverter, TypedConverter},
    path::Path,
    validation::{TypedValidator, Validator},
    value::{PropertyValue, ValueType, erase},
};

impl Attributes {
    fn set_converter(&mut self, converter: Arc<dyn AnyConverter>) {
        if let Some(temporal) = converter.temporal_type() {
            self.configuration = self
                .configuration
                .to_builder()
                .with(&TEMPORAL_TYPE, temporal)
                .build();
        }
        self.converter = Some(converter);
    }
}

// Setters shared by both builders.
macro_rules! attribute_setters {
    () => {
        /// Attaches a converter between the property type and model type `M`.
        ///
        /// Temporal converters also record [`TEMPORAL_TYPE`] in the property
        /// configuration.
        pub fn converter<M, C>(mut self, converter: C) -> Self
        where
            M: PropertyValue,
            C: PropertyValueConverter<T, M> + 'static,
        {
            self.attributes
                .set_converter(Arc::new(TypedConverter::<T, M, C>::new(converter)));
            self
        }

        /// Removes the converter.
        pub fn without_converter(mut self) -> Self {
            self.attributes.converter = None;
            self
        }

        /// Adds a validator for property values.
        pub fn validator<V>(mut self, validator: V) -> Self
        where
            V: Validator<T> + 'static,
        {
            self.attributes
                .validators
                .push(Arc::new(TypedValidator::<T, V>::new(validator)));
            self
        }

        /// Adds a validator that inspects the model value produced by the converter.
        pub fn model_validator<M, V>(mut self, validator: V) -> Self
        where
            M: PropertyValue,
            V: Validator<M> + 'static,
        {
            self.attributes
                .validators
                .push(Arc::new(TypedValidator::<M, V>::new(validator)));
            self
        }

        /// Removes every validator.
        pub fn without_validators(mut self) -> Self {
            self.attributes.validators.clear();
            self
        }

        /// Sets the default description message.
        pub fn message(mut self, message: impl Into<String>) -> Self {
            self.attributes.localizable.message = Some(message.into());
            self
        }

        /// Sets the translation code of the description.
        pub fn message_code(mut self, code: impl Into<String>) -> Self {
            self.attributes.localizable.message_code = Some(code.into());
            self
        }

        /// Sets the translation arguments of the description.
        pub fn message_arguments<I, S>(mut self, arguments: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.attributes.localizable.arguments =
                arguments.into_iter().map(Into::into).collect();
            self
        }

        /// Sets a configuration parameter.
        pub fn configuration<P>(mut self, param: &ConfigParam<P>, value: P) -> Self
        where
            P: Send + Sync + 'static,
        {
            self.attributes.configuration = self
                .attributes
                .configuration
                .to_builder()
                .with(param, value)
                .build();
            self
        }

        /// Replaces reference identity with a custom strategy.
        pub fn identity(mut self, identity: PropertyIdentity) -> Self {
            self.attributes.identity = Some(identity);
            self
        }
    };
}

/// Builder for path properties.
pub struct PropertyBuilder<T> {
    name: String,
    parent: Option<Path>,
    final_path: bool,
    attributes: Attributes,
    _marker: PhantomData<fn() -> T>,
}

impl<T: PropertyValue> PropertyBuilder<T> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            final_path: false,
            attributes: Attributes::default(),
            _marker: PhantomData,
        }
    }

    attribute_setters!();

    /// Sets the parent path.
    ///
    /// Fails with [`PropertyError::InvalidParent`] on a final path.
    pub fn parent(mut self, parent: Path) -> Result<Self, PropertyError> {
        if self.final_path {
            return Err(PropertyError::InvalidParent {
                property: self.name,
                reason: "path is final".to_string(),
            });
        }
        self.parent = Some(parent);
        Ok(self)
    }

    /// Marks the path as final: it will never have a parent.
    ///
    /// Fails with [`PropertyError::InvalidParent`] if a parent is already set.
    pub fn final_path(mut self) -> Result<Self, PropertyError> {
        if self.parent.is_some() {
            return Err(PropertyError::InvalidParent {
                property: self.name,
                reason: "a parent is already set".to_string(),
            });
        }
        self.final_path = true;
        Ok(self)
    }

    /// Marks the property read-only.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.attributes.read_only = read_only;
        self
    }

    /// Freezes the property.
    pub fn build(self) -> Property<T> {
        Property::from_def(PropertyDef {
            id: Uuid::new_v4(),
            name: self.name,
            kind: PropertyKind::Path {
                parent: self.parent,
                final_path: self.final_path,
            },
            value_type: ValueType::of::<T>(),
            attributes: self.attributes,
        })
    }
}

/// Builder for virtual properties.
pub struct VirtualPropertyBuilder<T> {
    name: Option<String>,
    provider: Option<ValueProvider>,
    attributes: Attributes,
    _marker: PhantomData<fn() -> T>,
}

impl<T: PropertyValue> VirtualPropertyBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            name: None,
            provider: None,
            attributes: Attributes::default(),
            _marker: PhantomData,
        }
    }

    attribute_setters!();

    /// Names the property. Unnamed virtual properties get a generated name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the function computing the value from the box being read.
    pub fn provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(&PropertyBox) -> crate::Result<Option<T>> + Send + Sync + 'static,
    {
        let provider: ValueProvider = Arc::new(
            move |pbox: &PropertyBox| -> crate::Result<Option<Arc<dyn PropertyValue>>> {
                Ok(provider(pbox)?.map(erase))
            },
        );
        self.provider = Some(provider);
        self
    }

    /// Freezes the property.
    pub fn build(self) -> Property<T> {
        let id = Uuid::new_v4();
        let (name, generated_name) = match self.name {
            Some(name) => (name, false),
            None => (virtual_name(&id), true),
        };
        Property::from_def(PropertyDef {
            id,
            name,
            kind: PropertyKind::Virtual {
                provider: self.provider,
                generated_name,
            },
            value_type: ValueType::of::<T>(),
            attributes: self.attributes,
        })
    }
}

/// A builder that can be seeded from an existing property, used by
/// [`Property::duplicate_with`].
pub trait DuplicateBuilder<T>: Sized {
    /// Creates a builder carrying every attribute of `property`.
    fn seed(property: &Property<T>) -> Result<Self, PropertyError>;

    /// Builds the copy.
    fn finish(self) -> Property<T>;
}

impl<T: PropertyValue> DuplicateBuilder<T> for PropertyBuilder<T> {
    fn seed(property: &Property<T>) -> Result<Self, PropertyError> {
        let def = property.def();
        match &def.kind {
            PropertyKind::Path { parent, final_path } => Ok(Self {
                name: def.name.clone(),
                parent: parent.clone(),
                final_path: *final_path,
                attributes: def.attributes.clone(),
                _marker: PhantomData,
            }),
            PropertyKind::Virtual { .. } => Err(PropertyError::KindMismatch {
                property: def.name.clone(),
                expected: "path",
                actual: "virtual",
            }),
        }
    }

    fn finish(self) -> Property<T> {
        self.build()
    }
}

impl<T: PropertyValue> DuplicateBuilder<T> for VirtualPropertyBuilder<T> {
    fn seed(property: &Property<T>) -> Result<Self, PropertyError> {
        let def = property.def();
        match &def.kind {
            PropertyKind::Virtual {
                provider,
                generated_name,
            } => Ok(Self {
                name: (!generated_name).then(|| def.name.clone()),
                provider: provider.clone(),
                attributes: def.attributes.clone(),
                _marker: PhantomData,
            }),
            PropertyKind::Path { .. } => Err(PropertyError::KindMismatch {
                property: def.name.clone(),
                expected: "virtual",
                actual: "path",
            }),
        }
    }

    fn finish(self) -> Property<T> {
        self.build()
    }
}
