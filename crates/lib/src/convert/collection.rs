//! Collection converters.
//!
//! A [`CollectionConverter`] lifts an element converter to whole collections.
//! Converted elements are accumulated into a freshly obtained empty collection
//! of the target kind, so the same element converter serves list and set
//! properties alike.

use std::{collections::BTreeSet, marker::PhantomData, sync::Arc};

use super::{ConversionError, PropertyValueConverter};

type EmptyProvider<C> = Arc<dyn Fn() -> C + Send + Sync>;

/// Converts a collection of `E` to and from a collection of model elements `EM`.
///
/// `C` is the property collection type and `MC` the model collection type.
/// Absent elements produced by the element converter are skipped.
pub struct CollectionConverter<C, MC, E, EM, EC> {
    element: EC,
    empty: EmptyProvider<C>,
    empty_model: EmptyProvider<MC>,
    _marker: PhantomData<fn(E) -> EM>,
}

impl<C, MC, E, EM, EC> CollectionConverter<C, MC, E, EM, EC>
where
    EC: PropertyValueConverter<E, EM>,
{
    /// Creates a converter with explicit empty-collection providers.
    pub fn new(
        element: EC,
        empty: impl Fn() -> C + Send + Sync + 'static,
        empty_model: impl Fn() -> MC + Send + Sync + 'static,
    ) -> Self {
        Self {
            element,
            empty: Arc::new(empty),
            empty_model: Arc::new(empty_model),
            _marker: PhantomData,
        }
    }
}

impl<E, EM, EC> CollectionConverter<Vec<E>, Vec<EM>, E, EM, EC>
where
    E: 'static,
    EM: 'static,
    EC: PropertyValueConverter<E, EM>,
{
    /// Converter between `Vec<E>` properties and `Vec<EM>` models.
    pub fn list(element: EC) -> Self {
        Self::new(element, Vec::new, Vec::new)
    }
}

impl<E, EM, EC> CollectionConverter<BTreeSet<E>, BTreeSet<EM>, E, EM, EC>
where
    E: Ord + 'static,
    EM: Ord + 'static,
    EC: PropertyValueConverter<E, EM>,
{
    /// Converter between `BTreeSet<E>` properties and `BTreeSet<EM>` models.
    pub fn set(element: EC) -> Self {
        Self::new(element, BTreeSet::new, BTreeSet::new)
    }
}

impl<C, MC, E, EM, EC> PropertyValueConverter<C, MC> for CollectionConverter<C, MC, E, EM, EC>
where
    C: Extend<E>,
    MC: Extend<EM>,
    for<'a> &'a C: IntoIterator<Item = &'a E>,
    for<'a> &'a MC: IntoIterator<Item = &'a EM>,
    EC: PropertyValueConverter<E, EM>,
{
    fn from_model(&self, value: Option<&MC>) -> Result<Option<C>, ConversionError> {
        let Some(model) = value else {
            return Ok(None);
        };
        let mut collection = (self.empty)();
        for element in model {
            if let Some(converted) = self.element.from_model(Some(element))? {
                collection.extend(std::iter::once(converted));
            }
        }
        Ok(Some(collection))
    }

    fn to_model(&self, value: Option<&C>) -> Result<Option<MC>, ConversionError> {
        let Some(collection) = value else {
            return Ok(None);
        };
        let mut model = (self.empty_model)();
        for element in collection {
            if let Some(converted) = self.element.to_model(Some(element))? {
                model.extend(std::iter::once(converted));
            }
        }
        Ok(Some(model))
    }
}
