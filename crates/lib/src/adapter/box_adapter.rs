//! Path-based reads and writes on a property box.

use std::sync::Arc;

use super::PathPropertySetAdapter;
use crate::{
    Result,
    boxed::PropertyBox,
    path::Path,
    property::{PropertyError, PropertyRef},
    value::{PropertyValue, erase},
};

/// Reads and writes the values of a [`PropertyBox`] by path.
///
/// Writes go through the box's regular pipeline, so model values are converted
/// and validated exactly as with direct property access.
pub struct PathPropertyBoxAdapter<'a> {
    adapter: PathPropertySetAdapter,
    pbox: &'a mut PropertyBox,
}

impl<'a> PathPropertyBoxAdapter<'a> {
    /// Wraps `pbox`, resolving paths with the default policies.
    pub fn create(pbox: &'a mut PropertyBox) -> Self {
        let adapter = PathPropertySetAdapter::create(pbox.shared_property_set());
        Self { adapter, pbox }
    }

    /// Wraps `pbox`, resolving paths with `adapter`.
    ///
    /// `adapter` is expected to be built on the box's property set; paths
    /// resolving to other properties fail as not found on access.
    pub fn with_adapter(adapter: PathPropertySetAdapter, pbox: &'a mut PropertyBox) -> Self {
        Self { adapter, pbox }
    }

    /// The wrapped box.
    pub fn property_box(&self) -> &PropertyBox {
        self.pbox
    }

    /// The path resolver.
    pub fn adapter(&self) -> &PathPropertySetAdapter {
        &self.adapter
    }

    fn resolve(&self, path: &Path) -> Result<PropertyRef> {
        self.adapter.property(path).ok_or_else(|| {
            PropertyError::NotFound {
                property: path.to_string(),
            }
            .into()
        })
    }

    /// Returns `true` if `path` resolves to a property holding a value.
    pub fn contains_value(&self, path: &Path) -> bool {
        self.adapter
            .property(path)
            .is_some_and(|property| self.pbox.contains_value(&property))
    }

    /// Reads the erased value at `path`.
    pub fn get_value_dyn(&self, path: &Path) -> Result<Option<Arc<dyn PropertyValue>>> {
        let property = self.resolve(path)?;
        self.pbox.get_value_dyn(&property)
    }

    /// Reads the value at `path` as a `T`.
    pub fn get_value<T: PropertyValue + Clone>(&self, path: &Path) -> Result<Option<T>> {
        let property = self.adapter.typed_property::<T>(path)?.ok_or_else(|| {
            PropertyError::NotFound {
                property: path.to_string(),
            }
        })?;
        self.pbox.get_value(&property)
    }

    /// Writes an erased value at `path`.
    pub fn set_value_dyn(&mut self, path: &Path, value: Option<Arc<dyn PropertyValue>>) -> Result<()> {
        let property = self.resolve(path)?;
        self.pbox.set_value_dyn(&property, value, false)
    }

    /// Writes `value` at `path`. The value may be of the property type or of
    /// its converter's model type.
    pub fn set_value<V: PropertyValue>(&mut self, path: &Path, value: impl Into<Option<V>>) -> Result<()> {
        self.set_value_dyn(path, value.into().map(erase))
    }
}
