//! Builder for [`PropertyBox`].

use std::{hash::Hasher, sync::Arc};

use super::{EqualsHandler, HashHandler, PropertyBox};
use crate::{
    Result,
    property::{Property, PropertyRef},
    set::PropertySet,
    value::{PropertyValue, erase},
};

struct PendingWrite {
    property: PropertyRef,
    value: Option<Arc<dyn PropertyValue>>,
    ignore_read_only: bool,
}

/// Collects initial values and settings, then builds a [`PropertyBox`].
///
/// Initial values go through the regular write pipeline when [`build`] runs,
/// so the first failing write aborts the build.
///
/// [`build`]: PropertyBoxBuilder::build
pub struct PropertyBoxBuilder {
    property_set: Arc<PropertySet>,
    pending: Vec<PendingWrite>,
    invalid_allowed: bool,
    equals_handler: Option<EqualsHandler>,
    hash_handler: Option<HashHandler>,
}

impl PropertyBoxBuilder {
    pub(crate) fn new(property_set: Arc<PropertySet>) -> Self {
        Self {
            property_set,
            pending: Vec::new(),
            invalid_allowed: false,
            equals_handler: None,
            hash_handler: None,
        }
    }

    /// Sets an initial value.
    pub fn set<T: PropertyValue>(mut self, property: &Property<T>, value: impl Into<Option<T>>) -> Self {
        self.pending.push(PendingWrite {
            property: property.erased().clone(),
            value: value.into().map(erase),
            ignore_read_only: false,
        });
        self
    }

    /// Sets an initial value, even on a read-only property.
    pub fn set_ignore_read_only<T: PropertyValue>(
        mut self,
        property: &Property<T>,
        value: impl Into<Option<T>>,
    ) -> Self {
        self.pending.push(PendingWrite {
            property: property.erased().clone(),
            value: value.into().map(erase),
            ignore_read_only: true,
        });
        self
    }

    /// Sets an initial erased value.
    pub fn set_dyn(
        mut self,
        property: &PropertyRef,
        value: Option<Arc<dyn PropertyValue>>,
        ignore_read_only: bool,
    ) -> Self {
        self.pending.push(PendingWrite {
            property: property.clone(),
            value,
            ignore_read_only,
        });
        self
    }

    /// Copies the stored values of `source` for every property of this
    /// builder's set, read-only ones included.
    pub fn copy_values(mut self, source: &PropertyBox) -> Self {
        for (property, value) in source.property_values() {
            if self.property_set.contains(property) {
                self.pending.push(PendingWrite {
                    property: property.clone(),
                    value: Some(Arc::clone(value)),
                    ignore_read_only: true,
                });
            }
        }
        self
    }

    /// Disables validation, for the initial values too.
    pub fn invalid_allowed(mut self, invalid_allowed: bool) -> Self {
        self.invalid_allowed = invalid_allowed;
        self
    }

    /// Replaces the identifier-based equality.
    pub fn equals_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&PropertyBox, &PropertyBox) -> bool + Send + Sync + 'static,
    {
        self.equals_handler = Some(Arc::new(handler));
        self
    }

    /// Replaces the identifier-based hash.
    pub fn hash_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&PropertyBox, &mut dyn Hasher) + Send + Sync + 'static,
    {
        self.hash_handler = Some(Arc::new(handler));
        self
    }

    /// Builds the box, applying initial values in the order they were given.
    pub fn build(self) -> Result<PropertyBox> {
        let mut pbox = PropertyBox::empty(self.property_set);
        pbox.invalid_allowed = self.invalid_allowed;
        pbox.equals_handler = self.equals_handler;
        pbox.hash_handler = self.hash_handler;
        for write in self.pending {
            pbox.set_value_dyn(&write.property, write.value, write.ignore_read_only)?;
        }
        Ok(pbox)
    }
}
