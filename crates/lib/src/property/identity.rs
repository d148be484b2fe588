//! Property identity strategies.
//!
//! By default a property is only equal to itself (and to cheap handle clones of
//! itself): two properties built separately are different properties even when
//! they share a name and type. A [`PropertyIdentity`] attached at build time
//! replaces that rule with a caller-defined equality and hash.
//!
//! A strategy only applies between properties sharing it: clone one
//! [`PropertyIdentity`] into every property it is meant to equate. Properties
//! with different strategies, or without one, fall back to reference identity.

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, LazyLock},
};

use super::PropertyRef;

type EqualsFn = dyn Fn(&PropertyRef, &PropertyRef) -> bool + Send + Sync;
type HashFn = dyn Fn(&PropertyRef, &mut dyn Hasher) + Send + Sync;

/// Custom equality and hash for properties.
#[derive(Clone)]
pub struct PropertyIdentity {
    equals: Arc<EqualsFn>,
    hash: Arc<HashFn>,
}

impl PropertyIdentity {
    /// Creates a strategy from an equality and a hash function.
    ///
    /// Properties that are equal under `equals` must produce the same hash.
    pub fn new<E, H>(equals: E, hash: H) -> Self
    where
        E: Fn(&PropertyRef, &PropertyRef) -> bool + Send + Sync + 'static,
        H: Fn(&PropertyRef, &mut dyn Hasher) + Send + Sync + 'static,
    {
        Self {
            equals: Arc::new(equals),
            hash: Arc::new(hash),
        }
    }

    /// Properties are equal when their relative names and value types are equal.
    ///
    /// Every call returns the same shared strategy.
    pub fn by_name() -> Self {
        BY_NAME.clone()
    }

    /// Returns `true` if both handles refer to the same strategy.
    pub fn is_same(&self, other: &PropertyIdentity) -> bool {
        Arc::ptr_eq(&self.equals, &other.equals)
    }

    pub(crate) fn equals(&self, a: &PropertyRef, b: &PropertyRef) -> bool {
        (self.equals)(a, b)
    }

    pub(crate) fn hash(&self, property: &PropertyRef, state: &mut dyn Hasher) {
        (self.hash)(property, state)
    }
}

static BY_NAME: LazyLock<PropertyIdentity> = LazyLock::new(|| {
    PropertyIdentity::new(
        |a, b| a.relative_name() == b.relative_name() && a.value_type() == b.value_type(),
        |p, mut state| {
            p.relative_name().hash(&mut state);
            p.value_type().hash(&mut state);
        },
    )
});

impl fmt::Debug for PropertyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PropertyIdentity")
    }
}
