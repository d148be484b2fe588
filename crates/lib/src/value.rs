//! Type-erased property values.
//!
//! A [`crate::PropertyBox`] stores values of many different types side by side.
//! Each stored value is held as an `Arc<dyn PropertyValue>`, which keeps enough
//! runtime information to downcast back to the concrete type, compare two values
//! of unknown type and hash a value without knowing its type statically.
//!
//! [`PropertyValue`] is implemented automatically for every type that is
//! `Any + Clone + PartialEq + Hash + Debug + Send + Sync`, so `String`, the
//! integer types, `bool`, `chrono` dates, collections of those and user enums
//! deriving the usual traits all qualify without extra code.

use std::{
    any::{Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Object-safe view over a value stored in a property box.
pub trait PropertyValue: Any + fmt::Debug + Send + Sync + 'static {
    /// Returns the value as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Runtime type descriptor of the concrete value.
    fn value_type(&self) -> ValueType;

    /// Compares against another erased value. Values of different types are never equal.
    fn eq_value(&self, other: &dyn PropertyValue) -> bool;

    /// Feeds the value into `state`.
    fn hash_value(&self, state: &mut dyn Hasher);

    /// Clones the value behind a fresh `Arc`.
    fn clone_value(&self) -> Arc<dyn PropertyValue>;
}

impl<T> PropertyValue for T
where
    T: Any + Clone + PartialEq + Hash + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn value_type(&self) -> ValueType {
        ValueType::of::<T>()
    }

    fn eq_value(&self, other: &dyn PropertyValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn hash_value(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }

    fn clone_value(&self) -> Arc<dyn PropertyValue> {
        Arc::new(self.clone())
    }
}

impl dyn PropertyValue {
    /// Returns `true` if the concrete value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts to a reference of the concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for dyn PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        self.eq_value(other)
    }
}

/// Runtime descriptor of a value type: its `TypeId` plus a readable name.
///
/// Two descriptors are equal when their `TypeId`s are equal; the name is only
/// used in diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// Descriptor for `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId` of the described type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if `value` is an instance of the described type.
    pub fn is_instance(&self, value: &dyn PropertyValue) -> bool {
        value.as_any().type_id() == self.id
    }

    /// Returns `true` if this descriptor describes `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl Hash for ValueType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Wraps a concrete value into the erased form stored by property boxes.
pub fn erase<T: PropertyValue>(value: T) -> Arc<dyn PropertyValue> {
    Arc::new(value)
}
