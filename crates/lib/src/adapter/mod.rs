//! Path-based access to property sets and boxes.
//!
//! External data (rows, wire records, forms) usually names fields with
//! dot-joined paths. A [`PathPropertySetAdapter`] translates such a [`Path`]
//! into the matching property of a [`PropertySet`] using two policies:
//!
//! - a [`PathConverter`] turning each member property into a path (the default
//!   only handles path properties), and
//! - a [`PathMatcher`] deciding whether a member's path matches the query (the
//!   default compares relative names exactly; [`CaseInsensitivePathMatcher`]
//!   ignores case).
//!
//! Lookups are memoized per query path, misses included. The cache assumes the
//! set and both policies never change, which holds since all three are fixed
//! when the adapter is built.

pub mod box_adapter;

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

pub use box_adapter::PathPropertyBoxAdapter;
use tracing::{debug, trace};

use crate::{
    Result,
    path::Path,
    property::{Property, PropertyError, PropertyRef},
    set::PropertySet,
    value::PropertyValue,
};

/// Maps a property to the path it answers to.
pub trait PathConverter: Send + Sync {
    /// Returns the path of `property`, or `None` if it has no path form.
    fn convert(&self, property: &PropertyRef) -> Option<Path>;
}

impl<F> PathConverter for F
where
    F: Fn(&PropertyRef) -> Option<Path> + Send + Sync,
{
    fn convert(&self, property: &PropertyRef) -> Option<Path> {
        self(property)
    }
}

/// Uses the path of path properties; other properties have no path.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPathConverter;

impl PathConverter for DefaultPathConverter {
    fn convert(&self, property: &PropertyRef) -> Option<Path> {
        property.path()
    }
}

/// Decides whether a member path matches a query path.
pub trait PathMatcher: Send + Sync {
    fn matches(&self, candidate: &Path, query: &Path) -> bool;
}

impl<F> PathMatcher for F
where
    F: Fn(&Path, &Path) -> bool + Send + Sync,
{
    fn matches(&self, candidate: &Path, query: &Path) -> bool {
        self(candidate, query)
    }
}

/// Matches paths with equal relative names.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactPathMatcher;

impl PathMatcher for ExactPathMatcher {
    fn matches(&self, candidate: &Path, query: &Path) -> bool {
        candidate.relative_name() == query.relative_name()
    }
}

/// Matches paths whose relative names are equal ignoring case.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaseInsensitivePathMatcher;

impl PathMatcher for CaseInsensitivePathMatcher {
    fn matches(&self, candidate: &Path, query: &Path) -> bool {
        candidate.relative_name().to_lowercase() == query.relative_name().to_lowercase()
    }
}

/// Resolves paths to the properties of a [`PropertySet`].
///
/// ```
/// use propbox::{Path, Property, PropertySet, adapter::PathPropertySetAdapter};
///
/// let p1 = Property::<String>::builder("p1").build();
/// let p3 = Property::<i64>::builder("p3").parent(Path::new("p1"))?.build();
/// let adapter = PathPropertySetAdapter::create(PropertySet::of([p1.erased(), p3.erased()]));
///
/// assert_eq!(adapter.property(&Path::new("p1")).as_ref(), Some(p1.erased()));
/// assert_eq!(
///     adapter.property(&Path::new("p3").with_parent(Path::new("p1"))).as_ref(),
///     Some(p3.erased())
/// );
/// assert!(adapter.property(&Path::new("px")).is_none());
/// # Ok::<(), propbox::Error>(())
/// ```
pub struct PathPropertySetAdapter {
    property_set: Arc<PropertySet>,
    path_converter: Box<dyn PathConverter>,
    path_matcher: Box<dyn PathMatcher>,
    cache: RwLock<HashMap<Path, Option<PropertyRef>>>,
}

impl PathPropertySetAdapter {
    /// Starts building an adapter for `property_set`.
    pub fn builder(property_set: impl Into<Arc<PropertySet>>) -> PathPropertySetAdapterBuilder {
        PathPropertySetAdapterBuilder {
            property_set: property_set.into(),
            path_converter: Box::new(DefaultPathConverter),
            path_matcher: Box::new(ExactPathMatcher),
        }
    }

    /// An adapter with the default converter and matcher.
    pub fn create(property_set: impl Into<Arc<PropertySet>>) -> Self {
        Self::builder(property_set).build()
    }

    /// The adapted property set.
    pub fn property_set(&self) -> &PropertySet {
        &self.property_set
    }

    /// The first member whose path matches `path`.
    pub fn property(&self, path: &Path) -> Option<PropertyRef> {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache.get(path) {
                trace!(path = %path, found = cached.is_some(), "Path cache hit");
                return cached.clone();
            }
        }

        let resolved = self.resolve(path);
        debug!(path = %path, found = resolved.is_some(), "Resolved path");

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache
            .entry(path.clone())
            .or_insert_with(|| resolved.clone());
        resolved
    }

    fn resolve(&self, path: &Path) -> Option<PropertyRef> {
        self.property_set
            .iter()
            .find(|property| {
                self.path_converter
                    .convert(property)
                    .is_some_and(|candidate| self.path_matcher.matches(&candidate, path))
            })
            .cloned()
    }

    /// Looks a property up by its dot-joined name.
    ///
    /// Fails with a path error if `name` has no components.
    pub fn property_by_name(&self, name: &str) -> Result<Option<PropertyRef>> {
        let path = Path::parse(name)?;
        Ok(self.property(&path))
    }

    /// Looks a property up and checks its value type.
    ///
    /// Fails with [`PropertyError::TypeMismatch`] if the matching property is
    /// not of type `T`.
    pub fn typed_property<T: PropertyValue>(&self, path: &Path) -> Result<Option<Property<T>>> {
        let Some(property) = self.property(path) else {
            return Ok(None);
        };
        match property.downcast::<T>() {
            Some(typed) => Ok(Some(typed)),
            None => Err(PropertyError::TypeMismatch {
                property: property.to_string(),
                expected: std::any::type_name::<T>().to_string(),
                actual: property.value_type().name().to_string(),
            }
            .into()),
        }
    }

    /// Returns `true` if some member matches `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.property(path).is_some()
    }

    /// Paths of the identifier properties.
    ///
    /// Empty if the set has no identifiers, or if any identifier has no path.
    pub fn path_identifiers(&self) -> Vec<Path> {
        let paths: Option<Vec<Path>> = self
            .property_set
            .identifiers()
            .iter()
            .map(|id| self.path_converter.convert(id))
            .collect();
        paths.unwrap_or_else(|| {
            debug!("Identifier without path form, no path identifiers available");
            Vec::new()
        })
    }

    /// The path of `property` according to the path converter.
    pub fn property_path(&self, property: &PropertyRef) -> Option<Path> {
        self.path_converter.convert(property)
    }

    /// Members with a path form, in set order.
    pub fn properties(&self) -> impl Iterator<Item = (Path, &PropertyRef)> {
        self.property_set
            .iter()
            .filter_map(|p| self.path_converter.convert(p).map(|path| (path, p)))
    }
}

/// Builder for [`PathPropertySetAdapter`].
pub struct PathPropertySetAdapterBuilder {
    property_set: Arc<PropertySet>,
    path_converter: Box<dyn PathConverter>,
    path_matcher: Box<dyn PathMatcher>,
}

impl PathPropertySetAdapterBuilder {
    /// Replaces the property to path conversion.
    pub fn path_converter(mut self, converter: impl PathConverter + 'static) -> Self {
        self.path_converter = Box::new(converter);
        self
    }

    /// Replaces the path matching policy.
    pub fn path_matcher(mut self, matcher: impl PathMatcher + 'static) -> Self {
        self.path_matcher = Box::new(matcher);
        self
    }

    pub fn build(self) -> PathPropertySetAdapter {
        PathPropertySetAdapter {
            property_set: self.property_set,
            path_converter: self.path_converter,
            path_matcher: self.path_matcher,
            cache: RwLock::new(HashMap::new()),
        }
    }
}
