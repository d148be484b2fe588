//! Hierarchical paths.
//!
//! A [`Path`] is a name with an optional parent path, forming a dot-addressable
//! hierarchy. Path properties expose their address as a `Path`, and external
//! collaborators (row mappers, wire record readers, query builders) use paths to
//! look properties up through a [`crate::adapter::PathPropertySetAdapter`].
//!
//! A path may be marked as a *root* path, which represents the container the
//! hierarchy lives in (a table, a document, a data target). Root names are part
//! of the [full name](Path::full_name) but are left out of the
//! [relative name](Path::relative_name).
//!
//! # Usage
//!
//! ```rust
//! use propbox::{path, path::Path};
//!
//! let street = Path::new("street").with_parent(Path::new("address"));
//! assert_eq!(street.relative_name(), "address.street");
//!
//! // Parse from a dot-joined string (automatically normalized)
//! let parsed: Path = "address..street.".parse()?;
//! assert_eq!(parsed, street);
//!
//! // Or use the macro
//! assert_eq!(path!("address", "street"), street);
//! # Ok::<(), propbox::path::PathError>(())
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for path construction failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The input normalized to an empty path.
    #[error("Empty path: '{input}'")]
    Empty { input: String },
}

impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}

/// Normalizes a dot-joined path string by cleaning up dots and empty components.
///
/// - Leading dots ".user" → "user"
/// - Trailing dots "user." → "user"
/// - Consecutive dots "user..profile" → "user.profile"
/// - Pure dots "..." → empty string
///
/// ```rust
/// # use propbox::path::normalize_path;
/// assert_eq!(normalize_path(".user"), "user");
/// assert_eq!(normalize_path("user..profile."), "user.profile");
/// assert_eq!(normalize_path("..."), "");
/// ```
pub fn normalize_path(input: &str) -> String {
    input
        .split('.')
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// A named node in a path hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<Box<Path>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    root: bool,
}

impl Path {
    /// Creates a parentless path with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            root: false,
        }
    }

    /// Creates a root path, whose name is excluded from relative names.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            root: true,
        }
    }

    /// Parses a dot-joined string into a path hierarchy.
    ///
    /// The last component becomes the path name and the preceding components
    /// form its parent chain.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let normalized = normalize_path(input);
        let mut components = normalized.split('.').filter(|c| !c.is_empty());
        let first = components.next().ok_or_else(|| PathError::Empty {
            input: input.to_string(),
        })?;
        Ok(components.fold(Path::new(first), |parent, name| {
            Path::new(name).with_parent(parent)
        }))
    }

    /// Replaces this path's parent.
    pub fn with_parent(mut self, parent: Path) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// The path name (last component).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent path, if any.
    pub fn parent(&self) -> Option<&Path> {
        self.parent.as_deref()
    }

    /// Returns `true` for root paths.
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Iterates from this path up through its parents.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Names from the outermost ancestor down to this path, root paths included.
    pub fn components(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.ancestors().map(Path::name).collect();
        names.reverse();
        names
    }

    /// Number of components, root paths included.
    pub fn len(&self) -> usize {
        self.ancestors().count()
    }

    /// Always `false`: a path has at least its own name.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Dot-joined names excluding root paths.
    pub fn relative_name(&self) -> String {
        let mut names: Vec<&str> = self
            .ancestors()
            .filter(|p| !p.root)
            .map(Path::name)
            .collect();
        names.reverse();
        names.join(".")
    }

    /// Dot-joined names including root paths.
    pub fn full_name(&self) -> String {
        self.components().join(".")
    }
}

/// Iterator over a path and its parents, innermost first.
pub struct Ancestors<'a> {
    next: Option<&'a Path>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Path;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

/// Builds a [`Path`] from components, outermost first.
///
/// ```rust
/// # use propbox::path;
/// let p = path!("a", "b", "c");
/// assert_eq!(p.name(), "c");
/// assert_eq!(p.relative_name(), "a.b.c");
/// ```
#[macro_export]
macro_rules! path {
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let path = $crate::path::Path::new($first);
        $(
            let path = $crate::path::Path::new($rest).with_parent(path);
        )*
        path
    }};
}
