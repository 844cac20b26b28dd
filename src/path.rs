//! Document path representation for locating example sites.
//!
//! This module provides [`DocumentPath`] and [`PathSegment`] types for building
//! the JSONPath-style locations attached to every diagnostic, such as
//! `$.components.schemas['Herbs'].examples[0]`.

use std::fmt::{self, Display};

/// A segment of a document path.
///
/// Fixed fields of the description format (`components`, `schema`, `get`)
/// render with a dot, user-named map entries (`schemas['Herbs']`) render
/// bracket-quoted, and sequence positions render as bare indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A fixed field access (e.g., `.components`)
    Field(String),
    /// A user-named map key (e.g., `['application/json']`)
    Key(String),
    /// A sequence index (e.g., `[0]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new map key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path to a node in an API description document, rooted at `$`.
///
/// Paths are immutable: every `push_*` method returns a new path and leaves
/// the receiver untouched, so recursive traversals can hand each child its
/// own prefix without sharing a mutable stack.
///
/// # Example
///
/// ```rust
/// use specimen::DocumentPath;
///
/// let path = DocumentPath::root()
///     .push_field("components")
///     .push_field("schemas")
///     .push_key("Herbs")
///     .push_field("examples")
///     .push_index(0);
///
/// assert_eq!(path.to_string(), "$.components.schemas['Herbs'].examples[0]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DocumentPath {
    segments: Vec<PathSegment>,
}

impl DocumentPath {
    /// Creates the root path, rendered as `$`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with a map key segment appended.
    pub fn push_key(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Key(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Key(key) => write!(f, "['{}']", key.replace('\'', "\\'"))?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
