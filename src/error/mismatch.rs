//! Mismatch types produced when an example does not conform to its schema.
//!
//! This module provides [`MismatchReason`] for a single conformance failure and
//! [`Mismatches`] for accumulating several of them.

use std::fmt::{self, Display};

use stillwater::prelude::*;

/// A single reason why a value failed to conform to a schema.
///
/// A reason carries only its message and a machine-readable code. The
/// location is attached later, when the reason is turned into a
/// [`Diagnostic`](crate::Diagnostic) for a specific example.
///
/// # Example
///
/// ```rust
/// use specimen::MismatchReason;
///
/// let reason = MismatchReason::new("value must be 'smoked'").with_code("const");
///
/// assert_eq!(reason.message, "value must be 'smoked'");
/// assert_eq!(reason.code, "const");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchReason {
    /// Human-readable explanation, copied verbatim into diagnostics.
    pub message: String,
    /// Machine-readable code (e.g., `invalid_type`).
    pub code: String,
}

impl MismatchReason {
    /// Creates a new reason with the given message.
    ///
    /// The code defaults to "mismatch". Use `with_code` to set a more
    /// specific one.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: "mismatch".to_string(),
        }
    }

    /// Sets the code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

impl Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for MismatchReason {}

/// A non-empty collection of mismatch reasons.
///
/// `Mismatches` wraps a `NonEmptyVec<MismatchReason>` so that a failed
/// `Validation<(), Mismatches>` always explains itself with at least one
/// reason. It implements `Semigroup`, so failures from sibling checks can be
/// combined in order:
///
/// ```rust
/// use specimen::{MismatchReason, Mismatches};
/// use stillwater::prelude::*;
///
/// let first = Mismatches::single(MismatchReason::new("got string, want integer"));
/// let second = Mismatches::single(MismatchReason::new("additional properties 'name' not allowed"));
///
/// let combined = first.combine(second);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatches(NonEmptyVec<MismatchReason>);

impl Mismatches {
    /// Creates a collection containing a single reason.
    pub fn single(reason: MismatchReason) -> Self {
        Self(NonEmptyVec::singleton(reason))
    }

    /// Creates a collection from a `Vec<MismatchReason>`.
    ///
    /// # Panics
    ///
    /// Panics if the provided vec is empty. Callers check emptiness first.
    pub fn from_vec(reasons: Vec<MismatchReason>) -> Self {
        Self(NonEmptyVec::from_vec(reasons).expect("Mismatches requires at least one reason"))
    }

    /// Returns the number of reasons in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the first reason in the collection.
    pub fn first(&self) -> &MismatchReason {
        self.0.head()
    }

    /// Returns an iterator over the contained reasons.
    pub fn iter(&self) -> impl Iterator<Item = &MismatchReason> {
        self.0.iter()
    }

    /// Converts this collection into a `Vec<MismatchReason>`.
    pub fn into_vec(self) -> Vec<MismatchReason> {
        self.0.into_vec()
    }
}

impl Semigroup for Mismatches {
    fn combine(self, other: Self) -> Self {
        Mismatches(self.0.combine(other.0))
    }
}

impl Display for Mismatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "example does not conform ({} reason(s)):", self.len())?;
        for (i, reason) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for Mismatches {}

impl IntoIterator for Mismatches {
    type Item = MismatchReason;
    type IntoIter = std::vec::IntoIter<MismatchReason>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Mismatches>();
    assert_sync::<Mismatches>();
};
