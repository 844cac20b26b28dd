//! Matching example values against normalized schemas.
//!
//! A [`Matcher`] walks a value and a [`SchemaDescriptor`] together and
//! accumulates every reason the value does not conform. Sibling failures are
//! all collected rather than short-circuited, except where a type mismatch
//! makes deeper checks meaningless.
//!
//! Local references are expanded only when a value actually reaches them,
//! so matching does work proportional to the value, not to the size of a
//! recursive schema's expansion.
//!
//! # Example
//!
//! ```rust
//! use specimen::{Document, Matcher, Normalizer};
//! use serde_json::json;
//!
//! let document = Document::new(json!({"openapi": "3.1.0"})).unwrap();
//! let schema = Normalizer::new(&document).normalize(&json!({
//!     "type": "string",
//!     "const": "smoked"
//! }));
//!
//! let matcher = Matcher::new(&document);
//! assert!(matcher.check(&json!("smoked"), &schema).is_success());
//!
//! let reasons = matcher.mismatches(&json!("eaten"), &schema);
//! assert_eq!(reasons[0].message, "value must be 'smoked'");
//! ```

mod array;
mod combinators;
mod object;
mod scalar;

use serde_json::Value;
use stillwater::Validation;
use tracing::{debug, trace};

use crate::document::Document;
use crate::error::{MismatchReason, Mismatches};
use crate::schema::{ConcreteSchema, Normalizer, SchemaDescriptor, DEFAULT_MAX_DEPTH};

/// Result of matching one value against one schema.
pub type MatchResult = Validation<(), Mismatches>;

/// Matches values against schemas of one document.
///
/// The matcher is immutable and `Sync`, so one instance can serve every
/// site of a rule run, including from the rayon pool.
pub struct Matcher<'doc> {
    document: &'doc Document,
    normalizer: Normalizer<'doc>,
    max_depth: usize,
}

impl<'doc> Matcher<'doc> {
    /// Creates a matcher with the default `$ref` hop limit.
    pub fn new(document: &'doc Document) -> Self {
        Self {
            document,
            normalizer: Normalizer::new(document),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how many `$ref` hops one match may follow, and the nesting limit
    /// for normalizing each reference target.
    ///
    /// A value that needs more hops is accepted at that point.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.normalizer = Normalizer::new(self.document).with_max_depth(depth);
        self.max_depth = depth;
        self
    }

    /// Matches a value against a schema.
    ///
    /// Returns `Validation::Success(())` when the value conforms, or
    /// `Validation::Failure` with every mismatch reason in evaluation order.
    pub fn check(&self, value: &Value, schema: &SchemaDescriptor) -> MatchResult {
        Scope {
            matcher: self,
            hop: None,
            depth: 0,
        }
        .check(value, schema)
    }

    /// Matches a value against a schema and returns the reasons as a list.
    ///
    /// An empty list means the value conforms.
    pub fn mismatches(&self, value: &Value, schema: &SchemaDescriptor) -> Vec<MismatchReason> {
        match self.check(value, schema) {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(reasons) => reasons.into_vec(),
        }
    }
}

/// A reference followed on the way to the current value.
struct Hop<'a> {
    reference: &'a str,
    value: &'a Value,
    parent: Option<&'a Hop<'a>>,
}

/// State of one match: the references followed so far.
pub(super) struct Scope<'a> {
    matcher: &'a Matcher<'a>,
    hop: Option<&'a Hop<'a>>,
    depth: usize,
}

impl Scope<'_> {
    pub(super) fn check(&self, value: &Value, schema: &SchemaDescriptor) -> MatchResult {
        if value.is_null() && schema.is_nullable() {
            return Validation::Success(());
        }

        match schema {
            SchemaDescriptor::Any => Validation::Success(()),
            SchemaDescriptor::Concrete(concrete) => self.check_concrete(value, concrete),
            SchemaDescriptor::Union(union) => combinators::check_union(self, value, union),
            SchemaDescriptor::AllOf(all) => combinators::check_all(self, value, all),
            SchemaDescriptor::Ref(reference) => self.follow(value, reference),
        }
    }

    fn follow(&self, value: &Value, reference: &str) -> MatchResult {
        // The same reference reached again for the same value node is a
        // cycle that cannot produce new reasons.
        let revisited = std::iter::successors(self.hop, |hop| hop.parent)
            .any(|hop| hop.reference == reference && std::ptr::eq(hop.value, value));
        if revisited {
            trace!(reference, "reference cycle, accepting value");
            return Validation::Success(());
        }
        if self.depth >= self.matcher.max_depth {
            debug!(
                reference,
                max_depth = self.matcher.max_depth,
                "too many reference hops, accepting value"
            );
            return Validation::Success(());
        }

        let target = self.matcher.normalizer.normalize_ref(reference);
        let hop = Hop {
            reference,
            value,
            parent: self.hop,
        };
        Scope {
            matcher: self.matcher,
            hop: Some(&hop),
            depth: self.depth + 1,
        }
        .check(value, &target)
    }

    fn check_concrete(&self, value: &Value, schema: &ConcreteSchema) -> MatchResult {
        // A value of the wrong kind reports only the type mismatch.
        if let Some(types) = &schema.types {
            if !types.accepts(value) {
                return Validation::Failure(Mismatches::single(scalar::type_mismatch(
                    value, types,
                )));
            }
        }

        if let Some(constant) = &schema.constant {
            if !scalar::values_equal(value, constant) {
                return Validation::Failure(Mismatches::single(scalar::const_mismatch(constant)));
            }
        }

        if let Some(allowed) = &schema.allowed {
            if !allowed.iter().any(|candidate| scalar::values_equal(value, candidate)) {
                return Validation::Failure(Mismatches::single(scalar::enum_mismatch(allowed)));
            }
        }

        match value {
            Value::Object(map) => object::check_object(self, map, schema),
            Value::Array(items) => array::check_items(self, items, schema),
            _ => Validation::Success(()),
        }
    }
}

/// Turns accumulated reasons into a result.
fn finish(reasons: Vec<MismatchReason>) -> MatchResult {
    if reasons.is_empty() {
        Validation::Success(())
    } else {
        Validation::Failure(Mismatches::from_vec(reasons))
    }
}

const _: () = {
    const fn assert_sync<T: Sync>() {}
    assert_sync::<Matcher<'static>>();
};

/// Matches against a document with no components, for unit tests.
#[cfg(test)]
pub(crate) fn mismatches(value: &Value, schema: &SchemaDescriptor) -> Vec<MismatchReason> {
    let document = Document::with_version(
        serde_json::json!({}),
        crate::document::SpecVersion::OpenApi31,
    );
    Matcher::new(&document).mismatches(value, schema)
}
