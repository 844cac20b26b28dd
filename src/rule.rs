//! The `examples_schema` lint rule.
//!
//! [`ExamplesSchema`] drives the [`Walker`], matches every example against
//! its site's schema and turns each mismatch reason into a [`Diagnostic`]
//! located at that example.

use std::fmt::{self, Display};

use rayon::prelude::*;
use tracing::debug;

use crate::document::Document;
use crate::matcher::Matcher;
use crate::schema::DEFAULT_MAX_DEPTH;
use crate::walker::{ExampleSite, Walker};

/// A conformance violation at an exact document location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The mismatch reason, verbatim.
    pub message: String,
    /// Location of the offending example, e.g.
    /// `$.components.schemas['Herbs'].examples[0]`.
    pub path: String,
    /// Machine-readable code of the underlying reason.
    pub code: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A lint rule the host can run against a document.
///
/// Rules are pure: they read the document and return diagnostics. The
/// `Send + Sync` bounds let a host run several rules over one shared
/// document from different threads.
pub trait Rule: Send + Sync {
    /// Stable identifier used in configuration and reports.
    fn id(&self) -> &'static str;

    /// One-line human-readable description.
    fn description(&self) -> &'static str;

    /// Runs the rule. An empty result means the document passes.
    fn run(&self, document: &Document) -> Vec<Diagnostic>;
}

/// Checks every declared example against the schema it illustrates.
///
/// # Example
///
/// ```rust
/// use specimen::{Document, ExamplesSchema, Rule};
///
/// let document = Document::from_yaml_str(r#"
/// openapi: 3.1
/// components:
///   schemas:
///     Herbs:
///       type: object
///       properties:
///         id:
///           type: string
///       additionalProperties: false
///       examples:
///         - id: smoked
///           name: illegal
/// "#).unwrap();
///
/// let diagnostics = ExamplesSchema::new().run(&document);
///
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(diagnostics[0].message, "additional properties 'name' not allowed");
/// assert_eq!(diagnostics[0].path, "$.components.schemas['Herbs'].examples[0]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamplesSchema {
    max_depth: usize,
    parallel: bool,
}

impl ExamplesSchema {
    /// Identifier reported by [`Rule::id`].
    pub const ID: &'static str = "examples_schema";

    /// Creates the rule with default settings: depth limit 100, parallel
    /// matching enabled.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: true,
        }
    }

    /// Sets the maximum schema nesting depth, and the number of `$ref` hops
    /// one example may follow.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enables or disables matching sites on the rayon thread pool.
    ///
    /// Output is identical either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn check_site(matcher: &Matcher<'_>, site: &ExampleSite<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (path, value) in site.samples() {
            let location = path.to_string();
            for reason in matcher.mismatches(value, &site.schema) {
                diagnostics.push(Diagnostic {
                    message: reason.message,
                    path: location.clone(),
                    code: reason.code,
                });
            }
        }
        diagnostics
    }
}

impl Default for ExamplesSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ExamplesSchema {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn description(&self) -> &'static str {
        "examples must conform to the schema they illustrate"
    }

    fn run(&self, document: &Document) -> Vec<Diagnostic> {
        let sites = Walker::new(document).with_max_depth(self.max_depth).sites();
        let matcher = Matcher::new(document).with_max_depth(self.max_depth);

        // collect() on an indexed parallel iterator keeps site order.
        let per_site: Vec<Vec<Diagnostic>> = if self.parallel {
            sites
                .par_iter()
                .map(|site| Self::check_site(&matcher, site))
                .collect()
        } else {
            sites
                .iter()
                .map(|site| Self::check_site(&matcher, site))
                .collect()
        };
        let diagnostics: Vec<Diagnostic> = per_site.into_iter().flatten().collect();

        debug!(
            rule = Self::ID,
            version = %document.version(),
            sites = sites.len(),
            diagnostics = diagnostics.len(),
            "rule finished"
        );
        diagnostics
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ExamplesSchema>();
    assert_sync::<ExamplesSchema>();
    assert_send::<Diagnostic>();
    assert_sync::<Diagnostic>();
};
