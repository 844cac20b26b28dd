//! # Specimen
//!
//! A lint rule that checks every example declared in an API description
//! against the schema it claims to illustrate.
//!
//! ## Overview
//!
//! Examples show up in many places: on schemas (`example`, `examples`), on
//! parameters and headers, and on media types in request bodies and
//! responses. Specimen finds all of them, normalizes the schema each one is
//! attached to, and reports one diagnostic per mismatch, located with the
//! same JSONPath-style strings the rest of a linter uses.
//!
//! ## Core Types
//!
//! - [`Document`]: a parsed description plus its declared [`SpecVersion`]
//! - [`Normalizer`] and [`SchemaDescriptor`]: version-independent schemas
//! - [`Matcher`]: value-against-schema matching, expanding `$ref`s on demand
//! - [`Walker`] and [`ExampleSite`]: example discovery
//! - [`DocumentPath`]: location strings such as `$.paths['/herbs'].get`
//! - [`ExamplesSchema`]: the rule itself, producing [`Diagnostic`]s
//!
//! ## Example
//!
//! ```rust
//! use specimen::{Document, ExamplesSchema, Rule};
//!
//! let document = Document::from_yaml_str(r#"
//! openapi: 3.1
//! paths:
//!   /herbs:
//!     get:
//!       responses:
//!         "200":
//!           content:
//!             application/json:
//!               schema:
//!                 type: string
//!                 const: tasty
//!               examples:
//!                 sammich:
//!                   value: crispy
//! "#).unwrap();
//!
//! let diagnostics = ExamplesSchema::new().run(&document);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].message, "value must be 'tasty'");
//! assert_eq!(
//!     diagnostics[0].path,
//!     "$.paths['/herbs'].get.responses['200'].content['application/json'].examples['sammich']"
//! );
//! ```

pub mod document;
pub mod error;
pub mod matcher;
pub mod path;
pub mod rule;
pub mod schema;
pub mod walker;

pub use document::{Document, SpecVersion};
pub use error::{DocumentError, MismatchReason, Mismatches};
pub use matcher::{MatchResult, Matcher};
pub use path::{DocumentPath, PathSegment};
pub use rule::{Diagnostic, ExamplesSchema, Rule};
pub use schema::{
    AdditionalProperties, ConcreteSchema, IntersectionSchema, JsonType, Normalizer,
    SchemaDescriptor, TypeSet, UnionSchema, ValueKind,
};
pub use walker::{ExamplePayload, ExampleSite, SiteKind, Walker};
