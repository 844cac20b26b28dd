//! Normalized schema descriptors.
//!
//! Raw schema nodes come in several historical dialects: a single `type`
//! plus a `nullable` flag (OpenAPI 3.0), a `type` array that may list
//! `"null"` (OpenAPI 3.1), or `x-nullable` (Swagger 2.0). The [`Normalizer`]
//! reconciles them into one [`SchemaDescriptor`] shape so the matcher never
//! needs to know which dialect a document used.
//!
//! # Example
//!
//! ```rust
//! use specimen::{Document, Normalizer, SchemaDescriptor};
//! use serde_json::json;
//!
//! let document = Document::new(json!({"openapi": "3.0.0"})).unwrap();
//! let schema = Normalizer::new(&document).normalize(&json!({
//!     "oneOf": [{"type": "string"}, {"type": "integer"}]
//! }));
//!
//! assert!(matches!(schema, SchemaDescriptor::Union(_)));
//! ```

mod descriptor;
mod normalize;

pub use descriptor::{
    AdditionalProperties, ConcreteSchema, IntersectionSchema, JsonType, SchemaDescriptor, TypeSet,
    UnionSchema, ValueKind,
};
pub use normalize::{Normalizer, DEFAULT_MAX_DEPTH};
