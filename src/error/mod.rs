//! Error types.
//!
//! [`MismatchReason`] and [`Mismatches`] describe examples that do not conform
//! to their schemas. [`DocumentError`] covers the few ways document
//! construction can fail.

mod document_error;
mod mismatch;

pub use document_error::DocumentError;
pub use mismatch::{MismatchReason, Mismatches};
