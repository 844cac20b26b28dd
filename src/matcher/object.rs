//! Object matching: declared properties, required names, extra keys.

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::MismatchReason;
use crate::schema::{AdditionalProperties, ConcreteSchema};

use super::{finish, MatchResult, Scope};

/// Matches an object value against a concrete schema's object constraints.
///
/// Reasons are collected in three passes, each in the value's key order:
/// declared properties, missing required names, then undeclared keys.
pub(super) fn check_object(
    scope: &Scope<'_>,
    map: &Map<String, Value>,
    schema: &ConcreteSchema,
) -> MatchResult {
    let mut reasons = Vec::new();

    for (name, value) in map {
        if let Some(property) = schema.properties.get(name) {
            if let Validation::Failure(e) = scope.check(value, property) {
                reasons.extend(e.into_iter());
            }
        }
    }

    for name in &schema.required {
        if !map.contains_key(name) {
            reasons.push(
                MismatchReason::new(format!("missing required property '{}'", name))
                    .with_code("required"),
            );
        }
    }

    for (name, value) in map {
        if schema.properties.contains_key(name) {
            continue;
        }
        match &schema.additional_properties {
            AdditionalProperties::Allow => {}
            AdditionalProperties::Deny => reasons.push(
                MismatchReason::new(format!("additional properties '{}' not allowed", name))
                    .with_code("additional_property"),
            ),
            AdditionalProperties::Validate(extra) => {
                if let Validation::Failure(e) = scope.check(value, extra) {
                    reasons.extend(e.into_iter());
                }
            }
        }
    }

    finish(reasons)
}
