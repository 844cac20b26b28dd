//! Array matching against `items`.

use serde_json::Value;
use stillwater::Validation;

use crate::schema::ConcreteSchema;

use super::{finish, MatchResult, Scope};

/// Matches every element against the item schema, collecting all failures.
pub(super) fn check_items(
    scope: &Scope<'_>,
    items: &[Value],
    schema: &ConcreteSchema,
) -> MatchResult {
    let item_schema = match &schema.items {
        Some(item_schema) => item_schema,
        None => return Validation::Success(()),
    };

    let mut reasons = Vec::new();
    for item in items {
        if let Validation::Failure(e) = scope.check(item, item_schema) {
            reasons.extend(e.into_iter());
        }
    }

    finish(reasons)
}
