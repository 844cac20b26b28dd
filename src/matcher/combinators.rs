//! Union (`oneOf`/`anyOf`) and intersection (`allOf`) matching.

use serde_json::Value;
use stillwater::Validation;

use crate::schema::{IntersectionSchema, UnionSchema};

use super::{finish, MatchResult, Scope};

/// Matches a value against union alternatives.
///
/// The first alternative that accepts the value makes it conformant, even
/// if later alternatives would accept it too. When none accept it, the
/// result holds one representative reason per alternative (its first), in
/// declaration order.
pub(super) fn check_union(scope: &Scope<'_>, value: &Value, union: &UnionSchema) -> MatchResult {
    let mut representatives = Vec::with_capacity(union.alternatives.len());
    for alternative in &union.alternatives {
        match scope.check(value, alternative) {
            Validation::Success(()) => return Validation::Success(()),
            Validation::Failure(e) => representatives.push(e.first().clone()),
        }
    }

    finish(representatives)
}

/// Matches a value against every part, accumulating all reasons.
pub(super) fn check_all(scope: &Scope<'_>, value: &Value, all: &IntersectionSchema) -> MatchResult {
    let mut reasons = Vec::new();
    for part in &all.parts {
        if let Validation::Failure(e) = scope.check(value, part) {
            reasons.extend(e.into_iter());
        }
    }

    finish(reasons)
}
