//! Type, constant and enum checks.

use serde_json::Value;

use crate::error::MismatchReason;
use crate::schema::{TypeSet, ValueKind};

pub(super) fn type_mismatch(value: &Value, types: &TypeSet) -> MismatchReason {
    MismatchReason::new(format!("got {}, want {}", ValueKind::of(value), types))
        .with_code("invalid_type")
}

pub(super) fn const_mismatch(constant: &Value) -> MismatchReason {
    MismatchReason::new(format!("value must be '{}'", render(constant))).with_code("const")
}

pub(super) fn enum_mismatch(allowed: &[Value]) -> MismatchReason {
    let choices: Vec<String> = allowed
        .iter()
        .map(|value| format!("'{}'", render(value)))
        .collect();
    MismatchReason::new(format!("value must be one of {}", choices.join(", "))).with_code("enum")
}

/// Strings render bare, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Structural equality where numbers compare by numeric value.
///
/// Kinds never coerce: the string `"1"` is not the number `1`.
pub(super) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                a == b
            } else if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                a == b
            } else {
                a.as_f64() == b.as_f64()
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).map_or(false, |y| values_equal(x, y)))
        }
        _ => left == right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::JsonType;
    use serde_json::json;

    #[test]
    fn test_numbers_compare_numerically() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(values_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!values_equal(&json!(1), &json!(2)));
    }

    #[test]
    fn test_kinds_never_coerce() {
        assert!(!values_equal(&json!("1"), &json!(1)));
        assert!(!values_equal(&json!(true), &json!(1)));
        assert!(!values_equal(&json!(null), &json!(0)));
    }

    #[test]
    fn test_nested_equality_ignores_key_order() {
        assert!(values_equal(
            &json!({"a": [1, {"b": 2}], "c": "x"}),
            &json!({"c": "x", "a": [1.0, {"b": 2}]})
        ));
        assert!(!values_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!values_equal(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn test_messages() {
        assert_eq!(const_mismatch(&json!("smoked")).message, "value must be 'smoked'");
        assert_eq!(const_mismatch(&json!(1)).message, "value must be '1'");
        assert_eq!(
            const_mismatch(&json!({"a": true})).message,
            "value must be '{\"a\":true}'"
        );

        let types: TypeSet = [JsonType::Integer].into_iter().collect();
        let reason = type_mismatch(&json!("eaten"), &types);
        assert_eq!(reason.message, "got string, want integer");
        assert_eq!(reason.code, "invalid_type");
    }
}
