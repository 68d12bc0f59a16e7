//! Field validator: pure mapping of (label, value, rule) to an optional
//! human-readable error.

use serde_json::Value;

use super::rules::ValidationRule;

/// Shape of a value under validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Missing or null.
    Absent,
    Text(&'a str),
    Number(f64),
    /// A sequence, carried as its length.
    Items(usize),
    /// Any other shape; never fails a bound check.
    Other,
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Text(value.as_str())
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl<'a, T> From<&'a [T]> for FieldValue<'a> {
    fn from(value: &'a [T]) -> Self {
        FieldValue::Items(value.len())
    }
}

impl<'a, T> From<&'a Vec<T>> for FieldValue<'a> {
    fn from(value: &'a Vec<T>) -> Self {
        FieldValue::Items(value.len())
    }
}

impl<'a, V> From<Option<V>> for FieldValue<'a>
where
    V: Into<FieldValue<'a>>,
{
    fn from(value: Option<V>) -> Self {
        value.map_or(FieldValue::Absent, Into::into)
    }
}

impl<'a> From<&'a Value> for FieldValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => FieldValue::Absent,
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => n.as_f64().map_or(FieldValue::Other, FieldValue::Number),
            Value::Array(items) => FieldValue::Items(items.len()),
            Value::Bool(_) | Value::Object(_) => FieldValue::Other,
        }
    }
}

/// Validate one field against `rule`.
///
/// Returns the first failing condition for the value's shape (min before
/// max), or `None` when the rule is satisfied.
pub fn validate_field<'a>(
    label: &str,
    value: impl Into<FieldValue<'a>>,
    rule: &ValidationRule,
) -> Option<String> {
    match value.into() {
        FieldValue::Absent => Some(format!("{label} is required")),
        FieldValue::Text(s) => {
            let len = s.chars().count() as u64;
            if let Some(min) = rule.min.filter(|m| len < u64::from(*m)) {
                return Some(format!("{label} must be at least {min} characters long"));
            }
            if let Some(max) = rule.max.filter(|m| len > u64::from(*m)) {
                return Some(format!("{label} must be no more than {max} characters long"));
            }
            None
        }
        FieldValue::Number(n) => {
            if let Some(min) = rule.min.filter(|m| n < f64::from(*m)) {
                return Some(format!("{label} must be at least {min}"));
            }
            if let Some(max) = rule.max.filter(|m| n > f64::from(*m)) {
                return Some(format!("{label} must be no more than {max}"));
            }
            None
        }
        FieldValue::Items(len) => {
            let len = len as u64;
            if let Some(min) = rule.min.filter(|m| len < u64::from(*m)) {
                return Some(format!("{label} must have at least {min} item(s)"));
            }
            if let Some(max) = rule.max.filter(|m| len > u64::from(*m)) {
                return Some(format!("{label} must have no more than {max} item(s)"));
            }
            None
        }
        FieldValue::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RULE_2_5: ValidationRule = ValidationRule::between(2, 5);

    #[test]
    fn string_length_bounds() {
        assert_eq!(
            validate_field("Test field", "", &RULE_2_5).as_deref(),
            Some("Test field must be at least 2 characters long")
        );
        assert_eq!(
            validate_field("Test field", "a", &RULE_2_5).as_deref(),
            Some("Test field must be at least 2 characters long")
        );
        assert_eq!(validate_field("Test field", "abc", &RULE_2_5), None);
        assert_eq!(
            validate_field("Test field", "abcdef", &RULE_2_5).as_deref(),
            Some("Test field must be no more than 5 characters long")
        );
    }

    #[test]
    fn string_length_counts_characters_not_bytes() {
        // 5 characters, 10 bytes
        assert_eq!(validate_field("Name", "ééééé", &RULE_2_5), None);
    }

    #[test]
    fn absent_values_are_required_regardless_of_rule() {
        let none: Option<&str> = None;
        assert_eq!(
            validate_field("Test field", none, &ValidationRule::default()).as_deref(),
            Some("Test field is required")
        );
        assert_eq!(
            validate_field("Test field", &Value::Null, &RULE_2_5).as_deref(),
            Some("Test field is required")
        );
    }

    #[test]
    fn number_bounds() {
        let rule = ValidationRule::between(1, 100);
        assert_eq!(
            validate_field("Budget", 0.0, &ValidationRule::at_least(1)).as_deref(),
            Some("Budget must be at least 1")
        );
        assert_eq!(validate_field("Budget", 50.0, &rule), None);
        assert_eq!(
            validate_field("Budget", 150.0, &rule).as_deref(),
            Some("Budget must be no more than 100")
        );
        assert_eq!(
            validate_field("Test field", 101_i64, &rule).as_deref(),
            Some("Test field must be no more than 100")
        );
    }

    #[test]
    fn sequence_bounds() {
        let rule = ValidationRule::between(1, 3);
        let empty: Vec<u8> = vec![];
        assert_eq!(
            validate_field("Test field", &empty, &rule).as_deref(),
            Some("Test field must have at least 1 item(s)")
        );
        assert_eq!(validate_field("Test field", &vec![1, 2], &rule), None);
        assert_eq!(
            validate_field("Test field", &vec![1, 2, 3, 4], &rule).as_deref(),
            Some("Test field must have no more than 3 item(s)")
        );
    }

    #[test]
    fn min_failure_wins_over_max() {
        // Inverted rule: both bounds fail for len 3; min is reported.
        let rule = ValidationRule::between(5, 2);
        assert_eq!(
            validate_field("X", "abc", &rule).as_deref(),
            Some("X must be at least 5 characters long")
        );
    }

    #[test]
    fn empty_rule_accepts_any_present_value() {
        let rule = ValidationRule::default();
        assert_eq!(validate_field("X", "", &rule), None);
        assert_eq!(validate_field("X", -1.0, &rule), None);
        assert_eq!(validate_field("X", &Vec::<u8>::new(), &rule), None);
    }

    #[test]
    fn json_values_map_to_shapes() {
        let rule = ValidationRule::between(1, 2);
        assert!(validate_field("X", &json!("abc"), &rule).is_some());
        assert!(validate_field("X", &json!([1, 2, 3]), &rule).is_some());
        assert!(validate_field("X", &json!(3), &rule).is_some());
        assert_eq!(validate_field("X", &json!(true), &rule), None);
        assert_eq!(validate_field("X", &json!({"a": 1}), &rule), None);
    }

    #[test]
    fn string_property_holds_across_lengths() {
        let rule = ValidationRule::between(2, 5);
        for len in 0..10usize {
            let s = "x".repeat(len);
            let ok = validate_field("F", s.as_str(), &rule).is_none();
            assert_eq!(ok, (2..=5).contains(&len), "len {len}");
        }
        let only_max = ValidationRule::new(None, Some(3));
        for len in 0..6usize {
            let items = vec![0u8; len];
            let ok = validate_field("F", &items, &only_max).is_none();
            assert_eq!(ok, len <= 3, "len {len}");
        }
    }
}
