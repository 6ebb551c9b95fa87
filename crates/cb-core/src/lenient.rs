//! Forgiving numeric coercion for hand-edited data files.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value to an integer.
///
/// Integers pass through, floats truncate toward zero, numeric strings are
/// parsed. Anything else yields `None`.
pub(crate) fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

fn truncate(f: f64) -> Option<i64> {
    // `as` saturates at the i64 bounds.
    f.is_finite().then(|| f.trunc() as i64)
}

/// Deserialize an integer field, treating unusable values as 0.
pub(crate) fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_integer(&value).unwrap_or(0))
}

/// Like [`integer`], clamped to 0 from below.
pub(crate) fn non_negative<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    integer(deserializer).map(|n| n.max(0))
}

/// Deserialize an optional string, treating empty strings as absent.
pub(crate) fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_pass_through() {
        assert_eq!(coerce_integer(&json!(-5)), Some(-5));
        assert_eq!(coerce_integer(&json!(0)), Some(0));
    }

    #[test]
    fn floats_truncate() {
        assert_eq!(coerce_integer(&json!(2.9)), Some(2));
        assert_eq!(coerce_integer(&json!(-2.9)), Some(-2));
    }

    #[test]
    fn numeric_strings_parse() {
        assert_eq!(coerce_integer(&json!("-10")), Some(-10));
        assert_eq!(coerce_integer(&json!(" 7 ")), Some(7));
        assert_eq!(coerce_integer(&json!("1.5")), Some(1));
    }

    #[test]
    fn everything_else_is_none() {
        assert_eq!(coerce_integer(&json!("lots")), None);
        assert_eq!(coerce_integer(&json!("")), None);
        assert_eq!(coerce_integer(&json!(null)), None);
        assert_eq!(coerce_integer(&json!(true)), None);
        assert_eq!(coerce_integer(&json!({"mp": 1})), None);
    }
}
