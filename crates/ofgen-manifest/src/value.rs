//! Tagged JSON value used for flag definitions and default values.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A JSON value with a closed set of shapes.
///
/// Integers and floats are kept apart so default values round-trip with the
/// precision the manifest author wrote, but [`PartialEq`] treats `1` and `1.0`
/// as the same number because JSON does not distinguish them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Name of the JSON shape, as used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a field of an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

/// The `i64` a float denotes exactly, if any.
///
/// `None` for fractional, non-finite, or out-of-range values. `as` casts
/// saturate, so the range is checked first.
pub fn exact_i64(f: f64) -> Option<i64> {
    const MIN: f64 = -9_223_372_036_854_775_808.0;
    const MAX_EXCLUSIVE: f64 = 9_223_372_036_854_775_808.0;
    if f.fract() == 0.0 && (MIN..MAX_EXCLUSIVE).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

/// Recursive structural equality.
///
/// Objects compare by key set and per-key value, arrays element-wise, and
/// numbers by numeric value regardless of integer/float representation.
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => {
            exact_i64(*f) == Some(*i)
        }
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| structurally_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| structurally_equal(x, y)))
        }
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        structurally_equal(self, other)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_deserialize_shapes() {
        assert!(matches!(json("null"), Value::Null));
        assert!(matches!(json("true"), Value::Bool(true)));
        assert!(matches!(json("42"), Value::Int(42)));
        assert!(matches!(json("-3"), Value::Int(-3)));
        assert!(matches!(json("0.15"), Value::Float(f) if f == 0.15));
        assert!(matches!(json("\"hi\""), Value::String(ref s) if s == "hi"));
        assert!(matches!(json("[1, 2]"), Value::Array(ref v) if v.len() == 2));
        assert!(matches!(json(r#"{"a": 1}"#), Value::Object(ref m) if m.contains_key("a")));
    }

    #[test]
    fn test_int_float_equality_is_exact() {
        assert_eq!(json("1"), json("1.0"));
        assert_ne!(json("1"), json("1.5"));
        assert_ne!(json("9007199254740993"), json("9007199254740992.0"));
        assert_eq!(json("9007199254740992"), json("9007199254740992.0"));
        assert_ne!(Value::Int(i64::MAX), json("1e20"));
    }

    #[test]
    fn test_exact_i64() {
        assert_eq!(exact_i64(7.0), Some(7));
        assert_eq!(exact_i64(-9_223_372_036_854_775_808.0), Some(i64::MIN));
        assert_eq!(exact_i64(9_223_372_036_854_775_808.0), None);
        assert_eq!(exact_i64(1e20), None);
        assert_eq!(exact_i64(0.5), None);
        assert_eq!(exact_i64(f64::NAN), None);
        assert_eq!(exact_i64(f64::INFINITY), None);
    }

    #[test]
    fn test_object_equality_ignores_key_order() {
        let a = json(r#"{"flagType": "boolean", "defaultValue": true}"#);
        let b = json(r#"{"defaultValue": true, "flagType": "boolean"}"#);
        assert_eq!(a, b);
    }

    #[test]
    fn test_nested_difference_detected() {
        let a = json(r#"{"defaultValue": {"theme": {"color": "red"}}}"#);
        let b = json(r#"{"defaultValue": {"theme": {"color": "blue"}}}"#);
        assert_ne!(a, b);
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert_eq!(json("1"), json("1.0"));
        assert_ne!(json("1"), json("1.5"));
        assert_ne!(json("1"), json("\"1\""));
    }

    #[test]
    fn test_extra_key_is_a_difference() {
        let a = json(r#"{"flagType": "string"}"#);
        let b = json(r#"{"flagType": "string", "description": ""}"#);
        assert_ne!(a, b);
        assert_ne!(b, a);
    }

    #[test]
    fn test_array_order_matters() {
        assert_ne!(json("[1, 2]"), json("[2, 1]"));
    }

    #[test]
    fn test_display_is_compact_json() {
        assert_eq!(json(r#"{"b": 1, "a": "x"}"#).to_string(), r#"{"a":"x","b":1}"#);
    }

    #[test]
    fn test_from_serde_json() {
        let v = Value::from(serde_json::json!({"n": 2, "f": 2.5, "s": "x"}));
        assert!(matches!(v.get("n"), Some(Value::Int(2))));
        assert!(matches!(v.get("f"), Some(Value::Float(f)) if *f == 2.5));
        assert_eq!(v.get("s").and_then(Value::as_str), Some("x"));
    }
}
