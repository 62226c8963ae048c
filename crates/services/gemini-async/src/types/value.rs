//! The value returned by a typed query

use std::fmt;

use serde_json::{Map, Number, Value};

/// Text shown for [`TypedValue::NoValues`]
pub const NO_VALUES: &str = "No values.";

/// Result of a typed query
///
/// The first five variants come from a type directive the model selected. `Lines` is the
/// fallback when the model answered in plain text, and `NoValues` means it produced no
/// usable answer.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Output of the string directive
    String(String),
    /// Output of the number directive
    Number(Number),
    /// Output of the boolean directive
    Boolean(bool),
    /// Output of the array directive
    Array(Vec<Value>),
    /// Output of the object directive
    Object(Map<String, Value>),
    /// Plain-text answer split into trimmed lines
    Lines(Vec<String>),
    /// No answer (blocked, recitation, or nothing returned)
    NoValues,
}

impl TypedValue {
    /// Converts a JSON value by its shape; `null` becomes [`TypedValue::NoValues`]
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::NoValues,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(a) => Self::Array(a),
            Value::Object(o) => Self::Object(o),
        }
    }

    /// Splits plain text on `\n` and trims every line; empty lines are kept
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::Lines(text.split('\n').map(|l| l.trim().to_string()).collect())
    }

    /// Converts back to JSON; `Lines` becomes an array of strings and `NoValues` the
    /// string [`NO_VALUES`]
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::String(s) => Value::String(s),
            Self::Number(n) => Value::Number(n),
            Self::Boolean(b) => Value::Bool(b),
            Self::Array(a) => Value::Array(a),
            Self::Object(o) => Value::Object(o),
            Self::Lines(lines) => Value::Array(lines.into_iter().map(Value::String).collect()),
            Self::NoValues => Value::String(NO_VALUES.to_string()),
        }
    }

    /// Returns the string, if this is a `String`
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the number as `f64`, if this is a `Number`
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a `Boolean`
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the lines, if this is a `Lines` fallback
    #[must_use]
    pub fn as_lines(&self) -> Option<&[String]> {
        match self {
            Self::Lines(lines) => Some(lines.as_slice()),
            _ => None,
        }
    }

    /// Whether the model produced no usable answer
    #[must_use]
    pub const fn is_no_values(&self) -> bool {
        matches!(self, Self::NoValues)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Array(a) => f.write_str(&serde_json::to_string(a).map_err(|_| fmt::Error)?),
            Self::Object(o) => f.write_str(&serde_json::to_string(o).map_err(|_| fmt::Error)?),
            Self::Lines(lines) => f.write_str(&lines.join("\n")),
            Self::NoValues => f.write_str(NO_VALUES),
        }
    }
}

impl From<Value> for TypedValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_maps_each_shape() {
        assert_eq!(TypedValue::from_json(json!("a")), TypedValue::String("a".into()));
        assert_eq!(TypedValue::from_json(json!(true)).as_bool(), Some(true));
        assert_eq!(TypedValue::from_json(json!(1.5)).as_f64(), Some(1.5));
        assert_eq!(
            TypedValue::from_json(json!([1, "x"])),
            TypedValue::Array(vec![json!(1), json!("x")])
        );
        assert!(matches!(TypedValue::from_json(json!({"k": 1})), TypedValue::Object(_)));
        assert!(TypedValue::from_json(Value::Null).is_no_values());
    }

    #[test]
    fn from_text_trims_and_keeps_blank_lines() {
        let v = TypedValue::from_text(" a \nb\r\n\n c");
        assert_eq!(v.as_lines().unwrap(), ["a", "b", "", "c"]);
    }

    #[test]
    fn no_values_displays_sentinel() {
        assert_eq!(TypedValue::NoValues.to_string(), "No values.");
        assert_eq!(TypedValue::NoValues.into_json(), json!("No values."));
    }

    #[test]
    fn object_displays_as_json() {
        let v = TypedValue::from_json(json!({"Tokyo": 14000000}));
        assert_eq!(v.to_string(), r#"{"Tokyo":14000000}"#);
    }
}
