//! Dynamically typed configuration values.

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A value recovered from the right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `None`
    Null,
    /// `True` / `False`
    Bool(bool),
    /// Integer literal that fits in an `i128`
    Integer(i128),
    /// Floating-point literal
    Float(f64),
    /// Quoted string, or raw text when nothing else parsed
    String(String),
    /// `[...]` literal
    List(Vec<Value>),
    /// `(...)` literal or bare `a, b` sequence
    Tuple(Vec<Value>),
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Check if this is a scalar (not a list or tuple).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Tuple(_))
    }

    /// Check if this is a tuple whose elements are all scalars.
    pub fn is_scalar_tuple(&self) -> bool {
        match self {
            Value::Tuple(items) => items.iter().all(Value::is_scalar),
            _ => false,
        }
    }

    /// Get the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n.into())
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

// Tuples serialize as plain sequences so generic loaders can read them back.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => match i64::try_from(*n) {
                Ok(small) => serializer.serialize_i64(small),
                Err(_) => serializer.serialize_i128(*n),
            },
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) | Value::Tuple(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tuple() {
        let tuple = Value::Tuple(vec!["#".into(), "Header 1".into()]);
        assert!(tuple.is_scalar_tuple());
        assert!(!tuple.is_scalar());

        let nested = Value::Tuple(vec![Value::List(vec![1i64.into()])]);
        assert!(!nested.is_scalar_tuple());

        assert!(!Value::List(vec![]).is_scalar_tuple());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::string("x").as_str(), Some("x"));
        assert_eq!(Value::Integer(1).as_str(), None);
    }

    #[test]
    fn test_serialize_tuple_as_sequence() {
        let value = Value::Tuple(vec![1i64.into(), "a".into(), Value::Null]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[1,"a",null]"#);
    }
}
