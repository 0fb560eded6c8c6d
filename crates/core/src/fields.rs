//! Lenient field access over loosely-typed JSON payloads.
//!
//! Prediction requests arrive as free-form JSON objects. Rather than rejecting
//! the whole payload at deserialization time, policies pull the fields they
//! need one by one so that a missing or mistyped field can route the policy to
//! its fallback computation instead of failing the request outright.

use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// Read-only view over a JSON object's fields.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Borrow `value` as an object, failing for any other JSON type.
    pub fn from_value(value: &'a Value) -> DomainResult<Self> {
        value
            .as_object()
            .map(Self::new)
            .ok_or_else(|| DomainError::validation("prediction data must be a JSON object"))
    }

    /// Required finite number.
    pub fn number(&self, name: &str) -> DomainResult<f64> {
        self.optional_number(name)?
            .ok_or_else(|| DomainError::missing(name))
    }

    /// Optional finite number; `null` counts as absent.
    pub fn optional_number(&self, name: &str) -> DomainResult<Option<f64>> {
        match self.map.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v.is_finite() => Ok(Some(v)),
                _ => Err(DomainError::invalid(name, "number is not representable")),
            },
            Some(other) => Err(DomainError::invalid(
                name,
                format!("expected a number, got {}", json_type(other)),
            )),
        }
    }

    /// Boolean flag. Absent or `null` is `false`; numbers are truthy when non-zero.
    pub fn flag(&self, name: &str) -> DomainResult<bool> {
        match self.map.get(name) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
            Some(other) => Err(DomainError::invalid(
                name,
                format!("expected a boolean, got {}", json_type(other)),
            )),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_numbers_and_reports_missing_or_mistyped() {
        let v = json!({ "a": 3, "b": 2.5, "c": "x", "d": null });
        let f = Fields::from_value(&v).unwrap();

        assert_eq!(f.number("a").unwrap(), 3.0);
        assert_eq!(f.number("b").unwrap(), 2.5);
        assert_eq!(f.number("zzz"), Err(DomainError::missing("zzz")));
        assert_eq!(f.number("d"), Err(DomainError::missing("d")));
        assert!(matches!(
            f.number("c"),
            Err(DomainError::InvalidField { .. })
        ));
    }

    #[test]
    fn flags_accept_bools_and_numbers() {
        let v = json!({ "t": true, "one": 1, "zero": 0, "s": "yes" });
        let f = Fields::from_value(&v).unwrap();

        assert!(f.flag("t").unwrap());
        assert!(f.flag("one").unwrap());
        assert!(!f.flag("zero").unwrap());
        assert!(!f.flag("absent").unwrap());
        assert!(f.flag("s").is_err());
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(Fields::from_value(&json!([1, 2])).is_err());
    }
}
