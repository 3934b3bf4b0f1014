//! Untyped response payloads.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// A decoded JSON object as returned by the server.
///
/// Values inside are the tagged `serde_json::Value` union (object, array,
/// string, number, bool, null). Typed access to promoted fields happens in
/// the projection step; this type only guarantees the top level is an object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawPayload(Map<String, Value>);

impl RawPayload {
    /// Decodes response bytes.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::JsonParse`] for malformed JSON and
    /// [`ValidationError::NotAnObject`] when the top level is not an object.
    pub fn decode(bytes: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Wraps an already decoded value.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::NotAnObject`] when `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ValidationError::NotAnObject {
                found: json_type(&other),
            }),
        }
    }

    /// Returns the raw value of a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns a top-level field if it is a string.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Returns a top-level field if it is a non-negative integer.
    pub fn u64_field(&self, field: &str) -> Option<u64> {
        self.get(field).and_then(Value::as_u64)
    }

    /// Removes a top-level field and returns it.
    pub fn take(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Returns the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Names the JSON type of a value, for error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
