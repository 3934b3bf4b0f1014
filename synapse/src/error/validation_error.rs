//! Response decoding errors.

use thiserror::Error;

/// Errors while decoding or projecting a response body.
///
/// A decode failure is fatal for the call; no partial view is returned.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The body is not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The body is valid JSON but not an object.
    #[error("Expected a JSON object, got {found}")]
    NotAnObject {
        /// The JSON type that was found.
        found: &'static str,
    },

    /// A collection field is present but is not an array.
    #[error("Expected `{field}` to be an array, got {found}")]
    NotAnArray {
        /// The collection field name.
        field: &'static str,
        /// The JSON type that was found.
        found: &'static str,
    },

    /// A field the SDK depends on is absent or not a string.
    #[error("Response is missing required field `{field}`")]
    MissingField {
        /// The field name.
        field: &'static str,
    },
}

impl ValidationError {
    /// Returns `true` if the body could not be parsed at all.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parse_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = ValidationError::JsonParse(json_err);
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_shape_errors_display() {
        let err = ValidationError::NotAnObject { found: "array" };
        assert_eq!(err.to_string(), "Expected a JSON object, got array");
        assert!(!err.is_parse_error());

        let err = ValidationError::NotAnArray {
            field: "nodes",
            found: "string",
        };
        assert_eq!(err.to_string(), "Expected `nodes` to be an array, got string");

        let err = ValidationError::MissingField { field: "oauth_key" };
        assert_eq!(err.to_string(), "Response is missing required field `oauth_key`");
    }
}
