//! Configuration and caller input errors.

use thiserror::Error;

/// Errors in SDK configuration or call arguments.
///
/// These are caught before a network call is attempted.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot have path segments appended (e.g. `data:` URLs).
    #[error("Base URL cannot be a base: {url}")]
    CannotBeABase {
        /// The rejected URL.
        url: String,
    },

    /// A path segment passed to the URL builder was empty.
    #[error("Empty URL path segment at position {position}")]
    EmptySegment {
        /// Zero-based index of the empty segment.
        position: usize,
    },

    /// A required environment variable is not set.
    #[error("Missing environment variable: {var}")]
    MissingEnv {
        /// The variable name.
        var: &'static str,
    },

    /// An environment variable holds a value that cannot be parsed.
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv {
        /// The variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl ConfigError {
    /// Creates an invalid environment value error.
    pub fn invalid_env(var: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEnv {
            var,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env() {
        let err = ConfigError::MissingEnv {
            var: "SYNAPSE_CLIENT_ID",
        };
        assert_eq!(
            err.to_string(),
            "Missing environment variable: SYNAPSE_CLIENT_ID"
        );
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_empty_segment() {
        let err = ConfigError::EmptySegment { position: 2 };
        assert_eq!(err.to_string(), "Empty URL path segment at position 2");
    }

    #[test]
    fn test_invalid_env() {
        let err = ConfigError::invalid_env("SYNAPSE_TIMEOUT_SECS", "soon");
        assert_eq!(err.to_string(), "Invalid value for SYNAPSE_TIMEOUT_SECS: soon");
    }
}
