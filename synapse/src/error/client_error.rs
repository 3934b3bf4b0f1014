//! Transport errors.

use thiserror::Error;

/// Errors from the HTTP transport layer.
///
/// The SDK performs no retries, so any of these fails the whole operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to a network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A header value could not be encoded.
    #[error("Invalid value for header {name}: {message}")]
    InvalidHeader {
        /// The header name.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl ClientError {
    /// Returns `true` if the request hit the configured timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout(),
            Self::InvalidHeader { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_header_display() {
        let err = ClientError::InvalidHeader {
            name: "x-sp-user",
            message: "contains newline".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for header x-sp-user: contains newline"
        );
        assert!(!err.is_timeout());
    }
}
