//! Top-level API error type.

use super::{AuthError, ClientError, ConfigError, DomainError, ErrorKind, ValidationError};
use thiserror::Error;

/// Top-level error type for all SDK operations.
///
/// A call either fully succeeds or fails with exactly one of these layers;
/// there is no partial success.
///
/// ## Examples
///
/// ```rust,ignore
/// use synapse::ApiError;
///
/// match client.get_users(Default::default()).await {
///     Ok(users) => println!("{} users", users.items.len()),
///     Err(ApiError::Domain(e)) => eprintln!("server refused: {} ({})", e.kind, e.http_code),
///     Err(ApiError::Client(e)) => eprintln!("network failure: {e}"),
///     Err(other) => eprintln!("{other}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failures. Never retried.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The response body was not the JSON shape we expected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered with a non-200 status.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Invalid configuration or URL input.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Missing authentication state.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Returns the classified domain error, if the server rejected the call.
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the domain error kind, if the server rejected the call.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.domain().map(|e| e.kind)
    }

    /// Returns `true` if the failure was detected before any request was sent.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_error() {
        let api_err: ApiError = ConfigError::EmptySegment { position: 1 }.into();
        assert!(matches!(api_err, ApiError::Config(_)));
        assert!(api_err.is_caller_error());
        assert_eq!(api_err.kind(), None);
    }

    #[test]
    fn test_from_domain_error() {
        let domain = DomainError {
            status: 404,
            http_code: "404".to_string(),
            error_code: Some("200".to_string()),
            kind: ErrorKind::NotFound,
            message: "Unable to find user".to_string(),
        };
        let api_err: ApiError = domain.into();
        assert_eq!(api_err.kind(), Some(ErrorKind::NotFound));
        assert!(!api_err.is_caller_error());
        assert_eq!(api_err.domain().map(|e| e.http_code.as_str()), Some("404"));
    }

    #[test]
    fn test_error_display_is_transparent() {
        let err = ApiError::Auth(AuthError::MissingOAuthKey {
            user_id: "abc".to_string(),
        });
        assert!(err.to_string().contains("abc"));
    }
}
