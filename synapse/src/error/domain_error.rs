//! Classification of non-200 responses into domain errors.

use serde_json::Value;
use strum::{Display, EnumIter};
use thiserror::Error;
use tracing::{debug, warn};

use super::ApiError;

/// Closed set of failure kinds the server can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ErrorKind {
    /// Client credentials, OAuth key or fingerprint were rejected.
    AuthenticationFailed,
    /// The payload or query values were rejected.
    ValidationFailed,
    /// The addressed object does not exist.
    NotFound,
    /// Too many requests.
    RateLimited,
    /// The server failed or is unavailable.
    ServerError,
    /// A code we have no mapping for.
    Unknown,
}

/// Server codes and the kind each one maps to.
///
/// Holds both HTTP-style `http_code` values and SynapseFI `error_code` values.
const CODE_TABLE: &[(&str, ErrorKind)] = &[
    ("100", ErrorKind::AuthenticationFailed),
    ("110", ErrorKind::AuthenticationFailed),
    ("120", ErrorKind::AuthenticationFailed),
    ("131", ErrorKind::AuthenticationFailed),
    ("401", ErrorKind::AuthenticationFailed),
    ("403", ErrorKind::AuthenticationFailed),
    ("130", ErrorKind::ValidationFailed),
    ("140", ErrorKind::ValidationFailed),
    ("150", ErrorKind::ValidationFailed),
    ("400", ErrorKind::ValidationFailed),
    ("409", ErrorKind::ValidationFailed),
    ("422", ErrorKind::ValidationFailed),
    ("200", ErrorKind::NotFound),
    ("404", ErrorKind::NotFound),
    ("429", ErrorKind::RateLimited),
    ("500", ErrorKind::ServerError),
    ("502", ErrorKind::ServerError),
    ("503", ErrorKind::ServerError),
    ("504", ErrorKind::ServerError),
];

impl ErrorKind {
    /// Looks a server code up in the static table.
    ///
    /// Returns `None` for codes the table does not know.
    pub fn from_code(code: &str) -> Option<Self> {
        CODE_TABLE
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, kind)| *kind)
    }
}

/// A classified failure derived from a non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (http_code {http_code}): {message}")]
pub struct DomainError {
    /// The numeric HTTP status of the response.
    pub status: u16,
    /// The server's `http_code` field, or the status when the body has none.
    pub http_code: String,
    /// The server's `error_code` field, when present.
    pub error_code: Option<String>,
    /// The classified kind.
    pub kind: ErrorKind,
    /// Human readable message from the body.
    pub message: String,
}

/// Classifies a raw response.
///
/// Success is exactly status 200. Any other status yields an
/// [`ApiError::Domain`]. When the body is not JSON (a gateway's HTML error
/// page, say) the kind comes from the status itself and the raw body becomes
/// the message.
///
/// ## Examples
///
/// ```rust
/// use synapse::error::{classify, ApiError, ErrorKind};
///
/// assert!(classify(200, b"{}").is_ok());
///
/// let err = classify(401, br#"{"http_code":"131","message":"bad key"}"#).unwrap_err();
/// assert_eq!(err.kind(), Some(ErrorKind::AuthenticationFailed));
/// ```
pub fn classify(status: u16, body: &[u8]) -> Result<(), ApiError> {
    if status == 200 {
        return Ok(());
    }

    let raw_body = || String::from_utf8_lossy(body).into_owned();

    let (http_code, error_code, kind, message) = match serde_json::from_slice::<Value>(body) {
        Ok(decoded) => {
            let http_code = code_field(&decoded, "http_code");
            let error_code = code_field(&decoded, "error_code");
            let kind = http_code
                .as_deref()
                .and_then(ErrorKind::from_code)
                .or_else(|| error_code.as_deref().and_then(ErrorKind::from_code))
                .unwrap_or(ErrorKind::Unknown);
            let message = message_field(&decoded).unwrap_or_else(raw_body);
            (http_code, error_code, kind, message)
        }
        Err(e) => {
            debug!(status, error = %e, "error body is not JSON");
            let kind = ErrorKind::from_code(&status.to_string()).unwrap_or(ErrorKind::Unknown);
            (None, None, kind, raw_body())
        }
    };

    let err = DomainError {
        status,
        http_code: http_code.unwrap_or_else(|| status.to_string()),
        error_code,
        kind,
        message,
    };
    warn!(
        status,
        http_code = %err.http_code,
        kind = %err.kind,
        "SynapseFI rejected the request"
    );

    Err(err.into())
}

/// Reads a code field that the server sends as a string but older
/// endpoints occasionally send as a number.
fn code_field(decoded: &Value, field: &str) -> Option<String> {
    match decoded.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn message_field(decoded: &Value) -> Option<String> {
    decoded
        .get("error")
        .and_then(|e| e.get("en"))
        .and_then(Value::as_str)
        .or_else(|| decoded.get("message").and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn domain(result: Result<(), ApiError>) -> DomainError {
        match result {
            Err(ApiError::Domain(e)) => e,
            other => panic!("expected a domain error, got {other:?}"),
        }
    }

    #[test]
    fn test_status_200_is_ok_regardless_of_body() {
        assert!(classify(200, b"not even json").is_ok());
    }

    #[test]
    fn test_401_with_http_code_131() {
        let err = domain(classify(401, br#"{"http_code":"131","message":"expired"}"#));
        assert_eq!(err.kind, ErrorKind::AuthenticationFailed);
        assert_eq!(err.http_code, "131");
        assert_eq!(err.status, 401);
        assert_eq!(err.message, "expired");
    }

    #[test]
    fn test_synapse_error_body_shape() {
        let body = br#"{"error":{"en":"Unable to find node."},"error_code":"200","http_code":"404","success":false}"#;
        let err = domain(classify(404, body));
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.http_code, "404");
        assert_eq!(err.error_code.as_deref(), Some("200"));
        assert_eq!(err.message, "Unable to find node.");
    }

    #[test]
    fn test_unknown_http_code_falls_back_to_error_code() {
        let err = domain(classify(418, br#"{"http_code":"418","error_code":"400"}"#));
        assert_eq!(err.kind, ErrorKind::ValidationFailed);
        assert_eq!(err.http_code, "418");
    }

    #[test]
    fn test_unrecognized_code_maps_to_unknown() {
        let err = domain(classify(499, br#"{"http_code":"999","message":"??"}"#));
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.http_code, "999");
    }

    #[test]
    fn test_missing_http_code_reports_status() {
        let err = domain(classify(503, br#"{"message":"maintenance"}"#));
        assert_eq!(err.http_code, "503");
        assert_eq!(err.kind, ErrorKind::Unknown);
    }

    #[test]
    fn test_numeric_http_code_is_accepted() {
        let err = domain(classify(429, br#"{"http_code":429}"#));
        assert_eq!(err.http_code, "429");
        assert_eq!(err.kind, ErrorKind::RateLimited);
    }

    #[test]
    fn test_message_falls_back_to_raw_body() {
        let err = domain(classify(500, br#"{"http_code":"500"}"#));
        assert_eq!(err.kind, ErrorKind::ServerError);
        assert_eq!(err.message, r#"{"http_code":"500"}"#);
    }

    #[test]
    fn test_non_json_error_body_is_classified_by_status() {
        let err = domain(classify(503, b"<html>Service Unavailable</html>"));
        assert_eq!(err.kind, ErrorKind::ServerError);
        assert_eq!(err.status, 503);
        assert_eq!(err.http_code, "503");
        assert_eq!(err.error_code, None);
        assert_eq!(err.message, "<html>Service Unavailable</html>");

        let err = domain(classify(418, b"teapot"));
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.http_code, "418");
    }

    #[test]
    fn test_every_kind_but_unknown_is_reachable_from_the_table() {
        for kind in ErrorKind::iter().filter(|k| *k != ErrorKind::Unknown) {
            assert!(
                CODE_TABLE.iter().any(|(_, mapped)| *mapped == kind),
                "{kind} has no code"
            );
        }
    }

    #[test]
    fn test_display() {
        let err = domain(classify(401, br#"{"http_code":"131","message":"expired"}"#));
        assert_eq!(err.to_string(), "AuthenticationFailed (http_code 131): expired");
    }
}
