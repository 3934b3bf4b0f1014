//! Client credentials, user auth state, and request header composition.

use std::fmt;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::ClientError;

/// Gateway header: `<client_id>|<client_secret>`.
pub const GATEWAY_HEADER: &str = "x-sp-gateway";
/// End-user IP header.
pub const USER_IP_HEADER: &str = "x-sp-user-ip";
/// User header: `<oauth_key>|<fingerprint>`.
pub const USER_HEADER: &str = "x-sp-user";

/// Platform credentials sent on every request.
///
/// Immutable once constructed. `Debug` output redacts the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
    fingerprint: String,
    ip_address: String,
}

impl ClientCredentials {
    /// Creates a credential set.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        fingerprint: impl Into<String>,
        ip_address: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            fingerprint: fingerprint.into(),
            ip_address: ip_address.into(),
        }
    }

    /// Returns the platform client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the device fingerprint.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Returns the end-user IP address.
    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    /// Composes the header set for one request.
    ///
    /// `oauth_key` is the authenticated user's key; before authentication
    /// the user header carries only the fingerprint (`|<fingerprint>`).
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if any value contains bytes
    /// that are not valid in a header.
    pub fn headers(&self, oauth_key: Option<&str>) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            GATEWAY_HEADER,
            header_value(GATEWAY_HEADER, &format!("{}|{}", self.client_id, self.client_secret))?,
        );
        headers.insert(USER_IP_HEADER, header_value(USER_IP_HEADER, &self.ip_address)?);
        headers.insert(
            USER_HEADER,
            header_value(
                USER_HEADER,
                &format!("{}|{}", oauth_key.unwrap_or_default(), self.fingerprint),
            )?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("fingerprint", &self.fingerprint)
            .field("ip_address", &self.ip_address)
            .finish()
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ClientError> {
    let mut value = HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
        name,
        message: e.to_string(),
    })?;
    value.set_sensitive(name != USER_IP_HEADER);
    Ok(value)
}

/// OAuth state held by a user facade.
///
/// Only written after a successful authentication.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    oauth_key: Option<String>,
    refresh_token: Option<String>,
}

impl AuthState {
    /// Creates state holding only a refresh token.
    pub fn with_refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            oauth_key: None,
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Returns the OAuth key if one is present and non-empty.
    pub fn oauth_key(&self) -> Option<&str> {
        self.oauth_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Returns the refresh token if one is present and non-empty.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Returns `true` if a non-empty OAuth key is held.
    pub fn is_authenticated(&self) -> bool {
        self.oauth_key().is_some()
    }

    /// Records the result of a successful authentication.
    ///
    /// A missing refresh token in the response keeps the current one.
    pub(crate) fn update(&mut self, oauth_key: String, refresh_token: Option<String>) {
        self.oauth_key = Some(oauth_key);
        if let Some(token) = refresh_token {
            self.refresh_token = Some(token);
        }
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("AuthState")
            .field("oauth_key", &redact(&self.oauth_key))
            .field("refresh_token", &redact(&self.refresh_token))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> ClientCredentials {
        ClientCredentials::new("client_id_abc", "client_secret_xyz", "fp123", "127.0.0.1")
    }

    #[test]
    fn test_headers_before_auth() {
        let headers = creds().headers(None).unwrap();
        assert_eq!(headers[GATEWAY_HEADER], "client_id_abc|client_secret_xyz");
        assert_eq!(headers[USER_IP_HEADER], "127.0.0.1");
        assert_eq!(headers[USER_HEADER], "|fp123");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_headers_with_oauth_key() {
        let headers = creds().headers(Some("oauth_key_1")).unwrap();
        assert_eq!(headers[USER_HEADER], "oauth_key_1|fp123");
        assert!(headers[GATEWAY_HEADER].is_sensitive());
        assert!(!headers[USER_IP_HEADER].is_sensitive());
    }

    #[test]
    fn test_invalid_header_value() {
        let creds = ClientCredentials::new("id", "secret", "fp\n", "127.0.0.1");
        let err = creds.headers(None).unwrap_err();
        assert!(matches!(err, ClientError::InvalidHeader { name: USER_HEADER, .. }));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", creds());
        assert!(debug.contains("client_id_abc"));
        assert!(!debug.contains("client_secret_xyz"));

        let mut auth = AuthState::with_refresh_token("refresh_1");
        auth.update("oauth_1".to_string(), None);
        let debug = format!("{auth:?}");
        assert!(!debug.contains("oauth_1"));
        assert!(!debug.contains("refresh_1"));
    }

    #[test]
    fn test_auth_state_update() {
        let mut auth = AuthState::with_refresh_token("refresh_1");
        assert!(!auth.is_authenticated());
        assert_eq!(auth.refresh_token(), Some("refresh_1"));

        auth.update("oauth_1".to_string(), Some("refresh_2".to_string()));
        assert_eq!(auth.oauth_key(), Some("oauth_1"));
        assert_eq!(auth.refresh_token(), Some("refresh_2"));

        auth.update("oauth_2".to_string(), None);
        assert_eq!(auth.oauth_key(), Some("oauth_2"));
        assert_eq!(auth.refresh_token(), Some("refresh_2"));
    }

    #[test]
    fn test_empty_oauth_key_is_not_authenticated() {
        let mut auth = AuthState::default();
        auth.update(String::new(), None);
        assert!(!auth.is_authenticated());
        assert_eq!(auth.oauth_key(), None);
    }
}
