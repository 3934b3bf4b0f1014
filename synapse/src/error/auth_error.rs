//! Authentication state errors.

use thiserror::Error;

/// Errors raised when a user facade lacks the credentials a call needs.
///
/// These are caller errors: they are detected before a request is built.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A mutating user-scoped call was attempted without an OAuth key.
    #[error("User {user_id} has no OAuth key; call authenticate first")]
    MissingOAuthKey {
        /// The user the call was issued for.
        user_id: String,
    },

    /// Authentication needs a refresh token and none is known.
    #[error("User {user_id} has no refresh token")]
    MissingRefreshToken {
        /// The user the call was issued for.
        user_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_oauth_key_display() {
        let err = AuthError::MissingOAuthKey {
            user_id: "5bec6ebe".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "User 5bec6ebe has no OAuth key; call authenticate first"
        );
    }

    #[test]
    fn test_missing_refresh_token_display() {
        let err = AuthError::MissingRefreshToken {
            user_id: "u1".to_string(),
        };
        assert_eq!(err.to_string(), "User u1 has no refresh token");
    }
}
