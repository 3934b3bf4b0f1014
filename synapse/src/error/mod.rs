//! Layered error types for the SDK.
//!
//! Every failure a facade call can produce falls into one of these layers:
//! - [`ApiError`] - Top-level error returned by every operation
//! - [`ClientError`] - Transport failures (connection, TLS, headers)
//! - [`ValidationError`] - Response bytes that are not the expected JSON
//! - [`DomainError`] - Non-200 responses, classified into an [`ErrorKind`]
//! - [`ConfigError`] - Caller errors caught before any network call
//! - [`AuthError`] - Missing OAuth state on user-scoped calls

mod api_error;
mod auth_error;
mod client_error;
mod config_error;
mod domain_error;
mod validation_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use domain_error::{DomainError, ErrorKind, classify};
pub use validation_error::ValidationError;
