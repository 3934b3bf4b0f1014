//! Endpoint URL construction.
//!
//! URLs are built from the configured API root (which already carries the
//! version segment) and an ordered list of path segments. Each segment is
//! percent-encoded exactly once by `url`, so identifiers can never inject
//! extra path components.

use url::Url;

use crate::error::ConfigError;

/// Path segment for the users collection.
pub const USERS: &str = "users";
/// Path segment for node collections.
pub const NODES: &str = "nodes";
/// Path segment for transaction collections.
pub const TRANS: &str = "trans";
/// Path segment for webhook subscriptions.
pub const SUBSCRIPTIONS: &str = "subscriptions";
/// Path segment for the OAuth endpoint.
pub const OAUTH: &str = "oauth";
/// Path segment for the institutions listing.
pub const INSTITUTIONS: &str = "institutions";
/// Path segment for client-level endpoints (public key issuance).
pub const CLIENT: &str = "client";
/// Path segment that triggers sandbox dummy transactions on a node.
pub const DUMMY_TRAN: &str = "dummy-tran";

/// Joins `segments` onto `base`.
///
/// A trailing slash on `base` is ignored, so the result always has exactly
/// one `/` between components.
///
/// ## Errors
///
/// Returns [`ConfigError::EmptySegment`] if any segment is empty and
/// [`ConfigError::CannotBeABase`] if `base` cannot take path segments.
///
/// ## Examples
///
/// ```rust
/// use synapse::endpoint::{build_url, NODES, USERS};
/// use url::Url;
///
/// let base = Url::parse("https://uat-api.synapsefi.com/v3.1").unwrap();
/// let url = build_url(&base, &[USERS, "5bec6ebe", NODES]).unwrap();
/// assert_eq!(url.as_str(), "https://uat-api.synapsefi.com/v3.1/users/5bec6ebe/nodes");
/// ```
pub fn build_url(base: &Url, segments: &[&str]) -> Result<Url, ConfigError> {
    if let Some(position) = segments.iter().position(|s| s.is_empty()) {
        return Err(ConfigError::EmptySegment { position });
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ConfigError::CannotBeABase {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
