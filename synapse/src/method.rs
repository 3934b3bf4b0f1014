//! HTTP methods used by the SynapseFI API.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods the SynapseFI API accepts.
///
/// The API never uses `PUT`, `HEAD` or `OPTIONS`, so the enum is closed
/// over the four verbs the facades issue.
///
/// ## Examples
///
/// ```rust
/// use synapse::RestMethod;
///
/// let method = RestMethod::Patch;
/// assert!(method.has_body());
/// assert!(!method.is_safe());
///
/// let parsed: RestMethod = "DELETE".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Delete);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// Read a resource or a paginated collection.
    Get,
    /// Create a resource or trigger an action (including OAuth).
    Post,
    /// Partially update a resource.
    Patch,
    /// Remove a resource or cancel a transaction.
    Delete,
}

impl RestMethod {
    /// Returns `true` if requests with this method may carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }

    /// Returns `true` if this method is read-only.
    ///
    /// Non-safe methods on a user's resources need an OAuth key.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Get)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display() {
        assert_eq!(RestMethod::Get.to_string(), "GET");
        assert_eq!(RestMethod::Patch.to_string(), "PATCH");
        assert_eq!(RestMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_parse() {
        assert_eq!("POST".parse::<RestMethod>().unwrap(), RestMethod::Post);
        assert_eq!("PATCH".parse::<RestMethod>().unwrap(), RestMethod::Patch);
        assert!("PUT".parse::<RestMethod>().is_err());
    }

    #[test]
    fn test_has_body() {
        assert!(!RestMethod::Get.has_body());
        assert!(RestMethod::Post.has_body());
        assert!(RestMethod::Patch.has_body());
        assert!(!RestMethod::Delete.has_body());
    }

    #[test]
    fn test_only_get_is_safe() {
        let safe: Vec<_> = RestMethod::iter().filter(RestMethod::is_safe).collect();
        assert_eq!(safe, vec![RestMethod::Get]);
    }

    #[test]
    fn test_to_reqwest() {
        assert_eq!(RestMethod::Get.to_reqwest(), reqwest::Method::GET);
        assert_eq!(RestMethod::Patch.to_reqwest(), reqwest::Method::PATCH);
        assert_eq!(reqwest::Method::from(RestMethod::Delete), reqwest::Method::DELETE);
    }
}
