//! Query string construction.
//!
//! Callers may only set four query keys: `query`, `show_refresh_tokens`,
//! `page` and `per_page`. Loose key/value input passed through
//! [`QueryParams::from_pairs`] silently drops every other key, matching the
//! behavior existing integrations rely on. Facades add their own flags
//! (`full_dehydrate`, `is_credit`, ...) through a crate-private path.

use tracing::debug;
use url::form_urlencoded;

/// Recognized caller keys, in serialization order.
pub const ALLOWED_KEYS: [&str; 4] = ["query", "show_refresh_tokens", "page", "per_page"];

/// A loosely typed query value, as accepted by [`QueryParams::from_pairs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// A string value.
    Str(String),
    /// An integer value.
    Int(i64),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

/// Query parameters for list and search calls.
///
/// ## Examples
///
/// ```rust
/// use synapse::{QueryParams, QueryValue};
///
/// let params = QueryParams::new().per_page(3).page(2);
/// assert_eq!(params.to_query_string(), "page=2&per_page=3");
///
/// let loose = QueryParams::from_pairs([("page", QueryValue::from(2)), ("sort", QueryValue::from("desc"))]);
/// assert_eq!(loose.to_query_string(), "page=2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    query: Option<String>,
    show_refresh_tokens: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
    flags: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text search filter.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets `show_refresh_tokens` (the server expects `"yes"` or `"no"`).
    pub fn show_refresh_tokens(mut self, value: impl Into<String>) -> Self {
        self.show_refresh_tokens = Some(value.into());
        self
    }

    /// Sets the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Builds parameters from loose key/value pairs.
    ///
    /// Keys outside [`ALLOWED_KEYS`] are dropped. `page`/`per_page` values
    /// that are not non-negative integers are dropped as well.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, QueryValue)>,
        K: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            match key {
                "query" => params.query = Some(value.into_string()),
                "show_refresh_tokens" => params.show_refresh_tokens = Some(value.into_string()),
                "page" | "per_page" => {
                    let Some(number) = value.as_u32() else {
                        debug!(key, ?value, "dropping non-integer paging value");
                        continue;
                    };
                    if key == "page" {
                        params.page = Some(number);
                    } else {
                        params.per_page = Some(number);
                    }
                }
                _ => debug!(key, "dropping unrecognized query key"),
            }
        }
        params
    }

    /// Adds an SDK-controlled flag that bypasses the caller allow-list.
    pub(crate) fn flag(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.flags.push((key, value.into()));
        self
    }

    /// Returns `true` if nothing would be serialized.
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.show_refresh_tokens.is_none()
            && self.page.is_none()
            && self.per_page.is_none()
            && self.flags.is_empty()
    }

    /// Serializes to a `application/x-www-form-urlencoded` query string.
    ///
    /// Keys appear in [`ALLOWED_KEYS`] order followed by SDK flags.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(query) = &self.query {
            serializer.append_pair("query", query);
        }
        if let Some(show) = &self.show_refresh_tokens {
            serializer.append_pair("show_refresh_tokens", show);
        }
        if let Some(page) = self.page {
            serializer.append_pair("page", &page.to_string());
        }
        if let Some(per_page) = self.per_page {
            serializer.append_pair("per_page", &per_page.to_string());
        }
        for (key, value) in &self.flags {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl QueryValue {
    fn into_string(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Int(i) => i.to_string(),
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Int(i) => u32::try_from(*i).ok(),
            Self::Str(s) => s.parse().ok(),
        }
    }
}
