//! Request execution with tracing instrumentation.
//!
//! [`RequestExecutor`] performs exactly one HTTP round trip per call and hands
//! back the raw status and body. It never inspects the status: classification
//! happens afterwards in [`classify`](crate::error::classify).

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use tracing::{Span, debug, instrument};
use url::Url;

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::{ApiError, ClientError};
use crate::method::RestMethod;
use crate::query::QueryParams;

/// One logical API call, before headers are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: RestMethod,
    /// Endpoint URL without a query string.
    pub url: Url,
    /// Query parameters.
    pub query: QueryParams,
    /// Pre-serialized JSON body, sent verbatim.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Creates a request with no query and no body.
    pub fn new(method: RestMethod, url: Url) -> Self {
        Self {
            method,
            url,
            query: QueryParams::default(),
            body: None,
        }
    }

    /// Shorthand for a `GET`.
    pub fn get(url: Url) -> Self {
        Self::new(RestMethod::Get, url)
    }

    /// Sets the query parameters.
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Sets the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the URL with the query string applied.
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.set_query(Some(&self.query.to_query_string()));
        }
        url
    }
}

/// The raw outcome of a round trip, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Bytes,
}

/// Builder for a [`RequestExecutor`].
#[derive(Debug)]
pub struct RequestExecutorBuilder {
    timeout: Duration,
}

impl RequestExecutorBuilder {
    fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the [`RequestExecutor`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<RequestExecutor, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ClientError::Request)?;

        Ok(RequestExecutor { client })
    }
}

/// Async HTTP executor owned by a [`Client`](crate::Client).
///
/// Cloning shares the underlying connection pool. There are no retries: a
/// transport failure is returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: reqwest::Client,
}

impl RequestExecutor {
    /// Creates a new builder.
    pub fn builder() -> RequestExecutorBuilder {
        RequestExecutorBuilder::new()
    }

    /// Sends `request` with `headers` and returns the raw response.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::Request`] if the request could not be sent or
    /// the body could not be read. Non-2xx statuses are not errors here.
    #[instrument(
        name = "synapse_request",
        skip(self, request, headers),
        fields(
            http.method = %request.method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute(
        &self,
        request: &ApiRequest,
        headers: HeaderMap,
    ) -> Result<RawResponse, ApiError> {
        let full_url = request.full_url();
        Span::current().record("http.url", full_url.as_str());

        let mut builder = self
            .client
            .request(request.method.to_reqwest(), full_url)
            .headers(headers);

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(ClientError::Request)?;
        let status = response.status();
        let status_code = status.as_u16();
        Span::current().record("http.status_code", status_code);

        let otel_status = if status_code == 200 {
            "OK"
        } else if status.is_server_error() {
            "ERROR"
        } else {
            "UNSET"
        };
        Span::current().record("otel.status_code", otel_status);

        let body = response.bytes().await.map_err(ClientError::Request)?;
        debug!(status = status_code, bytes = body.len(), "response received");

        Ok(RawResponse {
            status: status_code,
            body,
        })
    }
}
