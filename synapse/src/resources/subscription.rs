//! The webhook subscription facade.

use super::Client;
use crate::client::ApiRequest;
use crate::endpoint::SUBSCRIPTIONS;
use crate::error::ApiError;
use crate::method::RestMethod;
use crate::response::{ResourceKind, SingleView, to_single_view};

/// A webhook subscription. Subscriptions are platform-scoped, so calls only
/// carry the gateway credentials.
#[derive(Debug, Clone)]
pub struct Subscription<'a> {
    client: &'a Client,
    id: String,
}

impl<'a> Subscription<'a> {
    pub(crate) fn new(client: &'a Client, id: String) -> Self {
        Self { client, id }
    }

    /// Returns the subscription id.
    pub fn id(&self) -> &str {
        &self.id
    }

    async fn send(&self, request: ApiRequest) -> Result<SingleView, ApiError> {
        let payload = self.client.send(request, None).await?;
        Ok(to_single_view(payload, ResourceKind::Subscription))
    }

    /// Fetches the subscription.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get(&self) -> Result<SingleView, ApiError> {
        let url = self.client.url(&[SUBSCRIPTIONS, self.id.as_str()])?;
        self.send(ApiRequest::get(url)).await
    }

    /// Updates the subscription (callback URL, scope, active flag).
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn update(&self, body: impl Into<String>) -> Result<SingleView, ApiError> {
        let url = self.client.url(&[SUBSCRIPTIONS, self.id.as_str()])?;
        self.send(ApiRequest::new(RestMethod::Patch, url).body(body))
            .await
    }
}
