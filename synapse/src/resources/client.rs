//! The platform-level facade.

use std::sync::Arc;

use url::Url;

use super::{Subscription, User};
use crate::client::{ApiRequest, RequestExecutor};
use crate::config::SynapseConfig;
use crate::credentials::{AuthState, ClientCredentials};
use crate::endpoint::{self, CLIENT, INSTITUTIONS, NODES, SUBSCRIPTIONS, TRANS, USERS};
use crate::error::{ApiError, ValidationError, classify};
use crate::method::RestMethod;
use crate::query::QueryParams;
use crate::response::{ListView, RawPayload, ResourceKind, SingleView, to_list_view, to_single_view};

/// Entry point to the SDK.
///
/// Owns its [`RequestExecutor`] and a shared, read-only copy of the
/// platform credentials. Cloning is cheap and clones share the connection
/// pool; distinct clients built from distinct configs share nothing.
///
/// ## Examples
///
/// ```rust,ignore
/// use synapse::{Client, QueryParams, SynapseConfig};
///
/// let client = Client::new(SynapseConfig::from_env()?)?;
/// let users = client.get_users(QueryParams::new().per_page(3).page(2)).await?;
/// for user in &users.items {
///     println!("{:?}", user.id);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    executor: RequestExecutor,
    base_url: Url,
    credentials: Arc<ClientCredentials>,
}

impl Client {
    /// Creates a client from a configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: SynapseConfig) -> Result<Self, ApiError> {
        let executor = RequestExecutor::builder().timeout(config.timeout).build()?;
        Ok(Self {
            executor,
            base_url: config.base_url,
            credentials: Arc::new(config.credentials),
        })
    }

    /// Creates a client from `SYNAPSE_*` environment variables.
    ///
    /// ## Errors
    ///
    /// Returns an error if configuration is missing or invalid.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(SynapseConfig::from_env()?)
    }

    /// Returns the versioned API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the platform credentials.
    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// Builds an endpoint URL under this client's API root.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        Ok(endpoint::build_url(&self.base_url, segments)?)
    }

    /// Runs one request through the pipeline: execute, classify, decode.
    pub(crate) async fn send(
        &self,
        request: ApiRequest,
        oauth_key: Option<&str>,
    ) -> Result<RawPayload, ApiError> {
        let headers = self.credentials.headers(oauth_key)?;
        let response = self.executor.execute(&request, headers).await?;
        classify(response.status, &response.body)?;
        Ok(RawPayload::decode(&response.body)?)
    }

    async fn single(&self, request: ApiRequest, kind: ResourceKind) -> Result<SingleView, ApiError> {
        let payload = self.send(request, None).await?;
        Ok(to_single_view(payload, kind))
    }

    async fn list(&self, request: ApiRequest, kind: ResourceKind) -> Result<ListView, ApiError> {
        let payload = self.send(request, None).await?;
        Ok(to_list_view(payload, kind)?)
    }

    /// Lists users on the platform.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_users(&self, query: QueryParams) -> Result<ListView, ApiError> {
        let request = ApiRequest::get(self.url(&[USERS])?).query(query);
        self.list(request, ResourceKind::User).await
    }

    /// Fetches one user and returns a facade for it.
    ///
    /// The returned user carries the refresh token from the payload, ready
    /// for [`User::authenticate`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_user(&self, user_id: &str, full_dehydrate: bool) -> Result<User, ApiError> {
        let mut query = QueryParams::new();
        if full_dehydrate {
            query = query.flag("full_dehydrate", "yes");
        }
        let request = ApiRequest::get(self.url(&[USERS, user_id])?).query(query);
        let view = self.single(request, ResourceKind::user(full_dehydrate)).await?;
        Ok(User::from_view(self.clone(), user_id.to_string(), view))
    }

    /// Creates a user from a pre-serialized JSON body.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::MissingField`] if the response carries no
    /// `_id`, or any pipeline error.
    pub async fn create_user(&self, body: impl Into<String>) -> Result<User, ApiError> {
        let request = ApiRequest::new(RestMethod::Post, self.url(&[USERS])?).body(body);
        let view = self.single(request, ResourceKind::User).await?;
        let id = view
            .id
            .clone()
            .ok_or(ValidationError::MissingField { field: "_id" })?;
        Ok(User::from_view(self.clone(), id, view))
    }

    /// Returns a facade for a known user without fetching it.
    pub fn user(&self, user_id: impl Into<String>, refresh_token: impl Into<String>) -> User {
        User::new(
            self.clone(),
            user_id.into(),
            AuthState::with_refresh_token(refresh_token),
        )
    }

    /// Lists every transaction on the platform.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_transactions(&self, query: QueryParams) -> Result<ListView, ApiError> {
        let request = ApiRequest::get(self.url(&[TRANS])?).query(query);
        self.list(request, ResourceKind::Transaction).await
    }

    /// Lists every node on the platform.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_nodes(&self, query: QueryParams) -> Result<ListView, ApiError> {
        let request = ApiRequest::get(self.url(&[NODES])?).query(query);
        self.list(request, ResourceKind::Node).await
    }

    /// Lists webhook subscriptions.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_subscriptions(&self, query: QueryParams) -> Result<ListView, ApiError> {
        let request = ApiRequest::get(self.url(&[SUBSCRIPTIONS])?).query(query);
        self.list(request, ResourceKind::Subscription).await
    }

    /// Creates a webhook subscription.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn create_subscription(&self, body: impl Into<String>) -> Result<SingleView, ApiError> {
        let request = ApiRequest::new(RestMethod::Post, self.url(&[SUBSCRIPTIONS])?).body(body);
        self.single(request, ResourceKind::Subscription).await
    }

    /// Returns a facade for one subscription.
    pub fn subscription(&self, subscription_id: impl Into<String>) -> Subscription<'_> {
        Subscription::new(self, subscription_id.into())
    }

    /// Fetches one subscription.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_subscription(&self, subscription_id: &str) -> Result<SingleView, ApiError> {
        self.subscription(subscription_id).get().await
    }

    /// Updates one subscription.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn update_subscription(
        &self,
        subscription_id: &str,
        body: impl Into<String>,
    ) -> Result<SingleView, ApiError> {
        self.subscription(subscription_id).update(body).await
    }

    /// Lists supported bank institutions.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_institutions(&self) -> Result<SingleView, ApiError> {
        let request = ApiRequest::get(self.url(&[INSTITUTIONS])?);
        self.single(request, ResourceKind::Generic).await
    }

    /// Issues a public key for client-side use, restricted to `scope`
    /// (e.g. `"OAUTH|POST,USERS|POST"`).
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_public_key(&self, scope: &str) -> Result<SingleView, ApiError> {
        let query = QueryParams::new()
            .flag("issue_public_key", "YES")
            .flag("scope", scope);
        let request = ApiRequest::get(self.url(&[CLIENT])?).query(query);
        self.single(request, ResourceKind::Generic).await
    }
}
