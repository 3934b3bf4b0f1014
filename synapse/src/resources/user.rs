//! The user facade and its OAuth state.

use serde_json::json;
use tracing::{debug, info, instrument};

use super::{Client, Node};
use crate::client::ApiRequest;
use crate::credentials::AuthState;
use crate::endpoint::{NODES, OAUTH, USERS};
use crate::error::{ApiError, AuthError, ValidationError};
use crate::method::RestMethod;
use crate::query::QueryParams;
use crate::response::{ListView, RawPayload, ResourceKind, SingleView, to_list_view, to_single_view};

/// A user on the platform, plus the credentials needed to act as them.
///
/// Reads go out with whatever OAuth key is held. Writes require one: call
/// [`User::authenticate`] first, or they fail with
/// [`AuthError::MissingOAuthKey`] without touching the network.
#[derive(Debug, Clone)]
pub struct User {
    client: Client,
    id: String,
    auth: AuthState,
    view: Option<SingleView>,
}

impl User {
    pub(crate) fn new(client: Client, id: String, auth: AuthState) -> Self {
        Self {
            client,
            id,
            auth,
            view: None,
        }
    }

    /// Wraps a fetched user view, picking up its `refresh_token`.
    pub(crate) fn from_view(client: Client, id: String, view: SingleView) -> Self {
        let auth = view
            .payload
            .str_field("refresh_token")
            .map(AuthState::with_refresh_token)
            .unwrap_or_default();
        Self {
            client,
            id,
            auth,
            view: Some(view),
        }
    }

    /// Returns the user id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the current auth state.
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// Returns the most recently fetched or updated view, if any.
    pub fn view(&self) -> Option<&SingleView> {
        self.view.as_ref()
    }

    /// Builds a URL under `/users/{id}`.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<url::Url, ApiError> {
        let mut path = Vec::with_capacity(segments.len() + 2);
        path.push(USERS);
        path.push(self.id.as_str());
        path.extend_from_slice(segments);
        self.client.url(&path)
    }

    /// Sends a user-scoped request.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingOAuthKey`] for any non-`GET` request made
    /// without an OAuth key. No request is sent in that case.
    pub(crate) async fn send(&self, request: ApiRequest) -> Result<RawPayload, ApiError> {
        let oauth_key = self.auth.oauth_key();
        if oauth_key.is_none() && !request.method.is_safe() {
            debug!(user_id = %self.id, method = %request.method, "refusing unauthenticated write");
            return Err(AuthError::MissingOAuthKey {
                user_id: self.id.clone(),
            }
            .into());
        }
        self.client.send(request, oauth_key).await
    }

    /// Exchanges the refresh token for an OAuth key.
    ///
    /// `body` overrides the default `{"refresh_token": ...}` payload, e.g.
    /// to answer an MFA challenge. On failure the held state is untouched.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingRefreshToken`] when no body is given and
    /// no refresh token is held, [`ValidationError::MissingField`] when the
    /// response has no `oauth_key`, or any pipeline error.
    #[instrument(name = "synapse_authenticate", skip(self, body), fields(user_id = %self.id))]
    pub async fn authenticate(&mut self, body: Option<&str>) -> Result<(), ApiError> {
        let body = match body {
            Some(body) => body.to_string(),
            None => {
                let token = self
                    .auth
                    .refresh_token()
                    .ok_or_else(|| AuthError::MissingRefreshToken {
                        user_id: self.id.clone(),
                    })?;
                json!({ "refresh_token": token }).to_string()
            }
        };

        let url = self.client.url(&[OAUTH, self.id.as_str()])?;
        let request = ApiRequest::new(RestMethod::Post, url).body(body);
        let payload = self.client.send(request, None).await?;

        let oauth_key = payload
            .str_field("oauth_key")
            .filter(|key| !key.is_empty())
            .ok_or(ValidationError::MissingField { field: "oauth_key" })?
            .to_string();
        let refresh_token = payload.str_field("refresh_token").map(str::to_string);

        self.auth.update(oauth_key, refresh_token);
        info!("user authenticated");
        Ok(())
    }

    /// Updates the user and refreshes the held view.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingOAuthKey`] if not authenticated, or any
    /// pipeline error. The held view is untouched on failure.
    pub async fn update(&mut self, body: impl Into<String>) -> Result<SingleView, ApiError> {
        let request = ApiRequest::new(RestMethod::Patch, self.url(&[])?).body(body);
        let payload = self.send(request).await?;
        let view = to_single_view(payload, ResourceKind::User);
        self.view = Some(view.clone());
        Ok(view)
    }

    /// Lists the user's nodes.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_nodes(&self, query: QueryParams) -> Result<ListView, ApiError> {
        let request = ApiRequest::get(self.url(&[NODES])?).query(query);
        let payload = self.send(request).await?;
        Ok(to_list_view(payload, ResourceKind::Node)?)
    }

    /// Links one or more nodes. The server answers with the created nodes.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingOAuthKey`] if not authenticated, or any
    /// pipeline error.
    pub async fn create_node(&self, body: impl Into<String>) -> Result<ListView, ApiError> {
        let request = ApiRequest::new(RestMethod::Post, self.url(&[NODES])?).body(body);
        let payload = self.send(request).await?;
        Ok(to_list_view(payload, ResourceKind::Node)?)
    }

    /// Returns a facade for one of the user's nodes.
    pub fn node(&self, node_id: impl Into<String>) -> Node<'_> {
        Node::new(self, node_id.into())
    }
}
