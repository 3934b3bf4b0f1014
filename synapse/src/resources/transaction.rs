//! The transaction facade.

use url::Url;

use super::User;
use crate::client::ApiRequest;
use crate::endpoint::{NODES, TRANS};
use crate::error::ApiError;
use crate::method::RestMethod;
use crate::response::{ResourceKind, SingleView, to_single_view};

/// A transaction on one of a user's nodes.
#[derive(Debug, Clone)]
pub struct Transaction<'a> {
    user: &'a User,
    node_id: String,
    id: String,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(user: &'a User, node_id: String, id: String) -> Self {
        Self { user, node_id, id }
    }

    /// Returns the transaction id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the id of the node the transaction belongs to.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    fn url(&self) -> Result<Url, ApiError> {
        self.user
            .url(&[NODES, self.node_id.as_str(), TRANS, self.id.as_str()])
    }

    async fn send(&self, request: ApiRequest) -> Result<SingleView, ApiError> {
        let payload = self.user.send(request).await?;
        Ok(to_single_view(payload, ResourceKind::Transaction))
    }

    /// Fetches the transaction.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get(&self) -> Result<SingleView, ApiError> {
        self.send(ApiRequest::get(self.url()?)).await
    }

    /// Adds a comment to the transaction's status timeline.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingOAuthKey`](crate::error::AuthError::MissingOAuthKey)
    /// if the user is not authenticated, or any pipeline error.
    pub async fn comment_on_status(&self, body: impl Into<String>) -> Result<SingleView, ApiError> {
        self.send(ApiRequest::new(RestMethod::Patch, self.url()?).body(body))
            .await
    }

    /// Cancels the transaction.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingOAuthKey`](crate::error::AuthError::MissingOAuthKey)
    /// if the user is not authenticated, or any pipeline error.
    pub async fn cancel(&self) -> Result<SingleView, ApiError> {
        self.send(ApiRequest::new(RestMethod::Delete, self.url()?))
            .await
    }
}
