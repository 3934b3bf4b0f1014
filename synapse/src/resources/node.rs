//! The node facade.

use url::Url;

use super::{Transaction, User};
use crate::client::ApiRequest;
use crate::endpoint::{DUMMY_TRAN, NODES, TRANS};
use crate::error::ApiError;
use crate::method::RestMethod;
use crate::query::QueryParams;
use crate::response::{ListView, ResourceKind, SingleView, to_list_view, to_single_view};

/// A node (bank account, deposit account, card, ...) owned by a [`User`].
///
/// Borrows its user, so every call goes out with the user's current OAuth
/// key.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    user: &'a User,
    id: String,
}

impl<'a> Node<'a> {
    pub(crate) fn new(user: &'a User, id: String) -> Self {
        Self { user, id }
    }

    /// Returns the node id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the owning user.
    pub fn user(&self) -> &'a User {
        self.user
    }

    /// Builds a URL under `/users/{user}/nodes/{id}`.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut path = Vec::with_capacity(segments.len() + 2);
        path.push(NODES);
        path.push(self.id.as_str());
        path.extend_from_slice(segments);
        self.user.url(&path)
    }

    async fn single(
        &self,
        request: ApiRequest,
        kind: ResourceKind,
    ) -> Result<SingleView, ApiError> {
        let payload = self.user.send(request).await?;
        Ok(to_single_view(payload, kind))
    }

    /// Fetches the node.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get(&self, full_dehydrate: bool) -> Result<SingleView, ApiError> {
        let mut query = QueryParams::new();
        if full_dehydrate {
            query = query.flag("full_dehydrate", "yes");
        }
        let request = ApiRequest::get(self.url(&[])?).query(query);
        self.single(request, ResourceKind::node(full_dehydrate)).await
    }

    /// Updates the node.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingOAuthKey`](crate::error::AuthError::MissingOAuthKey)
    /// if the user is not authenticated, or any pipeline error.
    pub async fn update(&self, body: impl Into<String>) -> Result<SingleView, ApiError> {
        let request = ApiRequest::new(RestMethod::Patch, self.url(&[])?).body(body);
        self.single(request, ResourceKind::Node).await
    }

    /// Deletes the node.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingOAuthKey`](crate::error::AuthError::MissingOAuthKey)
    /// if the user is not authenticated, or any pipeline error.
    pub async fn delete(&self) -> Result<SingleView, ApiError> {
        let request = ApiRequest::new(RestMethod::Delete, self.url(&[])?);
        self.single(request, ResourceKind::Generic).await
    }

    /// Triggers sandbox dummy transactions on the node.
    ///
    /// With `credit` set the dummy transactions credit the node instead of
    /// debiting it.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn dummy_transactions(&self, credit: bool) -> Result<SingleView, ApiError> {
        let mut query = QueryParams::new();
        if credit {
            query = query.flag("is_credit", "YES");
        }
        let request = ApiRequest::get(self.url(&[DUMMY_TRAN])?).query(query);
        self.single(request, ResourceKind::Generic).await
    }

    /// Resets the debit card attached to the node.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingOAuthKey`](crate::error::AuthError::MissingOAuthKey)
    /// if the user is not authenticated, or any pipeline error.
    pub async fn reset_debit_card(&self) -> Result<SingleView, ApiError> {
        let request = ApiRequest::new(RestMethod::Patch, self.url(&[])?)
            .query(QueryParams::new().flag("reset", "YES"));
        self.single(request, ResourceKind::Node).await
    }

    /// Ships the debit card attached to the node.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingOAuthKey`](crate::error::AuthError::MissingOAuthKey)
    /// if the user is not authenticated, or any pipeline error.
    pub async fn ship_debit_card(&self, body: impl Into<String>) -> Result<SingleView, ApiError> {
        let request = ApiRequest::new(RestMethod::Patch, self.url(&[])?)
            .query(QueryParams::new().flag("ship", "YES"))
            .body(body);
        self.single(request, ResourceKind::Node).await
    }

    /// Lists the node's transactions.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_transactions(&self, query: QueryParams) -> Result<ListView, ApiError> {
        let request = ApiRequest::get(self.url(&[TRANS])?).query(query);
        let payload = self.user.send(request).await?;
        Ok(to_list_view(payload, ResourceKind::Transaction)?)
    }

    /// Creates a transaction originating from the node.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingOAuthKey`](crate::error::AuthError::MissingOAuthKey)
    /// if the user is not authenticated, or any pipeline error.
    pub async fn create_transaction(&self, body: impl Into<String>) -> Result<SingleView, ApiError> {
        let request = ApiRequest::new(RestMethod::Post, self.url(&[TRANS])?).body(body);
        self.single(request, ResourceKind::Transaction).await
    }

    /// Returns a facade for one of the node's transactions.
    pub fn transaction(&self, transaction_id: impl Into<String>) -> Transaction<'a> {
        Transaction::new(self.user, self.id.clone(), transaction_id.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SynapseConfig;
    use crate::credentials::ClientCredentials;
    use crate::resources::Client;

    fn client() -> Client {
        let config = SynapseConfig::builder(ClientCredentials::new("id", "secret", "fp", "127.0.0.1"))
            .base_url(url::Url::parse("https://uat-api.synapsefi.com/v3.1").unwrap())
            .build()
            .unwrap();
        Client::new(config).unwrap()
    }

    #[test]
    fn test_node_urls() {
        let client = client();
        let user = client.user("u1", "r1");
        let node = user.node("n1");
        assert_eq!(node.id(), "n1");
        assert_eq!(node.user().id(), "u1");
        assert_eq!(
            node.url(&[]).unwrap().as_str(),
            "https://uat-api.synapsefi.com/v3.1/users/u1/nodes/n1"
        );
        assert_eq!(
            node.url(&[super::DUMMY_TRAN]).unwrap().as_str(),
            "https://uat-api.synapsefi.com/v3.1/users/u1/nodes/n1/dummy-tran"
        );
    }
}
