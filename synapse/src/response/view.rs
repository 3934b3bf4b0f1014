//! Normalized resource views.

use serde::Serialize;

use super::RawPayload;

/// Whether a user or node was fetched with `full_dehydrate=yes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dehydrate {
    /// Full dehydrate was requested.
    Yes,
    /// The default, partial representation.
    No,
}

/// Fields promoted out of the payload for a given resource kind.
///
/// Serialized flat into the surrounding [`SingleView`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceFields {
    /// A user.
    User {
        /// Dehydration level of the fetched user.
        #[serde(rename = "fullDehydrate")]
        full_dehydrate: Dehydrate,
    },
    /// A node (account) owned by a user.
    Node {
        /// Owning user id (`user_id` in the payload).
        #[serde(rename = "userID")]
        user_id: Option<String>,
        /// Dehydration level of the fetched node.
        #[serde(rename = "fullDehydrate")]
        full_dehydrate: Dehydrate,
    },
    /// A transaction. Nothing beyond the id is promoted.
    Transaction {},
    /// A webhook subscription.
    Subscription {
        /// The callback URL.
        url: Option<String>,
    },
    /// Responses that are not a known resource (institutions, keys, acks).
    Generic {},
}

/// A single entity, as returned by get/create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleView {
    /// The entity's `_id`, when the payload carries one.
    pub id: Option<String>,
    /// Resource-specific promoted fields.
    #[serde(flatten)]
    pub fields: ResourceFields,
    /// The full decoded object.
    pub payload: RawPayload,
}

/// A page of entities, in the order the server returned them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    /// Page size as reported by the server.
    pub limit: Option<u64>,
    /// Current page as reported by the server.
    pub page: Option<u64>,
    /// Total number of pages.
    pub page_count: Option<u64>,
    /// The resource-specific count field (`users_count`, `node_count`, ...).
    pub total_count: Option<u64>,
    /// The page's entities.
    pub items: Vec<SingleView>,
}

impl SingleView {
    /// Returns the owning user id for node views.
    pub fn user_id(&self) -> Option<&str> {
        match &self.fields {
            ResourceFields::Node { user_id, .. } => user_id.as_deref(),
            _ => None,
        }
    }

    /// Returns the callback URL for subscription views.
    pub fn url(&self) -> Option<&str> {
        match &self.fields {
            ResourceFields::Subscription { url } => url.as_deref(),
            _ => None,
        }
    }
}

impl ListView {
    /// Returns `true` if the page holds no entities.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the ids of the page's entities.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| item.id.as_deref())
    }
}
