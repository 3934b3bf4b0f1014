//! Per-resource projection rules.

use strum::Display;

/// The paginated collection fields for a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    /// The array field holding the page's entities.
    pub items_field: &'static str,
    /// The field holding the total entity count.
    pub count_field: &'static str,
}

/// Selects which fields a response projection promotes.
///
/// Adding a resource means adding a variant here and its arm in
/// [`to_single_view`](super::to_single_view); the executor and classifier
/// are untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    /// A user in its default representation.
    User,
    /// A user fetched with `full_dehydrate=yes`.
    UserDehydrated,
    /// A node in its default representation.
    Node,
    /// A node fetched with `full_dehydrate=yes`.
    NodeDehydrated,
    /// A transaction.
    Transaction,
    /// A webhook subscription.
    Subscription,
    /// Anything else; only `_id` (if any) is promoted.
    Generic,
}

impl ResourceKind {
    /// Returns the kind for a user fetch with the given dehydration flag.
    pub fn user(full_dehydrate: bool) -> Self {
        if full_dehydrate {
            Self::UserDehydrated
        } else {
            Self::User
        }
    }

    /// Returns the kind for a node fetch with the given dehydration flag.
    pub fn node(full_dehydrate: bool) -> Self {
        if full_dehydrate {
            Self::NodeDehydrated
        } else {
            Self::Node
        }
    }

    /// Returns the collection fields used by list responses of this kind.
    ///
    /// Returns `None` for [`ResourceKind::Generic`], which has no collection.
    pub fn collection(self) -> Option<Collection> {
        let (items_field, count_field) = match self {
            Self::User | Self::UserDehydrated => ("users", "users_count"),
            Self::Node | Self::NodeDehydrated => ("nodes", "node_count"),
            Self::Transaction => ("trans", "trans_count"),
            Self::Subscription => ("subscriptions", "subscriptions_count"),
            Self::Generic => return None,
        };
        Some(Collection {
            items_field,
            count_field,
        })
    }
}
