//! Projection of raw payloads into views.

use serde_json::Value;
use tracing::debug;

use super::payload::json_type;
use super::{Dehydrate, ListView, RawPayload, ResourceFields, ResourceKind, SingleView};
use crate::error::ValidationError;

/// Projects a single-entity payload.
///
/// Missing promoted fields become `None`; the projection never fails.
///
/// ## Examples
///
/// ```rust
/// use synapse::response::{to_single_view, RawPayload, ResourceKind};
///
/// let payload = RawPayload::decode(br#"{"_id":"s1","url":"https://hook"}"#).unwrap();
/// let view = to_single_view(payload, ResourceKind::Subscription);
/// assert_eq!(view.id.as_deref(), Some("s1"));
/// assert_eq!(view.url(), Some("https://hook"));
/// ```
pub fn to_single_view(payload: RawPayload, kind: ResourceKind) -> SingleView {
    let owned = |field: &str| payload.str_field(field).map(str::to_string);

    let fields = match kind {
        ResourceKind::User => ResourceFields::User {
            full_dehydrate: Dehydrate::No,
        },
        ResourceKind::UserDehydrated => ResourceFields::User {
            full_dehydrate: Dehydrate::Yes,
        },
        ResourceKind::Node => ResourceFields::Node {
            user_id: owned("user_id"),
            full_dehydrate: Dehydrate::No,
        },
        ResourceKind::NodeDehydrated => ResourceFields::Node {
            user_id: owned("user_id"),
            full_dehydrate: Dehydrate::Yes,
        },
        ResourceKind::Transaction => ResourceFields::Transaction {},
        ResourceKind::Subscription => ResourceFields::Subscription { url: owned("url") },
        ResourceKind::Generic => ResourceFields::Generic {},
    };

    let id = owned("_id");
    SingleView {
        id,
        fields,
        payload,
    }
}

/// Projects a paginated collection payload.
///
/// Paging fields are copied verbatim. Items keep server order. A missing or
/// `null` collection field yields an empty page.
///
/// ## Errors
///
/// Returns a [`ValidationError`] when the collection field is not an array
/// or one of its elements is not an object.
pub fn to_list_view(mut payload: RawPayload, kind: ResourceKind) -> Result<ListView, ValidationError> {
    let limit = payload.u64_field("limit");
    let page = payload.u64_field("page");
    let page_count = payload.u64_field("page_count");

    let Some(collection) = kind.collection() else {
        debug!(%kind, "no collection for kind; returning paging fields only");
        return Ok(ListView {
            limit,
            page,
            page_count,
            total_count: None,
            items: Vec::new(),
        });
    };

    let total_count = payload.u64_field(collection.count_field);

    let raw_items = match payload.take(collection.items_field) {
        None | Some(Value::Null) => {
            debug!(field = collection.items_field, "collection field absent");
            Vec::new()
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ValidationError::NotAnArray {
                field: collection.items_field,
                found: json_type(&other),
            });
        }
    };

    let items = raw_items
        .into_iter()
        .map(|item| RawPayload::from_value(item).map(|p| to_single_view(p, kind)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ListView {
        limit,
        page,
        page_count,
        total_count,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> RawPayload {
        RawPayload::from_value(value).unwrap()
    }

    #[test]
    fn test_users_page_scenario() {
        let raw = payload(json!({
            "limit": 3,
            "page": 2,
            "page_count": 10,
            "users_count": 30,
            "users": [{"_id": "abc"}]
        }));
        let list = to_list_view(raw, ResourceKind::User).unwrap();

        assert_eq!(list.limit, Some(3));
        assert_eq!(list.page, Some(2));
        assert_eq!(list.page_count, Some(10));
        assert_eq!(list.total_count, Some(30));
        assert_eq!(list.items.len(), 1);
        assert_eq!(
            serde_json::to_value(&list.items[0]).unwrap(),
            json!({"id": "abc", "fullDehydrate": "no", "payload": {"_id": "abc"}})
        );
    }

    #[test]
    fn test_item_count_matches_reported_count() {
        let raw = payload(json!({
            "limit": 20,
            "page": 1,
            "page_count": 1,
            "node_count": 3,
            "nodes": [
                {"_id": "n1", "user_id": "u"},
                {"_id": "n2", "user_id": "u"},
                {"_id": "n3", "user_id": "u"}
            ]
        }));
        let list = to_list_view(raw, ResourceKind::Node).unwrap();
        assert_eq!(list.items.len() as u64, list.total_count.unwrap());
        assert_eq!(list.ids().collect::<Vec<_>>(), vec!["n1", "n2", "n3"]);
        assert!(list.items.iter().all(|n| n.user_id() == Some("u")));
    }

    #[test]
    fn test_server_order_is_preserved() {
        let raw = payload(json!({
            "trans_count": 3,
            "trans": [{"_id": "z"}, {"_id": "a"}, {"_id": "m"}]
        }));
        let list = to_list_view(raw, ResourceKind::Transaction).unwrap();
        assert_eq!(list.ids().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_null_collection_is_empty() {
        let raw = payload(json!({"limit": 20, "page": 1, "page_count": 0, "subscriptions_count": 0, "subscriptions": null}));
        let list = to_list_view(raw, ResourceKind::Subscription).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.total_count, Some(0));
    }

    #[test]
    fn test_absent_collection_is_empty() {
        let list = to_list_view(payload(json!({"page": 1})), ResourceKind::User).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.limit, None);
    }

    #[test]
    fn test_non_array_collection_is_rejected() {
        let err = to_list_view(payload(json!({"users": "oops"})), ResourceKind::User).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NotAnArray {
                field: "users",
                found: "string"
            }
        ));
    }

    #[test]
    fn test_non_object_item_is_rejected() {
        let err = to_list_view(payload(json!({"nodes": [1]})), ResourceKind::Node).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnObject { found: "number" }));
    }

    #[test]
    fn test_generic_list_has_no_items() {
        let list = to_list_view(payload(json!({"page": 4, "banks": [{}]})), ResourceKind::Generic).unwrap();
        assert_eq!(list.page, Some(4));
        assert!(list.is_empty());
    }

    #[test]
    fn test_single_view_keeps_unprojected_fields() {
        let raw = payload(json!({"_id": "n1", "user_id": "u1", "info": {"balance": {"amount": 10}}}));
        let view = to_single_view(raw, ResourceKind::NodeDehydrated);
        assert_eq!(view.id.as_deref(), Some("n1"));
        assert_eq!(view.user_id(), Some("u1"));
        assert_eq!(view.payload.get("info"), Some(&json!({"balance": {"amount": 10}})));
        assert!(matches!(
            view.fields,
            ResourceFields::Node {
                full_dehydrate: Dehydrate::Yes,
                ..
            }
        ));
    }

    #[test]
    fn test_generic_view_without_id() {
        let view = to_single_view(payload(json!({"banks": []})), ResourceKind::Generic);
        assert_eq!(view.id, None);
        assert_eq!(view.fields, ResourceFields::Generic {});
    }
}
