//! Response decoding and normalization.
//!
//! Raw bytes are decoded into a [`RawPayload`], then projected by a
//! [`ResourceKind`] into either a [`SingleView`] or a [`ListView`]. The full
//! decoded object always travels along in the view's `payload`, so fields we
//! do not promote are never lost.

mod kind;
mod normalize;
mod payload;
mod view;

pub use kind::{Collection, ResourceKind};
pub use normalize::{to_list_view, to_single_view};
pub use payload::RawPayload;
pub use view::{Dehydrate, ListView, ResourceFields, SingleView};
