//! Resource facades.
//!
//! A [`Client`] is the root. [`User`] owns a clone of it plus the user's
//! OAuth state; [`Node`] and [`Transaction`] borrow their user, and
//! [`Subscription`] borrows the client. Every facade call is one request
//! through the same pipeline.

mod client;
mod node;
mod subscription;
mod transaction;
mod user;

pub use client::Client;
pub use node::Node;
pub use subscription::Subscription;
pub use transaction::Transaction;
pub use user::User;
