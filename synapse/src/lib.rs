//! SynapseFI Client SDK
//!
//! An async client for the SynapseFI v3.1 REST API. Every facade call is one
//! request through the same pipeline:
//!
//! 1. [`endpoint`] builds the URL from the configured API root
//! 2. [`credentials`] composes the `X-SP-*` headers
//! 3. [`client::RequestExecutor`] performs the round trip
//! 4. [`error::classify`] turns non-200 responses into [`ApiError`]s
//! 5. [`response`] decodes the body and projects it into a view
//!
//! ## Modules
//!
//! - [`resources`] - The [`Client`], [`User`], [`Node`], [`Transaction`] and
//!   [`Subscription`] facades
//! - [`config`] - [`SynapseConfig`] and environment loading
//! - [`error`] - Layered error types
//!
//! ## Examples
//!
//! ```rust,ignore
//! use synapse::{Client, QueryParams, SynapseConfig};
//!
//! let client = Client::new(SynapseConfig::from_env()?)?;
//!
//! let mut user = client.get_user("5bec6ebe", false).await?;
//! user.authenticate(None).await?;
//!
//! let nodes = user.get_nodes(QueryParams::new().per_page(10)).await?;
//! let node = user.node(nodes.ids().next().unwrap_or_default());
//! node.dummy_transactions(true).await?;
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod method;
pub mod query;
pub mod resources;
pub mod response;

pub use config::{Environment, SynapseConfig};
pub use credentials::{AuthState, ClientCredentials};
pub use error::{ApiError, ErrorKind};
pub use method::RestMethod;
pub use query::{QueryParams, QueryValue};
pub use resources::{Client, Node, Subscription, Transaction, User};
pub use response::{ListView, RawPayload, ResourceKind, SingleView};
