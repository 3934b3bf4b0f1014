//! HTTP transport.
//!
//! The executor is an explicitly constructed value owned by each
//! [`Client`](crate::Client); there is no process-wide request state.

mod executor;

pub use executor::{ApiRequest, RawResponse, RequestExecutor, RequestExecutorBuilder};
