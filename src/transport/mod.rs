//! HTTP transport for Stargate communication.
//!
//! - [`RequestExecutor`]: sends one authenticated request, returning the raw
//!   response whatever its status
//! - [`translate`]: classifies a [`RawResponse`] into an [`Outcome`]
//!
//! Users normally interact with the higher-level [`Client`](crate::Client),
//! [`NamespaceClient`](crate::NamespaceClient) and
//! [`DevopsClient`](crate::DevopsClient) APIs instead.

mod executor;
mod outcome;

pub use executor::{AuthScheme, CASSANDRA_TOKEN_HEADER, Method, Payload, RawResponse, RequestExecutor};
pub use outcome::{Outcome, decode_json, decode_required, translate};
