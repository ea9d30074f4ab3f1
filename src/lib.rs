//! # Stargate Rust SDK
//!
//! Client for the Stargate document API and the Astra DevOps API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stargate::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), stargate::Error> {
//!     // Reads ASTRA_DB_ID/ASTRA_DB_REGION or BASE_URL, plus credentials
//!     let client = Client::from_env()?;
//!     client.connect().await?;
//!
//!     let people = client.namespace("app").collection("people");
//!     let id = people.create_document(&serde_json::json!({"name": "alice"})).await?;
//!
//!     let alice: Option<serde_json::Value> = people.document(&id).find().await?;
//!     println!("{:?}", alice);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Client Hierarchy**: `Client` → `NamespaceClient` → `CollectionClient` → `DocumentClient`
//! - **Tokens**: credentials are exchanged for a token on first use; the token
//!   is reused until its TTL elapses, and renewal is single-flight
//! - **Absence ≠ Error**: `exist()`, `find()` and `delete()` report a 404 as
//!   `false`/`None`, not `Err`
//! - **No retries**: a failed call fails once; [`Error::is_transient`] tells
//!   callers whether retrying may help
//!
//! ## Features
//!
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod path;

// Transport layer
pub mod transport;

// Control plane API
pub mod devops;

// Testing utilities
pub mod testing;

mod json;
mod user_agent;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use client::Client;
pub use document::{
    CollectionClient, CollectionInfo, Datacenter, Document, DocumentClient, DocumentPage,
    NamespaceClient, NamespaceInfo, PageRequest, SearchQuery,
};
pub use error::{Error, ErrorKind, Result};
pub use path::{PathEncoding, ResourceAddress};

// Re-export auth types
pub use auth::{BearerToken, Credentials, PasswordCredentials, TokenState};

// Re-export config types
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError, TlsConfig, UnauthorizedPolicy};

pub use devops::DevopsClient;
