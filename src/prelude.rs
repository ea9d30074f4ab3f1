//! Prelude module for convenient imports.
//!
//! ```rust
//! use stargate::prelude::*;
//! ```
//!
//! This provides access to:
//! - The document API client and its resource clients
//! - Configuration and credential types
//! - Error types

pub use crate::{
    auth::{BearerToken, Credentials, PasswordCredentials, TokenState},
    client::Client,
    config::{ClientConfig, ClientConfigBuilder, TlsConfig, UnauthorizedPolicy},
    devops::DevopsClient,
    document::{
        CollectionClient, Document, DocumentClient, DocumentPage, NamespaceClient, PageRequest,
        SearchQuery,
    },
    error::{Error, ErrorKind},
    path::PathEncoding,
};
