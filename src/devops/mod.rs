//! Astra DevOps API client.
//!
//! The control plane provisions databases and keyspaces. It authenticates with
//! a long-lived application token sent as `Authorization: Bearer`, so there is
//! no credential exchange and no renewal.
//!
//! ## Example
//!
//! ```rust,no_run
//! use stargate::devops::{CloudProvider, CreateDatabaseRequest, DevopsClient, Tier};
//!
//! # async fn example() -> Result<(), stargate::Error> {
//! let devops = DevopsClient::new("AstraCS:...")?;
//!
//! let id = devops
//!     .create_database(
//!         &CreateDatabaseRequest::builder()
//!             .name("orders")
//!             .keyspace("app")
//!             .cloud_provider(CloudProvider::Aws)
//!             .region("us-east-1")
//!             .tier(Tier::Serverless)
//!             .build(),
//!     )
//!     .await?;
//!
//! if let Some(db) = devops.find_database(&id).await? {
//!     println!("{} is {}", db.info.name, db.status);
//! }
//! # Ok(())
//! # }
//! ```

mod types;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::client::ClientInner;
use crate::config::{DEFAULT_TIMEOUT, DEFAULT_TOKEN_TTL, TlsConfig};
use crate::transport::{Method, Payload, decode_json, decode_required, translate};
use crate::{Error, Result};

pub use types::{
    AvailableRegion, CloudProvider, CreateDatabaseRequest, Database, DatabaseFilter,
    DatabaseInfo, DatabaseStatus, Include, Tier,
};

/// Default DevOps API endpoint.
pub const DEVOPS_BASE_URL: &str = "https://api.astra.datastax.com";

const DATABASES_PATH: &str = "/v2/databases";
const REGIONS_PATH: &str = "/v2/availableRegions";

/// Regions grouped by tier, then by cloud provider.
pub type RegionMap = HashMap<Tier, HashMap<CloudProvider, Vec<AvailableRegion>>>;

/// Client for the Astra DevOps API.
///
/// `Clone` and thread-safe; clones share one connection pool.
#[derive(Clone)]
pub struct DevopsClient {
    inner: Arc<ClientInner>,
}

impl DevopsClient {
    /// Creates a client for the public DevOps endpoint.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `token` is empty.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(DEVOPS_BASE_URL, token)
    }

    /// Creates a client for a custom endpoint.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `token` is empty, or a configuration
    /// error if `base_url` is not a valid URL.
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self> {
        Self::with_tls(base_url, token, &TlsConfig::default())
    }

    /// Creates a client for a custom endpoint with explicit TLS settings.
    ///
    /// # Errors
    ///
    /// As [`with_base_url()`](Self::with_base_url).
    pub fn with_tls(base_url: &str, token: &str, tls: &TlsConfig) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(Error::validation("DevOps token must not be empty"));
        }
        let inner = ClientInner::bearer(base_url, token, DEFAULT_TIMEOUT, tls, DEFAULT_TOKEN_TTL)?;
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the base URL of the client.
    pub fn base_url(&self) -> &str {
        self.inner.executor.base_url()
    }

    fn database_path(&self, database_id: &str) -> Result<String> {
        if database_id.is_empty() {
            return Err(Error::validation("database id must not be empty"));
        }
        Ok(format!("{}/{}", DATABASES_PATH, self.inner.segment(database_id)?))
    }

    /// Lists the regions where databases can be created.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is unreadable.
    pub async fn available_regions(&self) -> Result<Vec<AvailableRegion>> {
        let body = self
            .inner
            .dispatch(Method::Get, REGIONS_PATH, &[], Payload::None)
            .await?
            .into_result()?;
        decode_required(body)
    }

    /// Lists available regions grouped by tier and cloud provider.
    ///
    /// # Errors
    ///
    /// As [`available_regions()`](Self::available_regions).
    pub async fn regions_by_tier(&self) -> Result<RegionMap> {
        let mut map = RegionMap::new();
        for region in self.available_regions().await? {
            map.entry(region.tier)
                .or_default()
                .entry(region.cloud_provider)
                .or_default()
                .push(region);
        }
        Ok(map)
    }

    /// Lists databases matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is unreadable.
    pub async fn databases(&self, filter: &DatabaseFilter) -> Result<Vec<Database>> {
        let body = self
            .inner
            .dispatch(Method::Get, DATABASES_PATH, &filter.query_pairs(), Payload::None)
            .await?
            .into_result()?;
        decode_required(body)
    }

    /// Lists non-terminated databases named `name`.
    ///
    /// # Errors
    ///
    /// As [`databases()`](Self::databases).
    pub async fn databases_by_name(&self, name: &str) -> Result<Vec<Database>> {
        let mut databases = self.databases(&DatabaseFilter::default()).await?;
        databases.retain(|db| db.info.name == name);
        Ok(databases)
    }

    /// Fetches a database, or `None` if no database has this id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty id, or an error for any non-404
    /// failure.
    pub async fn find_database(&self, database_id: &str) -> Result<Option<Database>> {
        let path = self.database_path(database_id)?;
        match self
            .inner
            .dispatch(Method::Get, &path, &[], Payload::None)
            .await?
            .into_optional()?
        {
            Some(body) => decode_json(&body).map(Some),
            None => Ok(None),
        }
    }

    /// Returns `true` if a database has this id.
    ///
    /// # Errors
    ///
    /// As [`find_database()`](Self::find_database).
    pub async fn database_exists(&self, database_id: &str) -> Result<bool> {
        Ok(self.find_database(database_id).await?.is_some())
    }

    /// Requests a new database and returns its id.
    ///
    /// Creation is asynchronous: the database starts in
    /// [`DatabaseStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is empty, or
    /// [`ErrorKind::InvalidResponse`](crate::ErrorKind::InvalidResponse) if
    /// the server does not answer `201 Created` with a `Location` header.
    pub async fn create_database(&self, request: &CreateDatabaseRequest) -> Result<String> {
        for (field, value) in [
            ("name", &request.name),
            ("keyspace", &request.keyspace),
            ("region", &request.region),
        ] {
            if value.is_empty() {
                return Err(Error::validation(format!("database {} must not be empty", field)));
            }
        }

        let response = self
            .inner
            .send(Method::Post, DATABASES_PATH, &[], Payload::json(request)?)
            .await?;
        let status = response.status();
        if status != 201 {
            translate(response).into_result()?;
            return Err(Error::invalid_response(format!(
                "expected 201 Created, got {}",
                status
            ))
            .with_status(status));
        }

        let id = response
            .header("location")
            .and_then(|location| location.trim_end_matches('/').rsplit('/').next())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::invalid_response("database created without a Location header")
                    .with_status(status)
            })?;

        info!(database_id = %id, name = %request.name, "database creation requested");
        Ok(id)
    }

    /// Adds a keyspace to a database.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty arguments or a keyspace that
    /// already exists, and [`ErrorKind::NotFound`](crate::ErrorKind::NotFound)
    /// for an unknown database.
    pub async fn create_keyspace(&self, database_id: &str, keyspace: &str) -> Result<()> {
        if keyspace.is_empty() {
            return Err(Error::validation("keyspace must not be empty"));
        }
        let database = self
            .find_database(database_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("database '{}' does not exist", database_id)))?;
        if database.has_keyspace(keyspace) {
            return Err(Error::validation(format!(
                "keyspace '{}' already exists in database '{}'",
                keyspace, database_id
            )));
        }

        let path = format!(
            "{}/keyspaces/{}",
            self.database_path(database_id)?,
            self.inner.segment(keyspace)?
        );
        self.inner
            .dispatch(Method::Post, &path, &[], Payload::Empty)
            .await?
            .into_result()?;
        info!(database_id, keyspace, "keyspace creation requested");
        Ok(())
    }

    /// Adds a document API namespace to a database.
    ///
    /// A namespace is a keyspace; this is [`create_keyspace()`](Self::create_keyspace)
    /// under the document API's name.
    ///
    /// # Errors
    ///
    /// As [`create_keyspace()`](Self::create_keyspace).
    pub async fn create_namespace(&self, database_id: &str, namespace: &str) -> Result<()> {
        self.create_keyspace(database_id, namespace).await
    }

    /// Requests termination of a database.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty id, or the server error if
    /// the database cannot be terminated.
    pub async fn terminate_database(&self, database_id: &str) -> Result<()> {
        let path = format!("{}/terminate", self.database_path(database_id)?);
        self.inner
            .dispatch(Method::Post, &path, &[], Payload::Empty)
            .await?
            .into_result()?;
        info!(database_id, "database termination requested");
        Ok(())
    }
}

impl std::fmt::Debug for DevopsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevopsClient")
            .field("base_url", &self.base_url())
            .finish_non_exhaustive()
    }
}
