//! DevOps API data types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::json::null_as_default;

/// Cloud provider hosting a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CloudProvider {
    /// Amazon Web Services.
    Aws,
    /// Google Cloud Platform.
    Gcp,
    /// Microsoft Azure.
    Azure,
    /// A provider this SDK does not know about.
    #[serde(other)]
    Unknown,
}

impl CloudProvider {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "AWS",
            CloudProvider::Gcp => "GCP",
            CloudProvider::Azure => "AZURE",
            CloudProvider::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service tier of a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free development tier.
    Developer,
    /// Pay-as-you-go serverless tier.
    Serverless,
    /// Dedicated `C10` capacity.
    #[serde(rename = "C10")]
    C10,
    /// Dedicated `A5` capacity.
    #[serde(rename = "A5")]
    A5,
    /// Dedicated `A10` capacity.
    #[serde(rename = "A10")]
    A10,
    /// Dedicated `A20` capacity.
    #[serde(rename = "A20")]
    A20,
    /// Dedicated `A40` capacity.
    #[serde(rename = "A40")]
    A40,
    /// A tier this SDK does not know about.
    #[serde(other)]
    Unknown,
}

/// Lifecycle status of a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatabaseStatus {
    /// Serving traffic.
    Active,
    /// Creation accepted, not yet started.
    Pending,
    /// Being prepared.
    Preparing,
    /// Prepared, awaiting initialization.
    Prepared,
    /// Being initialized.
    Initializing,
    /// Being parked.
    Parking,
    /// Parked; must be unparked before use.
    Parked,
    /// Being unparked.
    Unparking,
    /// Being terminated.
    Terminating,
    /// Terminated.
    Terminated,
    /// Capacity being changed.
    Resizing,
    /// Under maintenance, e.g. while a keyspace is added.
    Maintenance,
    /// Hibernating.
    Hibernating,
    /// Hibernated.
    Hibernated,
    /// Resuming from hibernation.
    Resuming,
    /// In error.
    Error,
    /// A status this SDK does not know about.
    #[serde(other)]
    Unknown,
}

impl DatabaseStatus {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseStatus::Active => "ACTIVE",
            DatabaseStatus::Pending => "PENDING",
            DatabaseStatus::Preparing => "PREPARING",
            DatabaseStatus::Prepared => "PREPARED",
            DatabaseStatus::Initializing => "INITIALIZING",
            DatabaseStatus::Parking => "PARKING",
            DatabaseStatus::Parked => "PARKED",
            DatabaseStatus::Unparking => "UNPARKING",
            DatabaseStatus::Terminating => "TERMINATING",
            DatabaseStatus::Terminated => "TERMINATED",
            DatabaseStatus::Resizing => "RESIZING",
            DatabaseStatus::Maintenance => "MAINTENANCE",
            DatabaseStatus::Hibernating => "HIBERNATING",
            DatabaseStatus::Hibernated => "HIBERNATED",
            DatabaseStatus::Resuming => "RESUMING",
            DatabaseStatus::Error => "ERROR",
            DatabaseStatus::Unknown => "UNKNOWN",
        }
    }

    /// Returns `true` once the database will not change state on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DatabaseStatus::Terminated | DatabaseStatus::Error)
    }

    /// Returns `true` if the database can serve requests.
    pub fn is_active(&self) -> bool {
        matches!(self, DatabaseStatus::Active)
    }
}

impl fmt::Display for DatabaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which databases a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Include {
    /// Every database not yet terminated.
    #[default]
    NonTerminated,
    /// Every database, terminated ones included.
    All,
    /// Only databases in this status.
    Status(DatabaseStatus),
}

impl Include {
    pub(crate) fn query_value(&self) -> String {
        match self {
            Include::NonTerminated => "nonterminated".to_string(),
            Include::All => "all".to_string(),
            Include::Status(status) => status.as_str().to_lowercase(),
        }
    }
}

/// Filter for [`DevopsClient::databases`](super::DevopsClient::databases).
///
/// ```rust
/// use stargate::devops::{CloudProvider, DatabaseFilter, Include};
///
/// let filter = DatabaseFilter::builder()
///     .include(Include::All)
///     .provider(CloudProvider::Aws)
///     .limit(50)
///     .build();
/// assert_eq!(filter.limit, 50);
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct DatabaseFilter {
    /// Statuses to include.
    #[builder(default)]
    pub include: Include,

    /// Restrict to one cloud provider; all providers when unset.
    pub provider: Option<CloudProvider>,

    /// Maximum number of databases returned.
    #[builder(default = 25)]
    pub limit: u32,

    /// Return databases after this id.
    #[builder(into)]
    pub starting_after: Option<String>,
}

impl Default for DatabaseFilter {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DatabaseFilter {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("include", self.include.query_value()),
            (
                "provider",
                self.provider.map_or("ALL", |p| p.as_str()).to_string(),
            ),
            ("limit", self.limit.to_string()),
        ];
        if let Some(ref after) = self.starting_after {
            pairs.push(("starting_after", after.clone()));
        }
        pairs
    }
}

/// Static properties of a database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseInfo {
    /// Database name.
    pub name: String,
    /// Initial keyspace.
    #[serde(default)]
    pub keyspace: Option<String>,
    /// Every keyspace of the database.
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyspaces: Vec<String>,
    /// Hosting provider.
    #[serde(default)]
    pub cloud_provider: Option<CloudProvider>,
    /// Service tier.
    #[serde(default)]
    pub tier: Option<Tier>,
    /// Capacity units, for dedicated tiers.
    #[serde(default)]
    pub capacity_units: Option<u32>,
    /// Primary region.
    #[serde(default)]
    pub region: Option<String>,
}

/// A database as reported by the DevOps API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    /// Database id.
    pub id: String,
    /// Owning organization.
    #[serde(default)]
    pub org_id: Option<String>,
    /// Static properties.
    pub info: DatabaseInfo,
    /// Lifecycle status.
    pub status: DatabaseStatus,
    /// When the database was created.
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    /// When the database was terminated.
    #[serde(default)]
    pub termination_time: Option<DateTime<Utc>>,
    /// Actions currently allowed on the database.
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_actions: Vec<String>,
    /// Document/REST API endpoint.
    #[serde(default)]
    pub data_endpoint_url: Option<String>,
    /// GraphQL endpoint.
    #[serde(default)]
    pub graphql_url: Option<String>,
    /// Status message, if any.
    #[serde(default)]
    pub message: Option<String>,
}

impl Database {
    /// Returns `true` if `keyspace` exists in this database.
    pub fn has_keyspace(&self, keyspace: &str) -> bool {
        self.info.keyspaces.iter().any(|k| k == keyspace)
            || self.info.keyspace.as_deref() == Some(keyspace)
    }
}

/// A region where databases of a tier can be created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableRegion {
    /// Service tier.
    pub tier: Tier,
    /// Hosting provider.
    pub cloud_provider: CloudProvider,
    /// Provider region code, e.g. `us-east-1`.
    pub region: String,
    /// Human-readable region name.
    #[serde(default)]
    pub region_display: Option<String>,
    /// Continent of the region.
    #[serde(default)]
    pub region_continent: Option<String>,
    /// Tier description.
    #[serde(default)]
    pub description: Option<String>,
    /// Databases of this tier in use.
    #[serde(default)]
    pub database_count_used: u32,
    /// Databases of this tier allowed.
    #[serde(default)]
    pub database_count_limit: u32,
}

/// Request for [`DevopsClient::create_database`](super::DevopsClient::create_database).
///
/// ```rust
/// use stargate::devops::{CloudProvider, CreateDatabaseRequest, Tier};
///
/// let request = CreateDatabaseRequest::builder()
///     .name("orders")
///     .keyspace("app")
///     .cloud_provider(CloudProvider::Aws)
///     .region("us-east-1")
///     .tier(Tier::Serverless)
///     .build();
/// assert_eq!(request.capacity_units, 1);
/// ```
#[derive(Clone, Serialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreateDatabaseRequest {
    /// Database name.
    #[builder(into)]
    pub name: String,

    /// Initial keyspace.
    #[builder(into)]
    pub keyspace: String,

    /// Hosting provider.
    pub cloud_provider: CloudProvider,

    /// Provider region code.
    #[builder(into)]
    pub region: String,

    /// Service tier.
    pub tier: Tier,

    /// Capacity units.
    #[builder(default = 1)]
    pub capacity_units: u32,

    /// Database user, for classic tiers.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Database password, for classic tiers.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for CreateDatabaseRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateDatabaseRequest")
            .field("name", &self.name)
            .field("keyspace", &self.keyspace)
            .field("cloud_provider", &self.cloud_provider)
            .field("region", &self.region)
            .field("tier", &self.tier)
            .field("capacity_units", &self.capacity_units)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
