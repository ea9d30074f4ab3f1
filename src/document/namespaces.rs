//! Namespace-scoped operations.

use tracing::info;

use super::types::{CollectionInfo, CreateNamespace, DataEnvelope, Datacenter, NamespaceInfo};
use super::CollectionClient;
use crate::client::Client;
use crate::path::ResourceAddress;
use crate::transport::{Method, Payload, decode_json, decode_required};
use crate::{Error, Result};

/// Client for one namespace (keyspace).
///
/// Access via [`Client::namespace`].
///
/// ## Example
///
/// ```rust,no_run
/// # async fn example(client: stargate::Client) -> Result<(), stargate::Error> {
/// let ns = client.namespace("app");
/// if !ns.exist().await? {
///     ns.create_simple(1).await?;
/// }
/// ns.create_collection("users").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct NamespaceClient {
    client: Client,
    name: String,
}

impl NamespaceClient {
    pub(crate) fn new(client: Client, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    /// Returns the namespace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a collection-scoped client.
    pub fn collection(&self, name: impl Into<String>) -> CollectionClient {
        CollectionClient::new(self.client.clone(), self.name.clone(), name)
    }

    fn require_name(&self) -> Result<&str> {
        if self.name.is_empty() {
            return Err(Error::validation("namespace must not be empty"));
        }
        Ok(&self.name)
    }

    /// Fetches the namespace description, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name or any non-404 failure.
    pub async fn find(&self) -> Result<Option<NamespaceInfo>> {
        let name = self.require_name()?;
        let path = self.client.inner().schema_path(Some(name))?;
        match self
            .client
            .inner()
            .dispatch(Method::Get, &path, &[], Payload::None)
            .await?
            .into_optional()?
        {
            Some(body) => {
                let envelope: DataEnvelope<NamespaceInfo> = decode_json(&body)?;
                Ok(Some(envelope.data))
            },
            None => Ok(None),
        }
    }

    /// Returns `true` if the namespace exists.
    ///
    /// # Errors
    ///
    /// As [`find()`](Self::find).
    pub async fn exist(&self) -> Result<bool> {
        let name = self.require_name()?;
        let path = self.client.inner().schema_path(Some(name))?;
        let outcome = self
            .client
            .inner()
            .dispatch(Method::Get, &path, &[], Payload::None)
            .await?;
        Ok(outcome.into_optional()?.is_some())
    }

    /// Creates the namespace with `NetworkTopologyStrategy` replication.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name or datacenter list is empty.
    pub async fn create(&self, datacenters: &[Datacenter]) -> Result<()> {
        let name = self.require_name()?;
        if datacenters.is_empty() {
            return Err(Error::validation("at least one datacenter is required"));
        }
        self.post_namespace(CreateNamespace {
            name,
            replicas: None,
            datacenters: Some(datacenters),
        })
        .await
    }

    /// Creates the namespace with `SimpleStrategy` replication.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty or `replicas` is zero.
    pub async fn create_simple(&self, replicas: u32) -> Result<()> {
        let name = self.require_name()?;
        if replicas == 0 {
            return Err(Error::validation("replicas must be greater than zero"));
        }
        self.post_namespace(CreateNamespace {
            name,
            replicas: Some(replicas),
            datacenters: None,
        })
        .await
    }

    async fn post_namespace(&self, request: CreateNamespace<'_>) -> Result<()> {
        let path = self.client.inner().schema_path(None)?;
        self.client
            .inner()
            .dispatch(Method::Post, &path, &[], Payload::json(&request)?)
            .await?
            .into_result()?;
        info!(namespace = request.name, "namespace created");
        Ok(())
    }

    /// Deletes the namespace. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name or any non-404 failure.
    pub async fn delete(&self) -> Result<bool> {
        let name = self.require_name()?;
        let path = self.client.inner().schema_path(Some(name))?;
        let deleted = self
            .client
            .inner()
            .dispatch(Method::Delete, &path, &[], Payload::None)
            .await?
            .into_optional()?
            .is_some();
        if deleted {
            info!(namespace = name, "namespace deleted");
        }
        Ok(deleted)
    }

    /// Lists the collections of this namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) if the
    /// namespace does not exist.
    pub async fn collections(&self) -> Result<Vec<CollectionInfo>> {
        let path = self.collections_path()?;
        let body = self
            .client
            .inner()
            .dispatch(Method::Get, &path, &[], Payload::None)
            .await?
            .into_result()?;
        let envelope: DataEnvelope<Vec<CollectionInfo>> = decode_required(body)?;
        Ok(envelope.data)
    }

    /// Lists the collection names of this namespace.
    ///
    /// # Errors
    ///
    /// As [`collections()`](Self::collections).
    pub async fn collection_names(&self) -> Result<Vec<String>> {
        Ok(self.collections().await?.into_iter().map(|c| c.name).collect())
    }

    /// Creates a collection in this namespace.
    ///
    /// Shorthand for `self.collection(name).create()`.
    ///
    /// # Errors
    ///
    /// As [`CollectionClient::create`].
    pub async fn create_collection(&self, name: &str) -> Result<()> {
        self.collection(name).create().await
    }

    pub(crate) fn collections_path(&self) -> Result<String> {
        let base = self.client.inner().path(&ResourceAddress::new(self.name.as_str()))?;
        Ok(format!("{}/collections", base))
    }
}

impl std::fmt::Debug for NamespaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespaceClient")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
