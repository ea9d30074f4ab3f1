//! Collection-scoped operations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::query::{MAX_PAGE_SIZE, PageRequest, SearchQuery};
use super::types::{CreateCollection, Document, DocumentIdResponse, DocumentPage, RawPage};
use super::DocumentClient;
use crate::client::Client;
use crate::path::ResourceAddress;
use crate::transport::{Method, Payload, decode_required};
use crate::{Error, Result};

/// Client for one collection.
///
/// Access via [`NamespaceClient::collection`](super::NamespaceClient::collection).
///
/// ## Example
///
/// ```rust,no_run
/// use serde::{Deserialize, Serialize};
/// use stargate::{PageRequest, SearchQuery};
///
/// #[derive(Serialize, Deserialize)]
/// struct Person { name: String, age: u32 }
///
/// # async fn example(client: stargate::Client) -> Result<(), stargate::Error> {
/// let people = client.namespace("app").collection("people");
/// people.create_document(&Person { name: "alice".into(), age: 42 }).await?;
///
/// let adults = people
///     .search::<Person>(&SearchQuery::new().where_gte("age", 18).page(PageRequest::new().page_size(20)))
///     .await?;
/// for doc in adults.documents {
///     println!("{} => {}", doc.id, doc.body.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CollectionClient {
    client: Client,
    namespace: String,
    name: String,
}

impl CollectionClient {
    pub(crate) fn new(client: Client, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Returns the namespace name.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a document-scoped client.
    pub fn document(&self, id: impl Into<String>) -> DocumentClient {
        DocumentClient::new(
            self.client.clone(),
            self.namespace.clone(),
            self.name.clone(),
            id,
        )
    }

    fn address(&self) -> Result<ResourceAddress> {
        if self.name.is_empty() {
            return Err(Error::validation("collection must not be empty"));
        }
        Ok(ResourceAddress::new(self.namespace.as_str()).with_collection(self.name.as_str()))
    }

    fn path(&self) -> Result<String> {
        self.client.inner().path(&self.address()?)
    }

    /// Returns `true` if the collection exists in its namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) if the
    /// namespace itself does not exist.
    pub async fn exist(&self) -> Result<bool> {
        self.address()?;
        let names = self
            .client
            .namespace(self.namespace.as_str())
            .collection_names()
            .await?;
        Ok(names.iter().any(|n| n == &self.name))
    }

    /// Creates the collection.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a name is empty, or the server error if
    /// the collection already exists.
    pub async fn create(&self) -> Result<()> {
        self.address()?;
        let path = self
            .client
            .namespace(self.namespace.as_str())
            .collections_path()?;
        self.client
            .inner()
            .dispatch(
                Method::Post,
                &path,
                &[],
                Payload::json(&CreateCollection { name: &self.name })?,
            )
            .await?
            .into_result()?;
        info!(namespace = %self.namespace, collection = %self.name, "collection created");
        Ok(())
    }

    /// Deletes the collection and all its documents. Returns `false` if it
    /// did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for empty names or any non-404 failure.
    pub async fn delete(&self) -> Result<bool> {
        let path = self.path()?;
        let deleted = self
            .client
            .inner()
            .dispatch(Method::Delete, &path, &[], Payload::None)
            .await?
            .into_optional()?
            .is_some();
        if deleted {
            info!(namespace = %self.namespace, collection = %self.name, "collection deleted");
        }
        Ok(deleted)
    }

    /// Stores a new document under a server-assigned id and returns the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or the request
    /// fails.
    pub async fn create_document<T: Serialize + ?Sized>(&self, document: &T) -> Result<String> {
        let path = self.path()?;
        let body = self
            .client
            .inner()
            .dispatch(Method::Post, &path, &[], Payload::json(document)?)
            .await?
            .into_result()?;
        let created: DocumentIdResponse = decode_required(body)?;
        debug!(collection = %self.name, id = %created.document_id, "document created");
        Ok(created.document_id)
    }

    /// Fetches one page of documents.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a page size outside 1 to 20, or an
    /// error if the request fails or a document cannot be decoded as `T`.
    pub async fn find_page<T: DeserializeOwned>(&self, page: &PageRequest) -> Result<DocumentPage<T>> {
        self.fetch_page(page.query_pairs()?).await
    }

    /// Fetches one page of documents matching `query`.
    ///
    /// # Errors
    ///
    /// As [`find_page()`](Self::find_page).
    pub async fn search<T: DeserializeOwned>(&self, query: &SearchQuery) -> Result<DocumentPage<T>> {
        self.fetch_page(query.query_pairs()?).await
    }

    /// Fetches every document, following page cursors until exhausted.
    ///
    /// # Errors
    ///
    /// As [`find_page()`](Self::find_page), for any page. Returns
    /// [`ErrorKind::InvalidResponse`](crate::ErrorKind::InvalidResponse) if
    /// the server hands back the cursor it was just given.
    pub async fn find_all<T: DeserializeOwned>(&self) -> Result<Vec<Document<T>>> {
        let mut documents = Vec::new();
        let mut page = PageRequest::new().page_size(MAX_PAGE_SIZE);
        let mut previous: Option<String> = None;
        loop {
            let result: DocumentPage<T> = self.find_page(&page).await?;
            documents.extend(result.documents);
            match result.page_state {
                Some(state) if previous.as_deref() == Some(state.as_str()) => {
                    return Err(Error::invalid_response(format!(
                        "page state '{}' repeated while listing collection '{}'",
                        state, self.name
                    )));
                },
                Some(state) => {
                    page = page.page_state(state.clone());
                    previous = Some(state);
                },
                None => return Ok(documents),
            }
        }
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        query: Vec<(&'static str, String)>,
    ) -> Result<DocumentPage<T>> {
        let path = self.path()?;
        let body = self
            .client
            .inner()
            .dispatch(Method::Get, &path, &query, Payload::None)
            .await?
            .into_result()?;
        let raw: RawPage = decode_required(body)?;

        let documents = raw
            .data
            .into_iter()
            .map(|(id, value)| {
                serde_json::from_value(value)
                    .map(|body| Document { id: id.clone(), body })
                    .map_err(|e| {
                        Error::invalid_response(format!("cannot decode document '{}': {}", id, e))
                            .with_source(e)
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DocumentPage {
            page_state: raw.page_state.filter(|s| !s.is_empty()),
            documents,
        })
    }
}

impl std::fmt::Debug for CollectionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionClient")
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
