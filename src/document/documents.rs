//! Single-document operations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::DocumentIdResponse;
use crate::client::Client;
use crate::path::ResourceAddress;
use crate::transport::{Method, Outcome, Payload, decode_json, decode_required};
use crate::{Error, Result};

const RAW: (&str, &str) = ("raw", "true");

/// Client for one document.
///
/// Access via [`CollectionClient::document`](super::CollectionClient::document).
///
/// Reads use `?raw=true`, so the document body is returned without the
/// `{"documentId", "data"}` envelope.
///
/// ## Example
///
/// ```rust,no_run
/// use serde_json::json;
///
/// # async fn example(client: stargate::Client) -> Result<(), stargate::Error> {
/// let doc = client.namespace("app").collection("people").document("alice");
/// doc.upsert(&json!({"name": "alice", "address": {"city": "Paris"}})).await?;
///
/// let city: Option<String> = doc.find_sub_document("address/city").await?;
/// assert_eq!(city.as_deref(), Some("Paris"));
///
/// assert!(doc.delete().await?);
/// assert!(!doc.exist().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DocumentClient {
    client: Client,
    namespace: String,
    collection: String,
    id: String,
}

impl DocumentClient {
    pub(crate) fn new(
        client: Client,
        namespace: impl Into<String>,
        collection: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            namespace: namespace.into(),
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Returns the document id.
    pub fn id(&self) -> &str {
        &self.id
    }

    fn address(&self) -> Result<ResourceAddress> {
        if self.id.is_empty() {
            return Err(Error::validation("document id must not be empty"));
        }
        if self.collection.is_empty() {
            return Err(Error::validation("a document id requires a collection"));
        }
        Ok(ResourceAddress::new(self.namespace.as_str())
            .with_collection(self.collection.as_str())
            .with_document(self.id.as_str()))
    }

    fn path(&self) -> Result<String> {
        self.client.inner().path(&self.address()?)
    }

    fn sub_path(&self, sub_path: &str) -> Result<String> {
        if sub_path.trim_matches('/').is_empty() {
            return Err(Error::validation("sub-document path must not be empty"));
        }
        self.client.inner().path(&self.address()?.with_sub_path(sub_path))
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        raw: bool,
        payload: Payload,
    ) -> Result<Outcome> {
        let query = if raw {
            vec![(RAW.0, RAW.1.to_string())]
        } else {
            Vec::new()
        };
        self.client.inner().dispatch(method, path, &query, payload).await
    }

    /// Returns `true` if the document exists.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid address or any non-404 failure.
    pub async fn exist(&self) -> Result<bool> {
        let path = self.path()?;
        let outcome = self.dispatch(Method::Get, &path, false, Payload::None).await?;
        Ok(outcome.into_optional()?.is_some())
    }

    /// Creates or replaces the document. Returns the document id.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or the request
    /// fails.
    pub async fn upsert<T: Serialize + ?Sized>(&self, document: &T) -> Result<String> {
        self.write(Method::Put, document).await
    }

    /// Merges `partial` into the existing document. Returns the document id.
    ///
    /// # Errors
    ///
    /// As [`upsert()`](Self::upsert).
    pub async fn update<T: Serialize + ?Sized>(&self, partial: &T) -> Result<String> {
        self.write(Method::Patch, partial).await
    }

    async fn write<T: Serialize + ?Sized>(&self, method: Method, document: &T) -> Result<String> {
        let path = self.path()?;
        let body = self
            .dispatch(method, &path, false, Payload::json(document)?)
            .await?
            .into_result()?;
        let written: DocumentIdResponse = decode_required(body)?;
        debug!(%method, id = %written.document_id, "document written");
        Ok(written.document_id)
    }

    /// Fetches the document, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded
    /// as `T`.
    pub async fn find<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let path = self.path()?;
        self.read(&path).await
    }

    /// Deletes the document. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid address or any non-404 failure.
    pub async fn delete(&self) -> Result<bool> {
        let path = self.path()?;
        let deleted = self
            .dispatch(Method::Delete, &path, false, Payload::None)
            .await?
            .into_optional()?
            .is_some();
        debug!(id = %self.id, deleted, "document delete");
        Ok(deleted)
    }

    /// Fetches the value at `sub_path` (e.g. `"address/city"`), or `None` if
    /// the document or path does not exist.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty path, or an error if the
    /// request fails or the value cannot be decoded as `T`.
    pub async fn find_sub_document<T: DeserializeOwned>(&self, sub_path: &str) -> Result<Option<T>> {
        let path = self.sub_path(sub_path)?;
        self.read(&path).await
    }

    /// Replaces the value at `sub_path`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty path, or an error if the
    /// request fails.
    pub async fn replace_sub_document<T: Serialize + ?Sized>(&self, sub_path: &str, value: &T) -> Result<()> {
        let path = self.sub_path(sub_path)?;
        self.dispatch(Method::Put, &path, false, Payload::json(value)?)
            .await?
            .into_result()
            .map(|_| ())
    }

    /// Merges `value` into the object at `sub_path`.
    ///
    /// # Errors
    ///
    /// As [`replace_sub_document()`](Self::replace_sub_document).
    pub async fn update_sub_document<T: Serialize + ?Sized>(&self, sub_path: &str, value: &T) -> Result<()> {
        let path = self.sub_path(sub_path)?;
        self.dispatch(Method::Patch, &path, true, Payload::json(value)?)
            .await?
            .into_result()
            .map(|_| ())
    }

    /// Deletes the value at `sub_path`. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty path, or an error for any
    /// non-404 failure.
    pub async fn delete_sub_document(&self, sub_path: &str) -> Result<bool> {
        let path = self.sub_path(sub_path)?;
        Ok(self
            .dispatch(Method::Delete, &path, true, Payload::None)
            .await?
            .into_optional()?
            .is_some())
    }

    async fn read<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self
            .dispatch(Method::Get, path, true, Payload::None)
            .await?
            .into_optional()?
        {
            Some(body) if body.is_empty() => Ok(None),
            Some(body) => decode_json(&body).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for DocumentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentClient")
            .field("namespace", &self.namespace)
            .field("collection", &self.collection)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;
    use crate::path::PathEncoding;
    use crate::ErrorKind;

    const DOC_PATH: &str = "/v2/namespaces/ns1/collections/coll1/d1";

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Person {
        name: String,
        age: u32,
    }

    fn document(server: &MockServer, id: &str) -> DocumentClient {
        let config = ClientConfig::builder()
            .base_url(server.uri())
            .bearer_token("tok-A")
            .build()
            .unwrap();
        Client::new(config).unwrap().namespace("ns1").collection("coll1").document(id)
    }

    #[tokio::test]
    async fn test_upsert_returns_document_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(DOC_PATH))
            .and(header("X-Cassandra-Token", "tok-A"))
            .and(body_json(json!({"name": "alice", "age": 42})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documentId": "d1"})))
            .expect(1)
            .mount(&server)
            .await;

        let id = document(&server, "d1")
            .upsert(&Person { name: "alice".into(), age: 42 })
            .await
            .unwrap();
        assert_eq!(id, "d1");
    }

    #[tokio::test]
    async fn test_update_uses_patch() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documentId": "d1"})))
            .expect(1)
            .mount(&server)
            .await;

        let id = document(&server, "d1").update(&json!({"age": 43})).await.unwrap();
        assert_eq!(id, "d1");
    }

    #[tokio::test]
    async fn test_find_reads_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .and(query_param("raw", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "alice", "age": 42})))
            .mount(&server)
            .await;

        let found: Option<Person> = document(&server, "d1").find().await.unwrap();
        assert_eq!(found, Some(Person { name: "alice".into(), age: 42 }));
    }

    #[tokio::test]
    async fn test_find_missing_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let found: Option<Person> = document(&server, "d1").find().await.unwrap();
        assert!(found.is_none());
        assert!(!document(&server, "d1").exist().await.unwrap());
    }

    #[tokio::test]
    async fn test_find_undecodable_body_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"name\": 7}"))
            .mount(&server)
            .await;

        let err = document(&server, "d1").find::<Person>().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert_eq!(err.body(), Some("{\"name\": 7}"));
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(204))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let doc = document(&server, "d1");
        assert!(doc.delete().await.unwrap());
        assert!(!doc.delete().await.unwrap());
    }

    #[tokio::test]
    async fn test_server_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = document(&server, "d1").exist().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body(), Some("boom"));
    }

    #[tokio::test]
    async fn test_sub_document_operations() {
        let server = MockServer::start().await;
        let sub = format!("{}/address/city", DOC_PATH);
        Mock::given(method("GET"))
            .and(path(sub.as_str()))
            .and(query_param("raw", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("Paris")))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path(sub.as_str()))
            .and(body_json(json!("Lyon")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documentId": "d1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path(format!("{}/address", DOC_PATH)))
            .and(query_param("raw", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documentId": "d1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(sub.as_str()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let doc = document(&server, "d1");
        let city: Option<String> = doc.find_sub_document("address/city").await.unwrap();
        assert_eq!(city.as_deref(), Some("Paris"));
        doc.replace_sub_document("/address/city", &"Lyon").await.unwrap();
        doc.update_sub_document("address", &json!({"zip": "69000"})).await.unwrap();
        assert!(doc.delete_sub_document("address/city").await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_addresses_fail_before_io() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = document(&server, "").exist().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = document(&server, "d1").find_sub_document::<String>("/").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_dot_ids_never_reach_parent_resources() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v2/namespaces/ns1/collections/coll1/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v2/namespaces/ns1/collections/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        for encoding in [PathEncoding::Raw, PathEncoding::Percent] {
            let config = ClientConfig::builder()
                .base_url(server.uri())
                .bearer_token("tok-A")
                .path_encoding(encoding)
                .build()
                .unwrap();
            let collection = Client::new(config).unwrap().namespace("ns1").collection("coll1");
            for id in [".", ".."] {
                let err = collection.document(id).delete().await.unwrap_err();
                assert_eq!(err.kind(), ErrorKind::Validation, "{:?} {:?}", encoding, id);
            }
            let err = collection
                .document("d1")
                .delete_sub_document("address/..")
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }
}
