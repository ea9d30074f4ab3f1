//! Document API data types.

use serde::{Deserialize, Serialize};

use crate::json::null_as_default;

/// A document together with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T> {
    /// Document id.
    pub id: String,
    /// Document body.
    pub body: T,
}

/// One page of a collection listing or search.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPage<T> {
    /// Opaque cursor for the next page; `None` on the last page.
    pub page_state: Option<String>,
    /// Documents on this page.
    pub documents: Vec<Document<T>>,
}

impl<T> DocumentPage<T> {
    /// Returns `true` if another page can be fetched.
    pub fn has_more(&self) -> bool {
        self.page_state.is_some()
    }

    /// Number of documents on this page.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if this page holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Replication settings of a namespace in one datacenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datacenter {
    /// Datacenter name.
    pub name: String,
    /// Replication factor.
    #[serde(default)]
    pub replicas: u32,
}

impl Datacenter {
    /// Creates a datacenter replication entry.
    pub fn new(name: impl Into<String>, replicas: u32) -> Self {
        Self {
            name: name.into(),
            replicas,
        }
    }
}

/// Namespace (keyspace) description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    /// Namespace name.
    pub name: String,
    /// Per-datacenter replication, empty for `SimpleStrategy` namespaces.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub datacenters: Vec<Datacenter>,
}

/// Collection description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    /// Collection name.
    pub name: String,
    /// Whether the backing table can be upgraded (e.g. to SAI indexes).
    #[serde(default, deserialize_with = "null_as_default")]
    pub upgrade_available: bool,
    /// Kind of upgrade available, if any.
    #[serde(default)]
    pub upgrade_type: Option<String>,
}

// Wire shapes

#[derive(Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentIdResponse {
    pub document_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPage {
    #[serde(default)]
    pub page_state: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
pub(crate) struct CreateNamespace<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenters: Option<&'a [Datacenter]>,
}

#[derive(Serialize)]
pub(crate) struct CreateCollection<'a> {
    pub name: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_null_datacenters() {
        let ns: NamespaceInfo =
            serde_json::from_str(r#"{"name":"ks","datacenters":null,"other":true}"#).unwrap();
        assert_eq!(ns.name, "ks");
        assert!(ns.datacenters.is_empty());
    }

    #[test]
    fn test_collection_info_camel_case() {
        let info: CollectionInfo =
            serde_json::from_str(r#"{"name":"users","upgradeAvailable":true,"upgradeType":"SAI"}"#)
                .unwrap();
        assert!(info.upgrade_available);
        assert_eq!(info.upgrade_type.as_deref(), Some("SAI"));
    }

    #[test]
    fn test_raw_page_without_state() {
        let page: RawPage = serde_json::from_str(r#"{"data":{"a":{"x":1}}}"#).unwrap();
        assert!(page.page_state.is_none());
        assert_eq!(page.data.len(), 1);
    }

    #[test]
    fn test_create_namespace_body() {
        let dcs = [Datacenter::new("dc1", 3)];
        let simple = serde_json::to_value(CreateNamespace {
            name: "ks",
            replicas: Some(1),
            datacenters: None,
        })
        .unwrap();
        assert_eq!(simple, serde_json::json!({"name": "ks", "replicas": 1}));

        let network = serde_json::to_value(CreateNamespace {
            name: "ks",
            replicas: None,
            datacenters: Some(&dcs),
        })
        .unwrap();
        assert_eq!(
            network,
            serde_json::json!({"name": "ks", "datacenters": [{"name": "dc1", "replicas": 3}]})
        );
    }
}
