//! Resource path composition for the document API.
//!
//! A [`ResourceAddress`] names a point in the namespace → collection →
//! document → sub-path hierarchy; [`build_path`] maps it to the URL path
//! appended to the session base URL.
//!
//! ```rust
//! use stargate::path::{build_path, PathEncoding, ResourceAddress};
//!
//! let address = ResourceAddress::new("ns1")
//!     .with_collection("coll1")
//!     .with_document("d1");
//! assert_eq!(
//!     build_path(&address, PathEncoding::Raw).unwrap(),
//!     "/v2/namespaces/ns1/collections/coll1/d1"
//! );
//! ```

use std::borrow::Cow;

use crate::{Error, Result};

/// Version prefix of the document API.
pub const API_PREFIX: &str = "/v2";

/// How path segments are inserted into the URL.
///
/// In both modes a segment (or sub-path piece) that is a dot segment, `.` or
/// `..`, is rejected: URL parsing would resolve it against the parent and
/// address a different resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathEncoding {
    /// Segments are inserted verbatim. Callers must not pass identifiers
    /// containing `/`, `?`, `#` or `%`. Dot segments, including their
    /// percent-encoded spellings such as `%2e`, are rejected.
    #[default]
    Raw,

    /// Every segment is percent-encoded. Sub-paths are split on `/` and each
    /// piece is encoded separately, so the sub-path hierarchy is preserved.
    Percent,
}

impl PathEncoding {
    pub(crate) fn segment<'a>(&self, value: &'a str) -> Result<Cow<'a, str>> {
        if self.is_dot_segment(value) {
            return Err(Error::validation(format!(
                "path segment '{}' is not allowed",
                value
            )));
        }
        Ok(match self {
            PathEncoding::Raw => Cow::Borrowed(value),
            PathEncoding::Percent => urlencoding::encode(value),
        })
    }

    fn sub_path<'a>(&self, value: &'a str) -> Result<Cow<'a, str>> {
        if let Some(piece) = value.split('/').find(|piece| self.is_dot_segment(piece)) {
            return Err(Error::validation(format!(
                "sub-path '{}' contains the segment '{}'",
                value, piece
            )));
        }
        Ok(match self {
            PathEncoding::Raw => Cow::Borrowed(value),
            PathEncoding::Percent => Cow::Owned(
                value
                    .split('/')
                    .map(urlencoding::encode)
                    .collect::<Vec<_>>()
                    .join("/"),
            ),
        })
    }

    // `%2e` is only decoded by the URL parser when inserted verbatim.
    fn is_dot_segment(&self, value: &str) -> bool {
        let value = match self {
            PathEncoding::Raw => Cow::Owned(value.to_ascii_lowercase().replace("%2e", ".")),
            PathEncoding::Percent => Cow::Borrowed(value),
        };
        value == "." || value == ".."
    }
}

/// A logical address in the document hierarchy.
///
/// Empty strings are treated as absent levels. Addresses are cheap to build
/// and are typically constructed per call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ResourceAddress {
    namespace: String,
    collection: Option<String>,
    document_id: Option<String>,
    sub_path: Option<String>,
}

impl ResourceAddress {
    /// Creates an address pointing at a namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    /// Creates an address from all of its levels at once.
    ///
    /// No validation happens here; [`build_path`] rejects broken hierarchies.
    pub fn from_parts(
        namespace: impl Into<String>,
        collection: Option<String>,
        document_id: Option<String>,
        sub_path: Option<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            collection,
            document_id,
            sub_path,
        }
    }

    /// Sets the collection.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Sets the document id.
    #[must_use]
    pub fn with_document(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Sets the sub-path inside the document.
    #[must_use]
    pub fn with_sub_path(mut self, sub_path: impl Into<String>) -> Self {
        self.sub_path = Some(sub_path.into());
        self
    }

    /// Returns the namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the collection, if set and non-empty.
    pub fn collection(&self) -> Option<&str> {
        present(&self.collection)
    }

    /// Returns the document id, if set and non-empty.
    pub fn document_id(&self) -> Option<&str> {
        present(&self.document_id)
    }

    /// Returns the sub-path, if set and non-empty.
    pub fn sub_path(&self) -> Option<&str> {
        present(&self.sub_path)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Maps an address to its URL path.
///
/// The result is `/v2/namespaces/{ns}` followed by `/collections/{coll}`,
/// `/{doc}` and the sub-path, for whichever levels are present. A sub-path is
/// prefixed with `/` when it lacks one; a trailing `/` is kept as given.
///
/// # Errors
///
/// Returns [`ErrorKind::Validation`](crate::ErrorKind::Validation) if the
/// namespace is empty, if a level is set while its parent is absent, or if
/// any segment is `.` or `..`.
pub fn build_path(address: &ResourceAddress, encoding: PathEncoding) -> Result<String> {
    let namespace = address.namespace();
    let collection = address.collection();
    let document_id = address.document_id();
    let sub_path = address.sub_path();

    if namespace.is_empty() {
        return Err(Error::validation("namespace must not be empty"));
    }
    if document_id.is_some() && collection.is_none() {
        return Err(Error::validation("a document id requires a collection"));
    }
    if sub_path.is_some() && document_id.is_none() {
        return Err(Error::validation("a sub-path requires a document id"));
    }

    let mut path = format!("{}/namespaces/{}", API_PREFIX, encoding.segment(namespace)?);
    if let Some(collection) = collection {
        path.push_str("/collections/");
        path.push_str(&encoding.segment(collection)?);
    }
    if let Some(document_id) = document_id {
        path.push('/');
        path.push_str(&encoding.segment(document_id)?);
    }
    if let Some(sub_path) = sub_path {
        if !sub_path.starts_with('/') {
            path.push('/');
        }
        path.push_str(&encoding.sub_path(sub_path)?);
    }
    Ok(path)
}

/// Path of the namespace schema endpoint, optionally for one namespace.
///
/// ```rust
/// use stargate::path::{schema_namespaces_path, PathEncoding};
///
/// assert_eq!(
///     schema_namespaces_path(None, PathEncoding::Raw).unwrap(),
///     "/v2/schemas/namespaces"
/// );
/// assert_eq!(
///     schema_namespaces_path(Some("ks"), PathEncoding::Raw).unwrap(),
///     "/v2/schemas/namespaces/ks"
/// );
/// ```
///
/// # Errors
///
/// Returns a validation error if `namespace` is `.` or `..`.
pub fn schema_namespaces_path(namespace: Option<&str>, encoding: PathEncoding) -> Result<String> {
    Ok(match namespace {
        Some(ns) => format!("{}/schemas/namespaces/{}", API_PREFIX, encoding.segment(ns)?),
        None => format!("{}/schemas/namespaces", API_PREFIX),
    })
}
