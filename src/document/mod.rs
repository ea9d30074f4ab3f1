//! Document API resource clients.
//!
//! ```text
//! Client
//! └── NamespaceClient        /v2/schemas/namespaces/{ns}
//!     └── CollectionClient   /v2/namespaces/{ns}/collections/{coll}
//!         └── DocumentClient /v2/namespaces/{ns}/collections/{coll}/{id}[/{sub-path}]
//! ```
//!
//! Every call fetches a token from the session, builds its path with
//! [`build_path`](crate::path::build_path), and translates the response.
//! A 404 is reported as absence (`false`, `None`) by existence checks, reads
//! and deletes, and as [`ErrorKind::NotFound`](crate::ErrorKind::NotFound)
//! everywhere else.

mod collections;
mod documents;
mod namespaces;
mod query;
pub(crate) mod types;

pub use collections::CollectionClient;
pub use documents::DocumentClient;
pub use namespaces::NamespaceClient;
pub use query::{MAX_PAGE_SIZE, PageRequest, SearchQuery};
pub use types::{CollectionInfo, Datacenter, Document, DocumentPage, NamespaceInfo};
