//! Error types for the Stargate SDK.
//!
//! Every fallible operation returns [`Error`], categorized by [`ErrorKind`].
//!
//! ## Key Invariant
//!
//! HTTP 404 is not an error on read paths. `exist()` returns `Ok(false)`,
//! `find()` returns `Ok(None)` and `delete()` returns `Ok(false)` when the
//! target is missing. Only operations where absence is itself a failure surface
//! [`ErrorKind::NotFound`].
//!
//! ```rust,ignore
//! // find() - absence is Ok(None)
//! let doc: Option<Person> = collection.document("42").find().await?;
//!
//! // server-side rejections keep their status and body
//! if let Err(err) = collection.document("42").upsert(&person).await {
//!     eprintln!("{:?} {:?}", err.status(), err.body());
//! }
//! ```

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;
