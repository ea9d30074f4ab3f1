//! Translation of HTTP responses into typed outcomes.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::RawResponse;
use crate::{Error, Result};

/// The interpreted result of one HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 200, 201, 202 or 204. The body is `None` for 204 and empty bodies.
    Success(Option<Bytes>),

    /// 404.
    NotFound,

    /// 400 or 422; `reason` is the raw response body.
    ValidationError {
        /// Status code.
        status: u16,
        /// Response body.
        reason: String,
    },

    /// Any other status, including 401 and 5xx.
    ServerError {
        /// Status code.
        status: u16,
        /// Response body.
        body: String,
    },
}

/// Classifies a response by status code.
///
/// | Status | Outcome |
/// |--------|---------|
/// | 200, 201, 202 | `Success(body)` (`None` if the body is empty) |
/// | 204 | `Success(None)` |
/// | 404 | `NotFound` |
/// | 400, 422 | `ValidationError` |
/// | anything else | `ServerError` |
///
/// 202 is a success: Astra DevOps returns it for asynchronous requests such
/// as database termination.
pub fn translate(response: RawResponse) -> Outcome {
    let status = response.status();
    let outcome = match status {
        200 | 201 | 202 => {
            let body = response.into_body();
            Outcome::Success(if body.is_empty() { None } else { Some(body) })
        },
        204 => Outcome::Success(None),
        404 => Outcome::NotFound,
        400 | 422 => Outcome::ValidationError {
            status,
            reason: response.body_text(),
        },
        _ => Outcome::ServerError {
            status,
            body: response.body_text(),
        },
    };
    debug!(status, success = outcome.is_success(), "response translated");
    outcome
}

impl Outcome {
    /// Returns `true` for [`Outcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns the status code for error outcomes.
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Success(_) => None,
            Outcome::NotFound => Some(404),
            Outcome::ValidationError { status, .. } | Outcome::ServerError { status, .. } => {
                Some(*status)
            },
        }
    }

    /// Converts into a `Result`, treating every non-success as an error.
    ///
    /// # Errors
    ///
    /// The error kind follows the status (see
    /// [`ErrorKind::from_http_status`](crate::ErrorKind::from_http_status));
    /// status and body are preserved.
    pub fn into_result(self) -> Result<Option<Bytes>> {
        match self {
            Outcome::Success(body) => Ok(body),
            Outcome::NotFound => Err(Error::from_status(404, "")),
            Outcome::ValidationError { status, reason } => Err(Error::from_status(status, reason)),
            Outcome::ServerError { status, body } => Err(Error::from_status(status, body)),
        }
    }

    /// Converts into a `Result`, mapping 404 to `Ok(None)`.
    ///
    /// A success without a body yields `Ok(Some(Bytes::new()))`.
    ///
    /// # Errors
    ///
    /// As [`into_result`](Self::into_result), for every outcome except 404.
    pub fn into_optional(self) -> Result<Option<Bytes>> {
        match self {
            Outcome::NotFound => Ok(None),
            other => other.into_result().map(|body| Some(body.unwrap_or_default())),
        }
    }
}

/// Decodes a JSON body.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidResponse`](crate::ErrorKind::InvalidResponse)
/// if the body is not valid JSON for `T`; the body is kept for diagnostics.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        Error::from(e).with_body(String::from_utf8_lossy(body).into_owned())
    })
}

/// Decodes a JSON body that the server must have sent.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidResponse`](crate::ErrorKind::InvalidResponse)
/// if the body is absent or not valid JSON for `T`.
pub fn decode_required<T: DeserializeOwned>(body: Option<Bytes>) -> Result<T> {
    match body {
        Some(body) => decode_json(&body),
        None => Err(Error::invalid_response("expected a JSON body, got none")),
    }
}
