//! Transport seam to the workbench REST backend.
//!
//! The app talks to the backend only through [`Backend`]. A non-success
//! status is not a transport error: it comes back as a [`Response`] and is
//! turned into [`PmwError::Status`] by [`Response::into_body`], so callers
//! can report the status line to the user.

#[cfg(feature = "http")]
mod http;
#[cfg(test)]
pub(crate) mod mock;

#[cfg(feature = "http")]
pub use http::HttpBackend;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::PmwError;

/// Server constants.
pub const SETTINGS_PATH: &str = "/rest/settings/";
/// Project collection; `POST` creates, `GET {path}{id}` reads.
pub const PROJECT_PATH: &str = "/rest/project/";
/// Calculation requests.
pub const CALCULATION_PATH: &str = "/rest/calculation/";

/// Path of one project resource.
#[must_use]
pub fn project_path(id: &str) -> String {
    format!("{PROJECT_PATH}{}", urlencoding::encode(id))
}

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase.
    pub status_text: String,
    /// Response body as text.
    pub body: String,
}

impl Response {
    /// A `200 OK` response carrying `body`.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_owned(),
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body of a successful response, or the status as an error.
    pub fn into_body(self) -> Result<String, PmwError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(PmwError::Status {
                status: self.status,
                status_text: self.status_text,
            })
        }
    }
}

/// Blocking access to the backend.
pub trait Backend {
    /// `GET` `path`.
    fn get(&self, path: &str) -> Result<Response, PmwError>;

    /// `POST` `path` with a JSON `body`.
    fn post_json(&self, path: &str, body: &str) -> Result<Response, PmwError>;
}

/// Read a text body that may be JSON-encoded.
///
/// The backend answers identifiers and confirmations either as a JSON
/// string (`"proj123"`) or as bare text (`proj123`).
#[must_use]
pub fn text_body(body: &str) -> String {
    serde_json::from_str::<String>(body)
        .unwrap_or_else(|_| body.trim().to_owned())
}

/// Decode a JSON body into `T`.
///
/// The body may also be a JSON string whose content is the document.
pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, PmwError> {
    let value = match serde_json::from_str::<Value>(body)? {
        Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}
