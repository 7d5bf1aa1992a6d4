//! Backend error taxonomy shared by the REST client and its callers.
//!
//! ERROR HANDLING
//! ==============
//! Auth failures are returned to the UI call site. Read failures are logged
//! by callers and leave state at defaults. Write failures are logged and
//! surfaced with a notice. Nothing here is retried.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// PostgREST code returned when a single-object request matched zero rows.
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Errors produced by backend client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Credentials were rejected or the session could not be established.
    #[error("{0}")]
    Auth(String),

    /// An operation that needs a signed-in session was called without one.
    #[error("not signed in")]
    NoSession,

    /// A single-row select matched no rows.
    #[error("no matching row")]
    NotFound,

    /// The backend returned a non-success HTTP status.
    #[error("request failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The backend is only reachable from the browser build.
    #[error("backend not available outside the browser")]
    Unavailable,
}

/// Error body shape shared (loosely) by GoTrue and PostgREST.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl BackendError {
    /// Classify a non-success response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ApiErrorBody>(body).unwrap_or_default();
        if parsed.code.as_ref().and_then(serde_json::Value::as_str) == Some(NO_ROWS_CODE) {
            return Self::NotFound;
        }
        let message = parsed
            .msg
            .or(parsed.message)
            .or(parsed.error_description)
            .or(parsed.error)
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() { format!("HTTP {status}") } else { trimmed.to_owned() }
            });
        Self::Api { status, message }
    }

    /// Re-tag an API rejection from the auth endpoints as an auth failure.
    #[must_use]
    pub fn into_auth(self) -> Self {
        match self {
            Self::Api { status: 400..=499, message } => Self::Auth(message),
            other => other,
        }
    }
}
