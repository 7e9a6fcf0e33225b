//! Normalized pipeline errors and error-body message extraction.
//!
//! ERROR HANDLING
//! ==============
//! Every failure reaches callers as one `ApiError` carrying a single
//! human-readable message. Non-2xx bodies are decoded as `{ "detail": ... }`
//! when possible and otherwise surfaced as raw text.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The network exchange could not complete.
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// A success body did not match the requested type.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// The request body could not be serialized.
    #[error("invalid request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// Normalize a non-2xx response into a `Status` error.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status { status, message: error_message(status, body) }
    }

    /// The single message shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Outcome of decoding a non-empty error body.
#[derive(Debug, PartialEq, Eq)]
enum DecodedError {
    /// The body was a keyed record with a `detail` field.
    Detail(String),
    /// Anything else; the raw text is used as-is.
    Raw,
}

fn decode_error_body(text: &str) -> DecodedError {
    let Ok(mut record) = serde_json::from_str::<Map<String, Value>>(text) else {
        return DecodedError::Raw;
    };
    match record.remove("detail") {
        Some(Value::String(detail)) => DecodedError::Detail(detail),
        Some(detail) => DecodedError::Detail(detail.to_string()),
        None => DecodedError::Raw,
    }
}

fn status_fallback_message(status: u16) -> String {
    format!("Request failed with {status}")
}

/// Resolve the user-facing message: `detail` field, then raw text, then a
/// generic message naming the status.
#[must_use]
pub fn error_message(status: u16, body: &str) -> String {
    let message = if body.is_empty() {
        String::new()
    } else {
        match decode_error_body(body) {
            DecodedError::Detail(detail) => detail,
            DecodedError::Raw => body.to_owned(),
        }
    };
    if message.is_empty() { status_fallback_message(status) } else { message }
}
