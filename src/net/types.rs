//! Request/response shapes shared by the pipeline and its transports.
//!
//! DESIGN
//! ======
//! The pipeline builds a fully-resolved `HttpRequest` before dispatch so the
//! transport only moves bytes. Responses arrive with the body already read
//! as text; decoding policy stays in `api`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use http::{HeaderMap, HeaderName};

/// Header carrying the stored credential on every authenticated request.
pub const AUTH_HEADER: HeaderName = HeaderName::from_static("x-api-key");

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP verbs issued by the pipeline. Upload is a `Post` with a multipart body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

/// One part of a multipart upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

/// Opaque multipart payload handed to the transport unchanged.
///
/// The boundary and `Content-Type` are computed by the transport, never by
/// the pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormPayload {
    parts: Vec<FormPart>,
}

impl FormPayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(FormPart::Text { name: name.to_owned(), value: value.to_owned() });
        self
    }

    #[must_use]
    pub fn file(mut self, name: &str, filename: &str, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        self.parts.push(FormPart::File {
            name: name.to_owned(),
            filename: filename.to_owned(),
            content_type: content_type.map(str::to_owned),
            bytes,
        });
        self
    }

    #[must_use]
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }
}

/// Encoded request body. `Empty` means no payload is sent at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(String),
    Multipart(FormPayload),
}

/// Fully-resolved outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

/// Transport response with the body already read as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    /// Any 2xx status counts as success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains(JSON_CONTENT_TYPE))
    }
}
