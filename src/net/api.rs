//! Authenticated REST pipeline for communicating with the QC service.
//!
//! Every verb resolves `endpoint_base + path`, injects the stored API key,
//! dispatches through a [`Transport`], and normalizes the outcome.
//!
//! ERROR HANDLING
//! ==============
//! Callers get one `Result<T, ApiError>` per call. Non-2xx responses are
//! folded into `ApiError::Status` with a single message; there are no retries
//! and no partial successes.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::credential::CredentialStore;
use super::error::ApiError;
use super::transport::Transport;
use super::types::{AUTH_HEADER, FormPayload, HttpRequest, HttpResponse, JSON_CONTENT_TYPE, Method, RequestBody};
use crate::config::ClientConfig;

/// Client-call contract for page-level callers.
///
/// Cloning is cheap when the transport is; clones share the credential slot.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    endpoint_base: String,
    credentials: CredentialStore,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    #[must_use]
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            endpoint_base: config.endpoint_base,
            credentials: CredentialStore::new(config.storage),
            transport,
        }
    }

    /// Resolved endpoint base, for diagnostic display.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.endpoint_base
    }

    /// Shared credential store; hand this to the navigation guard.
    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    #[must_use]
    pub fn credential(&self) -> Option<String> {
        self.credentials.get()
    }

    pub fn set_credential(&self, token: &str) {
        self.credentials.set(token);
    }

    pub fn clear_credential(&self) {
        self.credentials.clear();
    }

    /// `GET {path}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or a body
    /// that does not decode into `R`. A stored credential that is not a valid
    /// header value fails with `ApiError::Encode` before anything is sent.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let headers = self.outgoing_headers(HeaderMap::new())?;
        self.request(Method::Get, path, headers, RequestBody::Empty).await
    }

    /// `POST {path}` with an optional JSON body.
    ///
    /// An empty success body (e.g. `204 No Content`) decodes as JSON `null`
    /// when `R` does not accept a string, so `R = ()` works for bodiless
    /// endpoints.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`]; also fails with `ApiError::Encode` when `body`
    /// cannot be serialized.
    pub async fn post<R, B>(&self, path: &str, body: Option<&B>, headers: Option<HeaderMap>) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.json_request(Method::Post, path, body, headers).await
    }

    /// `PATCH {path}` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::post`].
    pub async fn patch<R, B>(&self, path: &str, body: Option<&B>, headers: Option<HeaderMap>) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.json_request(Method::Patch, path, body, headers).await
    }

    /// Multipart `POST {path}`. The transport computes the content type.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn upload<R: DeserializeOwned>(
        &self,
        path: &str,
        form: FormPayload,
        headers: Option<HeaderMap>,
    ) -> Result<R, ApiError> {
        let headers = self.outgoing_headers(headers.unwrap_or_default())?;
        self.request(Method::Post, path, headers, RequestBody::Multipart(form)).await
    }

    async fn json_request<R, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        extra: Option<HeaderMap>,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        if let Some(extra) = extra {
            // Replaces every value of a name the caller supplies.
            headers.extend(extra);
        }
        let headers = self.outgoing_headers(headers)?;
        let body = encode_json_body(body)?;
        self.request(method, path, headers, body).await
    }

    /// Apply the credential last so callers cannot spoof or leak it.
    fn outgoing_headers(&self, mut headers: HeaderMap) -> Result<HeaderMap, ApiError> {
        match self.credentials.get() {
            Some(token) => {
                let value = HeaderValue::from_str(&token)
                    .map_err(|e| ApiError::Encode(format!("stored credential is not a valid header value: {e}")))?;
                headers.insert(AUTH_HEADER, value);
            }
            None => {
                headers.remove(AUTH_HEADER);
            }
        }
        Ok(headers)
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: RequestBody,
    ) -> Result<R, ApiError> {
        let url = format!("{}{path}", self.endpoint_base);
        log::debug!("api {} {url}", method.as_str());

        let resp = self
            .transport
            .send(HttpRequest { method, url, headers, body })
            .await
            .map_err(|e| {
                log::warn!("api {} {path} transport failure: {e}", method.as_str());
                ApiError::Transport(e)
            })?;

        if !resp.is_success() {
            let err = ApiError::from_status(resp.status, &resp.body);
            log::warn!("api {} {path} failed: status={} message={err}", method.as_str(), resp.status);
            return Err(err);
        }
        decode_success(resp)
    }
}

fn encode_json_body<B: Serialize + ?Sized>(body: Option<&B>) -> Result<RequestBody, ApiError> {
    match body {
        None => Ok(RequestBody::Empty),
        Some(body) => serde_json::to_string(body)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::Encode(e.to_string())),
    }
}

/// JSON bodies decode structurally; anything else is handed over as the raw
/// text, so `String` and `Value` targets both receive it verbatim.
///
/// An empty body has no structure to decode. It becomes `null` for a JSON
/// response and `""` otherwise, falling back to the other reading when the
/// target rejects the first.
fn decode_success<R: DeserializeOwned>(resp: HttpResponse) -> Result<R, ApiError> {
    let decoded = if resp.body.is_empty() {
        let (first, second) = if resp.is_json() {
            (Value::Null, Value::String(String::new()))
        } else {
            (Value::String(String::new()), Value::Null)
        };
        serde_json::from_value(first).or_else(|err| serde_json::from_value(second).map_err(|_| err))
    } else if resp.is_json() {
        serde_json::from_str(&resp.body)
    } else {
        serde_json::from_value(Value::String(resp.body))
    };
    decoded.map_err(|e| ApiError::Decode(e.to_string()))
}
