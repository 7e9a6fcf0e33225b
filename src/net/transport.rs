//! Transport seam between the request pipeline and the network.
//!
//! Client-side (csr): `BrowserTransport` dispatches through `gloo-net`.
//! Elsewhere `BrowserTransport` fails every request, and tests supply their
//! own recording transport.

#![allow(clippy::unused_async)]

use super::types::{HttpRequest, HttpResponse};
#[cfg(feature = "csr")]
use super::types::{FormPart, FormPayload, Method, RequestBody};

/// Performs one HTTP exchange and reads the whole body as text.
///
/// Futures are not required to be `Send`; the browser runtime is
/// single-threaded.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns the transport's message when the exchange cannot complete.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

/// `fetch`-backed transport for the browser (`csr`) build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        #[cfg(feature = "csr")]
        {
            send_with_gloo(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err("not available on server".to_owned())
        }
    }
}

#[cfg(feature = "csr")]
fn js_error(value: wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(feature = "csr")]
fn to_form_data(form: &FormPayload) -> Result<web_sys::FormData, String> {
    let data = web_sys::FormData::new().map_err(js_error)?;
    for part in form.parts() {
        match part {
            FormPart::Text { name, value } => data.append_with_str(name, value).map_err(js_error)?,
            FormPart::File { name, filename, content_type, bytes } => {
                let chunks = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
                let options = web_sys::BlobPropertyBag::new();
                if let Some(content_type) = content_type {
                    options.set_type(content_type);
                }
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
                    .map_err(js_error)?;
                data.append_with_blob_and_filename(name, &blob, filename)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(data)
}

#[cfg(feature = "csr")]
async fn send_with_gloo(request: HttpRequest) -> Result<HttpResponse, String> {
    use gloo_net::http::Request;

    let HttpRequest { method, url, headers, body } = request;
    let mut builder = match method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Patch => Request::patch(&url),
    };
    for (name, value) in &headers {
        let value = value.to_str().map_err(|e| e.to_string())?;
        builder = builder.header(name.as_str(), value);
    }
    let built = match body {
        RequestBody::Empty => builder.build(),
        RequestBody::Json(text) => builder.body(text),
        RequestBody::Multipart(form) => builder.body(to_form_data(&form)?),
    };
    let resp = built.map_err(|e| e.to_string())?.send().await.map_err(|e| e.to_string())?;

    let status = resp.status();
    let content_type = resp.headers().get("content-type");
    let body = resp.text().await.map_err(|e| e.to_string())?;
    Ok(HttpResponse { status, content_type, body })
}
