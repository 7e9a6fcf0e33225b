//! Networking modules for the authenticated REST pipeline.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the caller-facing client, `credential` owns the persisted API key,
//! `transport` is the network seam, `types` defines request/response shapes,
//! and `error` normalizes failures into one message.

pub mod api;
pub mod credential;
pub mod error;
pub mod transport;
pub mod types;

pub use api::ApiClient;
pub use credential::CredentialStore;
pub use error::ApiError;
pub use transport::{BrowserTransport, Transport};
pub use http::HeaderMap;
pub use types::FormPayload;
