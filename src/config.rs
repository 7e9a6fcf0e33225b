//! Client configuration: endpoint base resolution and credential storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The endpoint base is resolved once, when the config is built, from (in
//! priority order) an explicit override, the hosting page's protocol and
//! hostname on the API port, or a loopback fallback. Browser globals are only
//! read inside `ClientConfig::browser`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::sync::Arc;

use crate::net::credential::{CredentialStorage, LocalStorage, MemoryStorage};

pub const DEFAULT_API_PORT: u16 = 8010;
pub const LOOPBACK_HOST: &str = "127.0.0.1";

/// Build-time override for the endpoint base.
pub const API_URL_OVERRIDE: Option<&str> = option_env!("BAYESQC_API_URL");

/// Protocol and hostname of the page hosting the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOrigin {
    /// Location protocol including the trailing colon, e.g. `"https:"`.
    pub protocol: String,
    pub hostname: String,
}

impl PageOrigin {
    /// Read the current `window.location`, if running in a browser.
    #[must_use]
    pub fn current() -> Option<Self> {
        #[cfg(feature = "csr")]
        {
            let location = web_sys::window()?.location();
            Some(Self {
                protocol: location.protocol().ok()?,
                hostname: location.hostname().ok()?,
            })
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }
}

/// Resolve the endpoint base from an override and the hosting page.
#[must_use]
pub fn resolve_endpoint_base(override_url: Option<&str>, page: Option<&PageOrigin>) -> String {
    if let Some(url) = override_url.map(str::trim).filter(|u| !u.is_empty()) {
        return url.trim_end_matches('/').to_owned();
    }
    let (scheme, host) = match page {
        Some(origin) if !origin.hostname.is_empty() => {
            let scheme = if origin.protocol == "https:" { "https" } else { "http" };
            (scheme, origin.hostname.as_str())
        }
        _ => ("http", LOOPBACK_HOST),
    };
    format!("{scheme}://{host}:{DEFAULT_API_PORT}")
}

/// Everything the request pipeline needs at construction.
#[derive(Clone)]
pub struct ClientConfig {
    pub endpoint_base: String,
    pub storage: Arc<dyn CredentialStorage>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint_base", &self.endpoint_base)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(endpoint_base: impl Into<String>, storage: Arc<dyn CredentialStorage>) -> Self {
        Self { endpoint_base: endpoint_base.into(), storage }
    }

    /// Config for the hosting browser page, backed by `localStorage`.
    ///
    /// Honors the `BAYESQC_API_URL` build-time override.
    #[must_use]
    pub fn browser() -> Self {
        let endpoint_base = resolve_endpoint_base(API_URL_OVERRIDE, PageOrigin::current().as_ref());
        Self::new(endpoint_base, Arc::new(LocalStorage))
    }

    /// Config with in-memory storage, for tests.
    #[must_use]
    pub fn in_memory(endpoint_base: impl Into<String>) -> Self {
        Self::new(endpoint_base, Arc::new(MemoryStorage::new()))
    }

    /// Replace the endpoint base with an explicit override.
    #[must_use]
    pub fn with_endpoint_base(mut self, endpoint_base: &str) -> Self {
        self.endpoint_base = resolve_endpoint_base(Some(endpoint_base), None);
        self
    }
}
