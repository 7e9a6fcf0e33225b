//! Navigation guard enforcing the credential gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! Evaluated before any page view is instantiated, on every location change
//! (first load, link clicks, and programmatic navigation alike). The guard
//! only reads the credential store and never fails: a missing credential is
//! a redirect, not an error.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::table::{LOGIN_PATH, ROUTES, RouteMatch, RouteNode, normalize_path, resolve_in};
use crate::net::credential::CredentialStore;

/// Outcome of one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Render `matched`; `None` is a not-found location.
    Allowed { path: String, matched: Option<RouteMatch> },
    /// Replace the requested location with `to`.
    Redirected { from: String, to: &'static str },
}

impl Navigation {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

#[derive(Clone, Debug)]
pub struct NavigationGuard {
    credentials: CredentialStore,
    routes: &'static [RouteNode],
}

impl NavigationGuard {
    #[must_use]
    pub fn new(credentials: CredentialStore) -> Self {
        Self::with_routes(credentials, ROUTES)
    }

    #[must_use]
    pub fn with_routes(credentials: CredentialStore, routes: &'static [RouteNode]) -> Self {
        Self { credentials, routes }
    }

    /// Decide whether navigation to `path` proceeds or lands on login.
    #[must_use]
    pub fn evaluate(&self, path: &str) -> Navigation {
        let path = normalize_path(path);
        if path != LOGIN_PATH && !self.credentials.is_authenticated() {
            log::debug!("guard: no credential, redirecting {path} -> {LOGIN_PATH}");
            return Navigation::Redirected { from: path, to: LOGIN_PATH };
        }
        let matched = resolve_in(self.routes, &path);
        Navigation::Allowed { path, matched }
    }
}
