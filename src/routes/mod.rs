//! Route table and navigation guard.
//!
//! ARCHITECTURE
//! ============
//! `table` owns the static path tree and depth-first resolution; `guard`
//! decides allow-or-redirect for each navigation against the credential store.

pub mod guard;
pub mod table;

pub use guard::{Navigation, NavigationGuard};
pub use table::{LOGIN_PATH, ROUTES, RouteMatch, RouteMeta, RouteNode, ViewId, resolve};
