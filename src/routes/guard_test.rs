use super::*;
use crate::routes::table::ViewId;

fn guard() -> (NavigationGuard, CredentialStore) {
    let store = CredentialStore::in_memory();
    (NavigationGuard::new(store.clone()), store)
}

fn allowed_view(nav: &Navigation) -> Option<ViewId> {
    match nav {
        Navigation::Allowed { matched, .. } => matched.as_ref().map(RouteMatch::view),
        Navigation::Redirected { .. } => None,
    }
}

// =============================================================
// Login path
// =============================================================

#[test]
fn login_allowed_without_credential() {
    let (guard, _) = guard();
    let nav = guard.evaluate("/login");
    assert!(nav.is_allowed());
    assert_eq!(allowed_view(&nav), Some(ViewId::Login));
}

#[test]
fn login_allowed_with_credential() {
    let (guard, store) = guard();
    store.set("k");
    assert_eq!(allowed_view(&guard.evaluate("/login")), Some(ViewId::Login));
}

#[test]
fn login_with_query_is_still_login() {
    let (guard, _) = guard();
    assert!(guard.evaluate("/login?expired=1").is_allowed());
}

// =============================================================
// Protected paths
// =============================================================

#[test]
fn protected_path_redirects_without_credential() {
    let (guard, _) = guard();
    assert_eq!(
        guard.evaluate("/config/instruments"),
        Navigation::Redirected { from: "/config/instruments".to_owned(), to: LOGIN_PATH }
    );
}

#[test]
fn protected_path_resolves_with_credential() {
    let (guard, store) = guard();
    store.set("k");
    let nav = guard.evaluate("/config/instruments");
    assert_eq!(allowed_view(&nav), Some(ViewId::Instruments));
}

#[test]
fn root_redirects_on_first_load_without_credential() {
    let (guard, _) = guard();
    assert!(!guard.evaluate("/").is_allowed());
}

#[test]
fn unknown_path_redirects_without_credential() {
    let (guard, _) = guard();
    assert!(matches!(guard.evaluate("/nope"), Navigation::Redirected { to: "/login", .. }));
}

#[test]
fn unknown_path_with_credential_is_allowed_but_unmatched() {
    let (guard, store) = guard();
    store.set("k");
    assert_eq!(guard.evaluate("/nope"), Navigation::Allowed { path: "/nope".to_owned(), matched: None });
}

#[test]
fn guard_tracks_credential_changes_between_navigations() {
    let (guard, store) = guard();
    store.set("k");
    assert!(guard.evaluate("/alerts").is_allowed());
    store.clear();
    assert!(!guard.evaluate("/alerts").is_allowed());
}

#[test]
fn guard_never_mutates_credential() {
    let (guard, store) = guard();
    store.set("k");
    let _ = guard.evaluate("/login");
    let _ = guard.evaluate("/charts");
    assert_eq!(store.get(), Some("k".to_owned()));
}
