use std::cell::Cell;

use leptos::prelude::*;

use super::*;
use crate::routes::resolve;

thread_local! {
    static RENDERED: Cell<Option<ViewId>> = const { Cell::new(None) };
}

fn record(view: ViewId) -> AnyView {
    RENDERED.with(|r| r.set(Some(view)));
    ().into_any()
}

fn layout_page(_: &RouteMatch) -> AnyView {
    record(ViewId::Layout)
}

fn alerts_page(_: &RouteMatch) -> AnyView {
    record(ViewId::Alerts)
}

fn rendered_by(registry: &ViewRegistry, path: &str, leaf_only: bool) -> Option<ViewId> {
    RENDERED.with(|r| r.set(None));
    let matched = resolve(path).unwrap();
    let _view = if leaf_only { registry.render_leaf(&matched) } else { registry.render(&matched) };
    RENDERED.with(Cell::get)
}

// =============================================================
// ViewRegistry
// =============================================================

#[test]
fn registered_layout_renders_before_leaf() {
    let registry = ViewRegistry::new()
        .register(ViewId::Layout, layout_page)
        .register(ViewId::Alerts, alerts_page);
    assert_eq!(rendered_by(&registry, "/alerts", false), Some(ViewId::Layout));
}

#[test]
fn render_leaf_skips_layout() {
    let registry = ViewRegistry::new()
        .register(ViewId::Layout, layout_page)
        .register(ViewId::Alerts, alerts_page);
    assert_eq!(rendered_by(&registry, "/alerts", true), Some(ViewId::Alerts));
}

#[test]
fn leaf_renders_when_no_layout_registered() {
    let registry = ViewRegistry::new().register(ViewId::Alerts, alerts_page);
    assert_eq!(rendered_by(&registry, "/alerts", false), Some(ViewId::Alerts));
}

#[test]
fn unregistered_views_fall_back_to_placeholder() {
    let registry = ViewRegistry::new().register(ViewId::Alerts, alerts_page);
    assert_eq!(rendered_by(&registry, "/charts", false), None);
    assert!(!registry.is_registered(ViewId::Charts));
    assert!(registry.is_registered(ViewId::Alerts));
}

// =============================================================
// Guarded navigation
// =============================================================

#[test]
fn guard_decision_follows_location_changes() {
    Owner::new().with(|| {
        let credentials = crate::net::CredentialStore::in_memory();
        let guard = NavigationGuard::new(credentials.clone());
        let path = RwSignal::new("/alerts".to_owned());
        let decision = guarded_navigation(guard, path.into());

        assert_eq!(redirect_target(&decision.get_untracked()), Some(crate::routes::LOGIN_PATH));

        credentials.set("local-dev-key");
        path.set("/charts".to_owned());
        match decision.get_untracked() {
            Navigation::Allowed { matched: Some(matched), .. } => assert_eq!(matched.view(), ViewId::Charts),
            other => panic!("expected /charts to be allowed, got {other:?}"),
        }

        credentials.clear();
        path.set("/login".to_owned());
        assert!(decision.get_untracked().is_allowed());

        path.set("/capas".to_owned());
        assert_eq!(redirect_target(&decision.get_untracked()), Some(crate::routes::LOGIN_PATH));
    });
}

#[test]
fn redirect_target_only_for_redirects() {
    let guard = NavigationGuard::new(crate::net::CredentialStore::in_memory());
    assert_eq!(redirect_target(&guard.evaluate("/events")), Some("/login"));
    assert_eq!(redirect_target(&guard.evaluate("/login")), None);
}
