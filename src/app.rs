//! Root application component with guarded routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every location is routed through `GuardedRoute`, which evaluates the
//! navigation guard before any page view is built. Page components live
//! outside this crate and plug in through `ViewRegistry`.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::collections::HashMap;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, StaticSegment, WildcardSegment,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::config::ClientConfig;
use crate::net::{ApiClient, BrowserTransport};
use crate::routes::{Navigation, NavigationGuard, RouteMatch, ViewId};

/// Renders the page for a matched route.
pub type ViewFn = fn(&RouteMatch) -> AnyView;

/// Route-registration contract: which page renders each [`ViewId`].
///
/// Unregistered views fall back to a placeholder showing the route's title
/// and help text.
#[derive(Clone, Default)]
pub struct ViewRegistry {
    views: HashMap<ViewId, ViewFn>,
}

impl ViewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn register(mut self, view: ViewId, render: ViewFn) -> Self {
        self.views.insert(view, render);
        self
    }

    #[must_use]
    pub fn is_registered(&self, view: ViewId) -> bool {
        self.views.contains_key(&view)
    }

    /// The outermost node with a registered page renders; a layout page can
    /// call [`ViewRegistry::render_leaf`] for its nested content.
    #[must_use]
    pub fn render(&self, matched: &RouteMatch) -> AnyView {
        matched
            .trail
            .iter()
            .find_map(|node| self.views.get(&node.view))
            .map_or_else(|| placeholder_view(matched), |render| render(matched))
    }

    #[must_use]
    pub fn render_leaf(&self, matched: &RouteMatch) -> AnyView {
        match self.views.get(&matched.view()) {
            Some(render) => render(matched),
            None => placeholder_view(matched),
        }
    }
}

fn placeholder_view(matched: &RouteMatch) -> AnyView {
    let (title, help) = matched.meta().map_or(("", ""), |meta| (meta.title, meta.help));
    view! {
        <section class="route-placeholder">
            <h1>{title}</h1>
            <p class="route-help">{help}</p>
        </section>
    }
    .into_any()
}

/// Root application component.
///
/// Provides the API client, navigation guard, and view registry as context,
/// then routes every location through the guard.
#[component]
pub fn App(#[prop(optional)] views: Option<ViewRegistry>) -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::browser();
    log::info!("api base: {}", config.endpoint_base);
    let client = ApiClient::new(config, BrowserTransport);
    let guard = NavigationGuard::new(client.credentials().clone());

    provide_context(client);
    provide_context(guard);
    provide_context(views.unwrap_or_default());

    view! {
        <Title text="BayesQC"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=GuardedRoute/>
                <Route path=WildcardSegment("path") view=GuardedRoute/>
            </Routes>
        </Router>
    }
}

/// Guard decision that follows `pathname`.
///
/// The signal is derived, so every read re-evaluates against the current
/// path and the credential store as it is at that moment.
pub fn guarded_navigation(guard: NavigationGuard, pathname: Signal<String>) -> Signal<Navigation> {
    Signal::derive(move || guard.evaluate(&pathname.get()))
}

/// Where a decision sends the user, if it redirects.
#[must_use]
pub fn redirect_target(decision: &Navigation) -> Option<&'static str> {
    match decision {
        Navigation::Redirected { to, .. } => Some(to),
        Navigation::Allowed { .. } => None,
    }
}

/// Replace the current history entry whenever the decision redirects.
pub fn install_guard_redirect<F>(decision: Signal<Navigation>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(to) = redirect_target(&decision.get()) {
            navigate(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Evaluates the guard for the current location and renders or redirects.
#[component]
fn GuardedRoute() -> impl IntoView {
    let guard = expect_context::<NavigationGuard>();
    let registry = expect_context::<ViewRegistry>();
    let location = use_location();

    let decision = guarded_navigation(guard, location.pathname.into());
    install_guard_redirect(decision, use_navigate());

    move || match decision.get() {
        Navigation::Allowed { matched: Some(matched), .. } => registry.render(&matched),
        Navigation::Allowed { matched: None, .. } => "Page not found.".into_any(),
        Navigation::Redirected { .. } => ().into_any(),
    }
}
