//! Static route tree for the QC console.
//!
//! DESIGN
//! ======
//! The tree is a `static` built from `&'static` slices, so it is shared by
//! every navigation without synchronization. Page components are registered
//! separately against `ViewId`; this module only knows paths and metadata.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

/// The only path reachable without a credential.
pub const LOGIN_PATH: &str = "/login";

/// Identifies the page component a route renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewId {
    Login,
    /// Authenticated shell wrapping every other page.
    Layout,
    Dashboard,
    Instruments,
    Methods,
    Analytes,
    Streams,
    Ingestion,
    Alerts,
    Investigations,
    Capas,
    Events,
    Charts,
}

/// Display metadata handed verbatim to the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: &'static str,
    pub help: &'static str,
}

/// One node of the route tree.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteNode {
    /// Path segment relative to the parent; `""` is the parent's index.
    pub segment: &'static str,
    pub view: ViewId,
    pub meta: Option<RouteMeta>,
    pub children: &'static [RouteNode],
}

const fn leaf(segment: &'static str, view: ViewId, title: &'static str, help: &'static str) -> RouteNode {
    RouteNode { segment, view, meta: Some(RouteMeta { title, help }), children: &[] }
}

pub static ROUTES: &[RouteNode] = &[
    leaf(
        "/login",
        ViewId::Login,
        "Login",
        "Enter a valid API key and click Connect. The default local key is local-dev-key.",
    ),
    RouteNode {
        segment: "/",
        view: ViewId::Layout,
        meta: None,
        children: &[
            leaf(
                "",
                ViewId::Dashboard,
                "Dashboard",
                "Review alert/investigation/CAPA counts and click Refresh to reload the data.",
            ),
            leaf(
                "config/instruments",
                ViewId::Instruments,
                "Instruments",
                "Click Add Instrument to create one, or Edit to update existing instrument details.",
            ),
            leaf(
                "config/methods",
                ViewId::Methods,
                "Methods",
                "Select an instrument, enter a method name, and click Save to add or edit methods.",
            ),
            leaf(
                "config/analytes",
                ViewId::Analytes,
                "Analytes",
                "Pick a method, enter analyte details, and click Save to manage analytes and default units.",
            ),
            leaf(
                "config/streams",
                ViewId::Streams,
                "Streams",
                "Fill the stream form and click Save. Use Versions to view historical configurations.",
            ),
            leaf(
                "ingest",
                ViewId::Ingestion,
                "Ingest QC Records",
                "Select a stream, enter a result, and click Submit. Use CSV upload for batch ingestion.",
            ),
            leaf(
                "alerts",
                ViewId::Alerts,
                "Alerts",
                "Review alerts, update status or assignment, then click Save on the row.",
            ),
            leaf(
                "investigations",
                ViewId::Investigations,
                "Investigations",
                "Create a new investigation or edit an existing one to track findings and decisions.",
            ),
            leaf(
                "capas",
                ViewId::Capas,
                "CAPAs",
                "Create or edit CAPAs by filling required actions, owners, and due dates, then click Save.",
            ),
            leaf(
                "events",
                ViewId::Events,
                "Events",
                "Add calibration/maintenance/lot-change events to annotate QC timelines.",
            ),
            leaf(
                "charts",
                ViewId::Charts,
                "Charts",
                "Choose a stream and date range, then click Load to render QC trends and alerts.",
            ),
        ],
    },
];

/// Chain of nodes from a top-level route down to the matched node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    /// Normalized path that was resolved.
    pub path: String,
    pub trail: Vec<&'static RouteNode>,
    leaf: &'static RouteNode,
}

impl RouteMatch {
    /// Deepest matched node.
    #[must_use]
    pub fn leaf(&self) -> &'static RouteNode {
        self.leaf
    }

    #[must_use]
    pub fn view(&self) -> ViewId {
        self.leaf().view
    }

    #[must_use]
    pub fn meta(&self) -> Option<RouteMeta> {
        self.leaf().meta
    }

    /// Whether `view` appears anywhere along the trail (e.g. the layout).
    #[must_use]
    pub fn contains(&self, view: ViewId) -> bool {
        self.trail.iter().any(|node| node.view == view)
    }
}

/// Strip query and fragment and drop a trailing `/` (except on the root).
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = raw[..end].trim_end_matches('/');
    if path.is_empty() {
        "/".to_owned()
    } else if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if segment.starts_with('/') {
        return segment.to_owned();
    }
    match (prefix.trim_end_matches('/'), segment) {
        (base, "") if base.is_empty() => "/".to_owned(),
        (base, "") => base.to_owned(),
        (base, seg) => format!("{base}/{seg}"),
    }
}

fn find_in(nodes: &'static [RouteNode], prefix: &str, target: &str) -> Option<Vec<&'static RouteNode>> {
    for node in nodes {
        let full = join(prefix, node.segment);
        if let Some(mut trail) = find_in(node.children, &full, target) {
            trail.insert(0, node);
            return Some(trail);
        }
        if full == target {
            return Some(vec![node]);
        }
    }
    None
}

/// Resolve `path` against `routes`, depth-first, children before parents.
#[must_use]
pub fn resolve_in(routes: &'static [RouteNode], path: &str) -> Option<RouteMatch> {
    let path = normalize_path(path);
    let trail = find_in(routes, "", &path)?;
    let leaf = *trail.last()?;
    Some(RouteMatch { path, trail, leaf })
}

/// Resolve `path` against [`ROUTES`].
#[must_use]
pub fn resolve(path: &str) -> Option<RouteMatch> {
    resolve_in(ROUTES, path)
}
