//! # bayesqc-client
//!
//! Leptos + WASM data-access and navigation core for the QC console.
//!
//! This crate contains the authenticated REST pipeline (`net`), the
//! credential-gated route table (`routes`), client configuration (`config`),
//! and the root `App` component that wires them together. Page components
//! are supplied by the embedding application through `app::ViewRegistry`.

pub mod app;
pub mod config;
pub mod net;
pub mod routes;

/// WASM entry point: install logging and mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn mount() {
    use crate::app::App;
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(|| view! { <App/> });
}
