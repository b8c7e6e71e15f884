//! # client
//!
//! Leptos frontend for Waypost: pages, components, the shared auth-session
//! state machine, and the REST helpers that talk to the server.
//!
//! The auth session is provided once at the application root and read by
//! every user-aware component through context.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
