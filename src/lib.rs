//! # blog-client
//!
//! Leptos + WASM frontend for the blog service: sign-in, sign-up, and a
//! paginated post list where the signed-in user manages their own posts.
//!
//! The session store, post-list synchronizer and auth flow live in `state`,
//! `services` and `net` and do not touch the browser, so `blog-cli` and the
//! native test suite drive exactly the same logic. Browser glue is gated
//! behind the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod services;
pub mod state;
pub mod util;

/// Browser entry point: install panic/log hooks and mount the app.
#[cfg(feature = "csr")]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::debug!("mounting blog client against {}", config::ApiConfig::default().base_url);
    leptos::mount::mount_to_body(app::App);
}
