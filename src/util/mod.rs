//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, dialogs, redirects)
//! from page and component logic. Without the `csr` feature they compile to
//! inert fallbacks so the crate still builds and tests natively.

pub mod auth;
pub mod confirm;
pub mod storage;
