//! Browser `localStorage` token persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The web app hands a [`BrowserTokenStore`] to `Session::open` at startup.
//! Reads and writes are best-effort: a blocked or missing storage area
//! behaves like an empty one.

use crate::state::session::TokenStore;

/// Token store keyed by `config::TOKEN_STORAGE_KEY` in `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(crate::config::TOKEN_STORAGE_KEY).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("localStorage unavailable; token kept in memory only");
                return;
            };
            let _ = storage.set_item(crate::config::TOKEN_STORAGE_KEY, token);
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(crate::config::TOKEN_STORAGE_KEY);
            }
        }
    }
}
