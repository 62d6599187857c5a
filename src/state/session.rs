//! Session context: the bearer token plus identity derived from it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Created once at startup with [`Session::open`], which loads any persisted
//! token. Sign-in installs a token; logout and any `401` clear it. The web app
//! provides the session via context, the CLI passes it explicitly.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort: a store that cannot write still leaves the
//! in-memory session usable until the page or process ends.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::{Arc, Mutex};

use super::claims::{Claims, decode_claims};
use crate::net::types::Post;

/// Durable home for the token (browser `localStorage`, a file, memory).
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Process-local store used by tests and ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(token.to_owned()))) }
    }

    /// The currently persisted token, if any.
    pub fn persisted(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.persisted()
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token.to_owned());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

/// Authentication status derived from token presence alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    LoggedIn,
    LoggedOut,
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    token: Option<String>,
}

impl Session {
    /// Start a session, restoring whatever token the store persisted.
    pub fn open(store: Arc<dyn TokenStore>) -> Self {
        let token = store.load().filter(|t| !t.is_empty());
        Self { store, token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn status(&self) -> SessionStatus {
        if self.token.is_some() { SessionStatus::LoggedIn } else { SessionStatus::LoggedOut }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::LoggedIn
    }

    /// Install and persist a token. An empty token clears the session.
    pub fn set_token(&mut self, token: &str) {
        if token.is_empty() {
            self.clear_token();
            return;
        }
        self.store.save(token);
        self.token = Some(token.to_owned());
    }

    pub fn clear_token(&mut self) {
        self.store.clear();
        self.token = None;
    }

    /// Claims decoded from the current token, if it is present and well formed.
    pub fn claims(&self) -> Option<Claims> {
        self.token.as_deref().and_then(decode_claims)
    }

    pub fn user_id(&self) -> Option<String> {
        self.claims().and_then(|c| c.user_id)
    }

    pub fn user_email(&self) -> Option<String> {
        self.claims().and_then(|c| c.email)
    }

    /// Whether to offer edit/delete controls for `post`. Not an authorization check.
    pub fn can_modify(&self, post: &Post) -> bool {
        match (self.user_id(), post.author_id()) {
            (Some(user), Some(author)) => user == author,
            _ => false,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("status", &self.status())
            .field("user_id", &self.user_id())
            .finish_non_exhaustive()
    }
}
