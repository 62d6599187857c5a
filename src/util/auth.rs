//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components that need a session apply identical unauthenticated
//! redirect behavior. A forced logout (any `401`) clears the session signal,
//! which re-runs the effect and sends the user to sign-in.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::app::SIGN_IN_ROUTE;
use crate::state::session::Session;

pub fn should_redirect_unauth(session: &Session) -> bool {
    !session.is_authenticated()
}

/// Redirect to the sign-in route whenever the session holds no token.
pub fn install_unauth_redirect<F>(session: RwSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if session.with(should_redirect_unauth) {
            navigate(SIGN_IN_ROUTE, NavigateOptions::default());
        }
    });
}
