//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{home::HomePage, sign_in::SignInPage, sign_up::SignUpPage};
use crate::state::draft::DraftPost;
use crate::state::posts::PostsState;
use crate::state::session::Session;
use crate::util::storage::BrowserTokenStore;

pub const HOME_ROUTE: &str = "/";
pub const SIGN_IN_ROUTE: &str = "/sign-in";
pub const SIGN_UP_ROUTE: &str = "/sign-up";

/// API client used by every page in the browser build.
#[cfg(feature = "csr")]
pub type WebApi = crate::net::api::ApiClient<crate::net::http::FetchTransport>;

/// Root application component.
///
/// Provides the session, post page and draft signals plus the API client,
/// then sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(Session::open(Arc::new(BrowserTokenStore)));
    let posts = RwSignal::new(PostsState::default());
    let draft = RwSignal::new(DraftPost::default());

    provide_context(session);
    provide_context(posts);
    provide_context(draft);

    #[cfg(feature = "csr")]
    provide_context::<WebApi>(crate::net::api::ApiClient::new(
        crate::net::http::FetchTransport,
        crate::config::ApiConfig::default(),
    ));

    view! {
        <Title text="Blog App"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("sign-in") view=SignInPage/>
                <Route path=StaticSegment("sign-up") view=SignUpPage/>
                <Route path=StaticSegment("") view=HomePage/>
            </Routes>
        </Router>
    }
}
