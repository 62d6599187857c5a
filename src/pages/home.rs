//! Home page: the signed-in user's view of the paginated post list.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It loads page 1 on mount and
//! routes every user action through [`dispatch`], which drives `PostSync`
//! against the context-provided signals. Losing the session (logout or any
//! `401`) triggers the shared unauthenticated redirect.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::{SIGN_IN_ROUTE, SIGN_UP_ROUTE};
use crate::components::pager::Pager;
use crate::components::post_card::PostCard;
use crate::components::post_form::PostForm;
use crate::error::ClientError;
use crate::net::api::Transport;
use crate::net::types::Post;
use crate::services::posts::PostSync;
use crate::state::cell::StateCell;
use crate::state::draft::DraftPost;
use crate::state::posts::PostsState;
use crate::state::session::Session;
use crate::util::auth::install_unauth_redirect;

/// A user action on the home page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HomeAction {
    Load(u32),
    SetPage(u32),
    SubmitDraft,
    Delete(String),
    Logout,
}

/// Run one action. Errors are already recorded on `PostsState` by the time
/// this returns. Logging out, explicitly or through an `Auth` error, also
/// discards the draft.
///
/// # Errors
///
/// Whatever the underlying `PostSync` operation returned.
pub async fn dispatch<T, S, P, D>(
    sync: &PostSync<'_, T, S, P>,
    draft: &D,
    action: HomeAction,
    confirm: impl FnOnce() -> bool,
) -> Result<(), ClientError>
where
    T: Transport,
    S: StateCell<Session>,
    P: StateCell<PostsState>,
    D: StateCell<DraftPost>,
{
    let logging_out = action == HomeAction::Logout;
    let result = match action {
        HomeAction::Load(page) => sync.load_page(page).await.map(drop),
        HomeAction::SetPage(page) => sync.set_page(page).await.map(drop),
        HomeAction::SubmitDraft => sync.submit_draft(draft).await.map(drop),
        HomeAction::Delete(id) => sync.delete_post(&id, confirm).await.map(drop),
        HomeAction::Logout => {
            sync.logout();
            Ok(())
        }
    };
    if logging_out || matches!(&result, Err(e) if e.is_auth()) {
        draft.update_state(DraftPost::clear);
    }
    result
}

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let posts = expect_context::<RwSignal<PostsState>>();
    let draft = expect_context::<RwSignal<DraftPost>>();
    install_unauth_redirect(session, use_navigate());

    #[cfg(feature = "csr")]
    let api = StoredValue::new(expect_context::<crate::app::WebApi>());

    let run = move |action: HomeAction| {
        #[cfg(feature = "csr")]
        {
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                let sync = PostSync::new(&api, &session, &posts);
                let confirm = || crate::util::confirm::confirm(crate::util::confirm::DELETE_POST_PROMPT);
                if let Err(e) = dispatch(&sync, &draft, action, confirm).await {
                    log::debug!("home action failed: {e}");
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = action;
        }
    };

    if session.with_untracked(Session::is_authenticated) {
        run(HomeAction::Load(1));
    }

    let busy = Signal::derive(move || posts.with(PostsState::is_mutating));
    let page = Signal::derive(move || posts.with(|p| p.page));
    let total_pages = Signal::derive(move || posts.with(|p| p.total_pages));
    let on_submit = Callback::new(move |()| run(HomeAction::SubmitDraft));
    let on_page = Callback::new(move |target: u32| run(HomeAction::SetPage(target)));
    let on_delete = Callback::new(move |id: String| run(HomeAction::Delete(id)));
    let on_edit = Callback::new(move |post: Post| draft.update(|d| d.begin_edit(&post)));

    view! {
        <Show
            when=move || session.with(Session::is_authenticated)
            fallback=move || {
                view! {
                    <div class="auth-page">
                        <div class="auth-card">
                            <h2>"Please Sign In"</h2>
                            <a class="btn btn--primary" href=SIGN_IN_ROUTE>"Sign In"</a>
                            <a class="btn btn--secondary" href=SIGN_UP_ROUTE>"Sign Up"</a>
                        </div>
                    </div>
                }
            }
        >
            <div class="home-page">
                <header class="home-page__header toolbar">
                    <h1 class="toolbar__title">"Blog App"</h1>
                    <span class="toolbar__spacer"></span>
                    <span class="toolbar__self">
                        {move || session.with(Session::user_email).unwrap_or_default()}
                    </span>
                    <button class="btn btn--danger" on:click=move |_| run(HomeAction::Logout)>
                        "Logout"
                    </button>
                </header>

                <main class="home-page__body">
                    <Show when=move || posts.with(|p| p.error.is_some())>
                        <div class="home-page__error">
                            {move || posts.with(|p| p.error.clone()).unwrap_or_default()}
                        </div>
                    </Show>

                    <PostForm draft=draft busy=busy on_submit=on_submit/>

                    <h2>"Recent Posts"</h2>
                    <Show
                        when=move || !posts.with(PostsState::is_loading)
                        fallback=|| view! { <p class="home-page__loading">"Loading posts..."</p> }
                    >
                        <Show
                            when=move || posts.with(|p| !p.items.is_empty())
                            fallback=|| view! { <p class="home-page__empty">"No posts yet. Create your first post!"</p> }
                        >
                            <div class="home-page__posts">
                                {move || {
                                    posts
                                        .with(|p| p.items.clone())
                                        .into_iter()
                                        .map(|post| {
                                            let can_modify = session.with(|s| s.can_modify(&post));
                                            view! {
                                                <PostCard
                                                    post=post
                                                    can_modify=can_modify
                                                    busy=busy
                                                    on_edit=on_edit
                                                    on_delete=on_delete
                                                />
                                            }
                                        })
                                        .collect::<Vec<_>>()
                                }}
                            </div>
                        </Show>
                    </Show>

                    <Pager page=page total_pages=total_pages on_change=on_page/>
                </main>
            </div>
        </Show>
    }
}
