//! Post list synchronizer.
//!
//! SYSTEM CONTEXT
//! ==============
//! `PostSync` keeps the cached page consistent with user actions: loads
//! replace it, mutations patch it after the server confirms. Every error is
//! recorded on `PostsState::error` for the view and also returned to the
//! caller; an `Auth` error additionally clears the session, after which the
//! caller must send the user to sign-in.
//!
//! CONCURRENCY
//! ===========
//! State is only touched inside `StateCell` closures, never across an
//! `.await`. Page loads may overlap; the newest wins and older responses are
//! discarded. Mutations may not overlap; a second one fails fast with `Busy`.

#[cfg(test)]
#[path = "posts_test.rs"]
mod posts_test;

use crate::error::{ClientError, SIGN_IN_REQUIRED};
use crate::net::api::{ApiClient, Transport};
use crate::net::types::Post;
use crate::state::cell::StateCell;
use crate::state::draft::{DraftPost, validate_post_fields};
use crate::state::posts::{LoadOutcome, MutationKind, MutationTicket, PostsState};
use crate::state::session::Session;

/// Result of a page navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageChange {
    /// Out of `1..=total_pages`; nothing happened.
    Rejected,
    Loaded(LoadOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation prompt.
    Cancelled,
}

pub struct PostSync<'a, T, S, P> {
    api: &'a ApiClient<T>,
    session: &'a S,
    posts: &'a P,
}

impl<'a, T, S, P> PostSync<'a, T, S, P>
where
    T: Transport,
    S: StateCell<Session>,
    P: StateCell<PostsState>,
{
    pub fn new(api: &'a ApiClient<T>, session: &'a S, posts: &'a P) -> Self {
        Self { api, session, posts }
    }

    /// Fetch `page` and install it as the current page.
    ///
    /// Returns `Ok(LoadOutcome::Stale)` when a newer load overtook this one.
    ///
    /// # Errors
    ///
    /// `Auth` (session cleared) or `Network` (list emptied).
    pub async fn load_page(&self, page: u32) -> Result<LoadOutcome, ClientError> {
        let token = self.require_token()?;
        let id = self.posts.update_state(|p| p.begin_load(page));
        let result = self.api.list_posts(&token, page).await;
        let failure = result.as_ref().err().cloned();

        match self.posts.update_state(|p| p.finish_load(id, result)) {
            LoadOutcome::Applied => Ok(LoadOutcome::Applied),
            LoadOutcome::Stale => {
                log::debug!("dropping stale response for page {page}");
                Ok(LoadOutcome::Stale)
            }
            outcome => {
                let err = failure.unwrap_or_else(|| ClientError::Network(String::new()));
                if outcome == LoadOutcome::LoggedOut {
                    self.force_logout();
                }
                log::warn!("loading page {page} failed: {err}");
                Err(err)
            }
        }
    }

    /// Reload whatever page is current.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_page`].
    pub async fn refresh(&self) -> Result<LoadOutcome, ClientError> {
        let page = self.posts.with_state(|p| p.page);
        self.load_page(page).await
    }

    /// Navigate to `page` if it is within `1..=total_pages`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_page`].
    pub async fn set_page(&self, page: u32) -> Result<PageChange, ClientError> {
        if !self.posts.with_state(|p| p.accepts_page(page)) {
            return Ok(PageChange::Rejected);
        }
        self.load_page(page).await.map(PageChange::Loaded)
    }

    /// Create a post and put it at the head of the current page.
    ///
    /// # Errors
    ///
    /// `Validation` before any request, `Busy`, `Auth`, or `Network`.
    pub async fn create_post(&self, title: &str, content: &str) -> Result<Post, ClientError> {
        let body = self.checked(validate_post_fields(title, content))?;
        let (token, ticket) = self.begin_mutation(MutationKind::Create)?;
        let result = self.api.create_post(&token, &body).await;
        self.finish_mutation(ticket, result, |p, post| p.prepend(post.clone()))
    }

    /// Save edits to post `id` and replace it in place.
    ///
    /// # Errors
    ///
    /// `Validation` before any request, `Busy`, `Auth`, or `Network`.
    pub async fn update_post(&self, id: &str, title: &str, content: &str) -> Result<Post, ClientError> {
        let body = self.checked(validate_post_fields(title, content))?;
        let (token, ticket) = self.begin_mutation(MutationKind::Update)?;
        let result = self.api.update_post(&token, id, &body).await;
        self.finish_mutation(ticket, result, |p, post| {
            if !p.replace(post.clone()) {
                log::debug!("updated post {id} is not on the current page");
            }
        })
    }

    /// Delete post `id` once `confirm` agrees, then drop it from the page.
    ///
    /// `confirm` is not consulted while another mutation is in flight.
    ///
    /// # Errors
    ///
    /// `Busy`, `Auth`, or `Network`.
    pub async fn delete_post(&self, id: &str, confirm: impl FnOnce() -> bool) -> Result<DeleteOutcome, ClientError> {
        if self.posts.with_state(PostsState::is_mutating) {
            return Err(ClientError::Busy);
        }
        if !confirm() {
            return Ok(DeleteOutcome::Cancelled);
        }
        let (token, ticket) = self.begin_mutation(MutationKind::Delete)?;
        let result = self.api.delete_post(&token, id).await;
        self.finish_mutation(ticket, result, |p, _| {
            p.remove(id);
        })?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Submit the form: update when editing, create otherwise. Clears the draft on success.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_post`] / [`Self::update_post`]; the draft is kept.
    pub async fn submit_draft(&self, draft: &impl StateCell<DraftPost>) -> Result<Post, ClientError> {
        let snapshot = draft.with_state(DraftPost::clone);
        let post = match snapshot.editing.as_deref() {
            Some(id) => self.update_post(id, &snapshot.title, &snapshot.content).await?,
            None => self.create_post(&snapshot.title, &snapshot.content).await?,
        };
        draft.update_state(DraftPost::clear);
        Ok(post)
    }

    /// Clear the session and the cached page.
    pub fn logout(&self) {
        self.force_logout();
    }

    fn require_token(&self) -> Result<String, ClientError> {
        match self.session.with_state(|s| s.token().map(ToOwned::to_owned)) {
            Some(token) => Ok(token),
            None => {
                self.force_logout();
                Err(ClientError::Auth(SIGN_IN_REQUIRED.to_owned()))
            }
        }
    }

    fn begin_mutation(&self, kind: MutationKind) -> Result<(String, MutationTicket), ClientError> {
        let token = self.require_token()?;
        let ticket = self.posts.update_state(|p| p.begin_mutation(kind))?;
        Ok((token, ticket))
    }

    /// Release the slot and, on success, patch the cache with `apply`.
    ///
    /// A logout while the request was in flight voids `ticket`; the result is
    /// then handed back without touching the new session's state.
    fn finish_mutation<V>(
        &self,
        ticket: MutationTicket,
        result: Result<V, ClientError>,
        apply: impl FnOnce(&mut PostsState, &V),
    ) -> Result<V, ClientError> {
        if !self.posts.update_state(|p| p.end_mutation(ticket)) {
            log::debug!("session reset during mutation; cache left untouched");
            return result;
        }
        let value = self.checked(result)?;
        self.posts.update_state(|p| {
            apply(p, &value);
            p.clear_error();
        });
        Ok(value)
    }

    /// Record an error for the view (or log out on `Auth`) and pass the result on.
    fn checked<V>(&self, result: Result<V, ClientError>) -> Result<V, ClientError> {
        if let Err(err) = &result {
            if err.is_auth() {
                self.force_logout();
            } else if err.is_reportable() {
                self.posts.update_state(|p| p.set_error(err.to_string()));
            }
        }
        result
    }

    fn force_logout(&self) {
        self.session.update_state(Session::clear_token);
        self.posts.update_state(PostsState::reset);
    }
}
