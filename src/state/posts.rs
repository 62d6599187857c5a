//! Cached page of posts and its load/mutation bookkeeping.
//!
//! DESIGN
//! ======
//! Successful loads replace the page wholesale. Successful mutations edit the
//! cached items in place (prepend, replace, remove) without re-fetching, so
//! `total_pages` and page fill can drift from the server until the next load.
//! That drift is accepted; it keeps the list responsive.
//!
//! A failed load empties the list instead of leaving possibly stale or
//! unauthorized content on screen.

#[cfg(test)]
#[path = "posts_test.rs"]
mod posts_test;

use super::request::{LatestOnly, RequestId};
use crate::error::ClientError;
use crate::net::types::{Post, PostsPage};

/// Per-load lifecycle: `Idle -> Loading -> {Ready, Failed}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

/// Claim on the mutation slot, valid until the next [`PostsState::reset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MutationTicket(u64);

/// What happened to a load response when it came back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was installed.
    Applied,
    /// A newer load superseded this one; the response was dropped.
    Stale,
    /// The load failed; the list was emptied and an error recorded.
    Failed,
    /// The server rejected the token; the caller must re-authenticate.
    LoggedOut,
}

#[derive(Clone, Debug)]
pub struct PostsState {
    pub items: Vec<Post>,
    /// 1-based page currently shown (or being loaded).
    pub page: u32,
    pub total_pages: u32,
    pub phase: LoadPhase,
    pub error: Option<String>,
    /// The mutation in flight, if any. Only one runs at a time.
    pub pending_mutation: Option<MutationKind>,
    loads: LatestOnly,
    /// Bumped by `reset`; tickets from an older generation are void.
    generation: u64,
}

impl Default for PostsState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 1,
            phase: LoadPhase::Idle,
            error: None,
            pending_mutation: None,
            loads: LatestOnly::default(),
            generation: 0,
        }
    }
}

impl PostsState {
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn is_mutating(&self) -> bool {
        self.pending_mutation.is_some()
    }

    /// Whether `page` is a valid navigation target (`1..=total_pages`).
    pub fn accepts_page(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Enter `Loading` for `page`, superseding any load still in flight.
    pub fn begin_load(&mut self, page: u32) -> RequestId {
        self.page = page;
        self.phase = LoadPhase::Loading;
        self.error = None;
        self.loads.begin()
    }

    /// Apply the response for load `id`. Responses for superseded ids are ignored.
    pub fn finish_load(&mut self, id: RequestId, result: Result<PostsPage, ClientError>) -> LoadOutcome {
        if !self.loads.finish_if_active(id) {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(page) => {
                self.items = page.posts;
                self.total_pages = page.total_pages.max(1);
                self.phase = LoadPhase::Ready;
                LoadOutcome::Applied
            }
            Err(err) => {
                self.items.clear();
                self.phase = LoadPhase::Failed;
                self.error = Some(err.to_string());
                if err.is_auth() { LoadOutcome::LoggedOut } else { LoadOutcome::Failed }
            }
        }
    }

    /// Claim the single mutation slot.
    ///
    /// # Errors
    ///
    /// `ClientError::Busy` when another mutation is still outstanding.
    pub fn begin_mutation(&mut self, kind: MutationKind) -> Result<MutationTicket, ClientError> {
        if self.pending_mutation.is_some() {
            return Err(ClientError::Busy);
        }
        self.pending_mutation = Some(kind);
        Ok(MutationTicket(self.generation))
    }

    /// Release the slot held by `ticket`. Returns false, touching nothing,
    /// when a reset happened since the ticket was issued; the caller must
    /// then leave the cache alone.
    pub fn end_mutation(&mut self, ticket: MutationTicket) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.pending_mutation = None;
        true
    }

    /// Put a freshly created post at the head of the page.
    pub fn prepend(&mut self, post: Post) {
        self.items.retain(|p| p.id != post.id);
        self.items.insert(0, post);
    }

    /// Swap in the server's copy of an edited post. Returns false if it is not on this page.
    pub fn replace(&mut self, post: Post) -> bool {
        match self.items.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                *slot = post;
                true
            }
            None => false,
        }
    }

    /// Drop the post with `id` from the page. `total_pages` is left alone.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != id);
        self.items.len() != before
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Back to a fresh page 1, voiding any in-flight load or mutation.
    pub fn reset(&mut self) {
        let mut loads = std::mem::take(&mut self.loads);
        loads.cancel();
        let generation = self.generation + 1;
        *self = Self { loads, generation, ..Self::default() };
    }
}
