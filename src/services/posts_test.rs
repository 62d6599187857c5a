use std::cell::{Cell, RefCell};
use std::sync::Arc;

use futures::executor::block_on;
use serde_json::{Value, json};

use super::*;
use crate::config::ApiConfig;
use crate::error::{DELETE_POST_FAILED, FETCH_POSTS_FAILED, POST_FIELDS_REQUIRED};
use crate::net::api::Method;
use crate::net::scripted::ScriptedTransport;
use crate::state::posts::LoadPhase;
use crate::state::session::MemoryTokenStore;

const TOKEN: &str = "abc.eyJ1c2VySWQiOiJ1MSJ9.sig";

struct Harness {
    api: ApiClient<ScriptedTransport>,
    store: MemoryTokenStore,
    session: RefCell<Session>,
    posts: RefCell<PostsState>,
}

impl Harness {
    fn signed_in() -> Self {
        Self::with_store(MemoryTokenStore::with_token(TOKEN))
    }

    fn signed_out() -> Self {
        Self::with_store(MemoryTokenStore::default())
    }

    fn with_store(store: MemoryTokenStore) -> Self {
        Self {
            api: ApiClient::new(ScriptedTransport::default(), ApiConfig::with_base_url("http://api.test")),
            session: RefCell::new(Session::open(Arc::new(store.clone()))),
            store,
            posts: RefCell::new(PostsState::default()),
        }
    }

    fn sync(&self) -> PostSync<'_, ScriptedTransport, RefCell<Session>, RefCell<PostsState>> {
        PostSync::new(&self.api, &self.session, &self.posts)
    }

    fn transport(&self) -> &ScriptedTransport {
        self.api.transport()
    }

    fn ids(&self) -> Vec<String> {
        self.posts.borrow().items.iter().map(|p| p.id.clone()).collect()
    }

    /// Load `ids` as page `page` of `total_pages`.
    fn seed(&self, ids: &[&str], page: u32, total_pages: u32) {
        self.transport().reply(200, page_body(ids, total_pages));
        let outcome = block_on(self.sync().load_page(page)).expect("seed load");
        assert_eq!(outcome, LoadOutcome::Applied);
    }
}

fn post_json(id: &str) -> Value {
    json!({ "_id": id, "title": format!("title {id}"), "content": "body", "author": { "_id": "u1", "name": "Alice" } })
}

fn page_body(ids: &[&str], total_pages: u32) -> Value {
    json!({ "posts": ids.iter().map(|id| post_json(id)).collect::<Vec<_>>(), "totalPages": total_pages })
}

#[test]
fn load_page_installs_items_and_total_pages() {
    let h = Harness::signed_in();
    let ids: Vec<String> = (1..=8).map(|i| format!("p{i}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    h.seed(&id_refs, 2, 3);

    let posts = h.posts.borrow();
    assert_eq!(posts.items.len(), 8);
    assert_eq!(posts.page, 2);
    assert_eq!(posts.total_pages, 3);
    assert_eq!(posts.phase, LoadPhase::Ready);
    drop(posts);

    let sent = h.transport().requests();
    assert_eq!(sent[0].url, "http://api.test/posts?page=2&limit=10");
    assert_eq!(sent[0].bearer.as_deref(), Some(TOKEN));
}

#[test]
fn set_page_out_of_range_is_a_no_op() {
    let h = Harness::signed_in();
    h.seed(&["a", "b"], 2, 3);
    let before = h.transport().request_count();

    assert_eq!(block_on(h.sync().set_page(4)), Ok(PageChange::Rejected));
    assert_eq!(block_on(h.sync().set_page(0)), Ok(PageChange::Rejected));

    assert_eq!(h.transport().request_count(), before);
    let posts = h.posts.borrow();
    assert_eq!(posts.page, 2);
    assert_eq!(posts.total_pages, 3);
    assert_eq!(posts.phase, LoadPhase::Ready);
    assert_eq!(posts.items.len(), 2);
}

#[test]
fn set_page_in_range_loads_that_page() {
    let h = Harness::signed_in();
    h.seed(&["a"], 1, 3);
    h.transport().reply(200, page_body(&["c"], 3));
    assert_eq!(block_on(h.sync().set_page(3)), Ok(PageChange::Loaded(LoadOutcome::Applied)));
    assert_eq!(h.posts.borrow().page, 3);
    assert_eq!(h.ids(), ["c"]);
}

#[test]
fn load_without_token_fails_auth_without_request() {
    let h = Harness::signed_out();
    let err = block_on(h.sync().load_page(1)).expect_err("no token");
    assert!(err.is_auth());
    assert_eq!(h.transport().request_count(), 0);
}

#[test]
fn load_401_clears_token_and_forces_logout() {
    let h = Harness::signed_in();
    h.seed(&["a"], 1, 2);
    h.transport().reply(401, json!({ "message": "jwt expired" }));

    let err = block_on(h.sync().set_page(2)).expect_err("401");
    assert!(err.is_auth());
    assert_eq!(h.session.borrow().token(), None);
    assert_eq!(h.store.persisted(), None);
    assert!(h.posts.borrow().items.is_empty());
    assert_eq!(h.posts.borrow().page, 1);
}

#[test]
fn load_network_failure_empties_list_and_keeps_session() {
    let h = Harness::signed_in();
    h.seed(&["a", "b"], 1, 2);
    h.transport().reply(500, json!({}));

    let err = block_on(h.sync().set_page(2)).expect_err("500");
    assert_eq!(err, ClientError::Network(FETCH_POSTS_FAILED.to_owned()));
    let posts = h.posts.borrow();
    assert!(posts.items.is_empty());
    assert_eq!(posts.phase, LoadPhase::Failed);
    assert_eq!(posts.error.as_deref(), Some(FETCH_POSTS_FAILED));
    assert_eq!(h.session.borrow().token(), Some(TOKEN));
}

#[test]
fn superseded_load_response_is_discarded() {
    let h = Harness::signed_in();
    let release_first = h.transport().reply_gated(200, page_body(&["old"], 9));
    h.transport().reply(200, page_body(&["new"], 2));
    let sync = h.sync();

    let (first, second, ()) = block_on(async {
        futures::join!(sync.load_page(1), sync.load_page(2), async {
            let _ = release_first.send(());
        })
    });

    assert_eq!(first, Ok(LoadOutcome::Stale));
    assert_eq!(second, Ok(LoadOutcome::Applied));
    assert_eq!(h.ids(), ["new"]);
    assert_eq!(h.posts.borrow().page, 2);
    assert_eq!(h.posts.borrow().total_pages, 2);
}

#[test]
fn create_validation_fails_before_network() {
    let h = Harness::signed_in();
    let err = block_on(h.sync().create_post("", "body")).expect_err("invalid");
    assert_eq!(err, ClientError::validation(POST_FIELDS_REQUIRED));
    assert_eq!(h.transport().request_count(), 0);
    assert_eq!(h.posts.borrow().error.as_deref(), Some(POST_FIELDS_REQUIRED));
}

#[test]
fn create_prepends_returned_post_once_and_keeps_page_counts() {
    let h = Harness::signed_in();
    h.seed(&["a", "b"], 2, 3);
    h.transport().reply(201, json!({ "post": post_json("n") }));

    let post = block_on(h.sync().create_post("New", "Body")).expect("created");
    assert_eq!(post.id, "n");
    assert_eq!(h.ids(), ["n", "a", "b"]);
    let posts = h.posts.borrow();
    assert_eq!(posts.page, 2);
    assert_eq!(posts.total_pages, 3);
    assert!(!posts.is_mutating());

    let sent = h.transport().requests();
    let last = sent.last().expect("request");
    assert_eq!(last.method, Method::Post);
    assert_eq!(last.body, Some(json!({ "title": "New", "content": "Body" })));
}

#[test]
fn create_rejection_surfaces_server_message_and_keeps_items() {
    let h = Harness::signed_in();
    h.seed(&["a"], 1, 1);
    h.transport().reply(400, json!({ "message": "Title too long" }));

    let err = block_on(h.sync().create_post("T", "C")).expect_err("rejected");
    assert_eq!(err, ClientError::Network("Title too long".to_owned()));
    assert_eq!(h.ids(), ["a"]);
    assert_eq!(h.posts.borrow().error.as_deref(), Some("Title too long"));
    assert!(!h.posts.borrow().is_mutating());
}

#[test]
fn mutation_401_forces_logout() {
    let h = Harness::signed_in();
    h.seed(&["a"], 1, 1);
    h.transport().reply(401, json!({}));
    let err = block_on(h.sync().update_post("a", "T", "C")).expect_err("401");
    assert!(err.is_auth());
    assert!(!h.session.borrow().is_authenticated());
    assert!(h.posts.borrow().items.is_empty());
}

#[test]
fn update_replaces_matching_item_in_place() {
    let h = Harness::signed_in();
    h.seed(&["a", "b", "c"], 1, 1);
    h.transport()
        .reply(200, json!({ "post": { "_id": "b", "title": "Edited", "content": "New body" } }));

    block_on(h.sync().update_post("b", "Edited", "New body")).expect("updated");
    assert_eq!(h.ids(), ["a", "b", "c"]);
    assert_eq!(h.posts.borrow().items[1].title, "Edited");
    let sent = h.transport().requests();
    assert_eq!(sent.last().map(|r| r.url.as_str()), Some("http://api.test/posts/b"));
}

#[test]
fn delete_declined_makes_no_request() {
    let h = Harness::signed_in();
    h.seed(&["a", "b"], 1, 1);
    let before = h.transport().request_count();
    let outcome = block_on(h.sync().delete_post("a", || false)).expect("cancelled");
    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert_eq!(h.transport().request_count(), before);
    assert_eq!(h.ids(), ["a", "b"]);
}

#[test]
fn delete_removes_only_that_item_and_keeps_total_pages() {
    let h = Harness::signed_in();
    h.seed(&["a", "b", "c"], 1, 4);
    h.transport().reply_empty(200);

    let outcome = block_on(h.sync().delete_post("b", || true)).expect("deleted");
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(h.ids(), ["a", "c"]);
    assert_eq!(h.posts.borrow().total_pages, 4);
}

#[test]
fn delete_failure_keeps_item_and_reports() {
    let h = Harness::signed_in();
    h.seed(&["a"], 1, 1);
    h.transport().reply(500, json!({}));
    let err = block_on(h.sync().delete_post("a", || true)).expect_err("failed");
    assert_eq!(err, ClientError::Network(DELETE_POST_FAILED.to_owned()));
    assert_eq!(h.ids(), ["a"]);
    assert_eq!(h.posts.borrow().error.as_deref(), Some(DELETE_POST_FAILED));
}

#[test]
fn second_mutation_while_one_is_outstanding_is_rejected() {
    let h = Harness::signed_in();
    h.seed(&["a"], 1, 1);
    let release = h.transport().reply_gated(201, json!({ "post": post_json("n") }));
    let asked = Cell::new(false);
    let sync = h.sync();

    let (created, deleted, ()) = block_on(async {
        futures::join!(
            sync.create_post("T", "C"),
            sync.delete_post("a", || {
                asked.set(true);
                true
            }),
            async {
                let _ = release.send(());
            }
        )
    });

    assert!(created.is_ok());
    assert_eq!(deleted, Err(ClientError::Busy));
    assert!(!asked.get());
    assert_eq!(h.transport().request_count(), 2);
    assert_eq!(h.ids(), ["n", "a"]);
    assert_eq!(h.posts.borrow().error, None);
}

#[test]
fn submit_draft_creates_then_clears_draft() {
    let h = Harness::signed_in();
    h.seed(&["a"], 1, 1);
    h.transport().reply(201, json!({ "post": post_json("n") }));
    let draft = RefCell::new(DraftPost { title: "T".to_owned(), content: "C".to_owned(), editing: None });

    block_on(h.sync().submit_draft(&draft)).expect("submitted");
    assert_eq!(*draft.borrow(), DraftPost::default());
    assert_eq!(h.ids(), ["n", "a"]);
}

#[test]
fn submit_draft_in_edit_mode_updates_target() {
    let h = Harness::signed_in();
    h.seed(&["a", "b"], 1, 1);
    h.transport().reply(200, json!({ "post": { "_id": "a", "title": "T2", "content": "C2" } }));
    let draft = RefCell::new(DraftPost { title: "T2".to_owned(), content: "C2".to_owned(), editing: Some("a".to_owned()) });

    block_on(h.sync().submit_draft(&draft)).expect("submitted");
    assert!(!draft.borrow().is_editing());
    assert_eq!(h.posts.borrow().items[0].title, "T2");
    let sent = h.transport().requests();
    assert_eq!(sent.last().map(|r| r.method), Some(Method::Put));
}

#[test]
fn submit_draft_failure_keeps_draft() {
    let h = Harness::signed_in();
    let draft = RefCell::new(DraftPost { title: "T".to_owned(), content: String::new(), editing: None });
    assert!(block_on(h.sync().submit_draft(&draft)).is_err());
    assert_eq!(draft.borrow().title, "T");
}

#[test]
fn logout_clears_session_and_page() {
    let h = Harness::signed_in();
    h.seed(&["a"], 1, 2);
    h.sync().logout();
    assert!(!h.session.borrow().is_authenticated());
    assert_eq!(h.store.persisted(), None);
    assert!(h.posts.borrow().items.is_empty());
    assert_eq!(h.posts.borrow().total_pages, 1);
}

#[test]
fn refresh_reloads_current_page() {
    let h = Harness::signed_in();
    h.seed(&["a"], 2, 2);
    h.transport().reply(200, page_body(&["z"], 2));
    assert_eq!(block_on(h.sync().refresh()), Ok(LoadOutcome::Applied));
    let sent = h.transport().requests();
    assert_eq!(sent.last().map(|r| r.url.as_str()), Some("http://api.test/posts?page=2&limit=10"));
    assert_eq!(h.ids(), ["z"]);
}

#[test]
fn delete_401_forces_logout() {
    let h = Harness::signed_in();
    h.seed(&["a", "b"], 1, 1);
    h.transport().reply(401, json!({ "message": "jwt expired" }));

    let err = block_on(h.sync().delete_post("a", || true)).expect_err("401");
    assert!(err.is_auth());
    assert!(!h.session.borrow().is_authenticated());
    assert_eq!(h.store.persisted(), None);
    assert!(h.posts.borrow().items.is_empty());
}

#[test]
fn create_accepts_post_with_bare_author_id() {
    let h = Harness::signed_in();
    h.seed(&["a"], 1, 1);
    h.transport().reply(201, json!({ "post": { "_id": "n", "title": "T", "content": "C", "author": "u1" } }));

    let post = block_on(h.sync().create_post("T", "C")).expect("created");
    assert_eq!(h.ids(), ["n", "a"]);
    assert!(h.session.borrow().can_modify(&post));
    assert_eq!(h.posts.borrow().error, None);
}

#[test]
fn mutation_finishing_after_forced_logout_leaves_cache_alone() {
    let h = Harness::signed_in();
    h.seed(&["a"], 1, 2);
    let release = h.transport().reply_gated(201, json!({ "post": post_json("n") }));
    h.transport().reply(401, json!({}));
    let sync = h.sync();

    let (created, loaded, ()) = block_on(async {
        futures::join!(sync.create_post("T", "C"), sync.set_page(2), async {
            let _ = release.send(());
        })
    });

    assert!(created.is_ok());
    assert!(loaded.expect_err("401").is_auth());
    assert!(!h.session.borrow().is_authenticated());
    assert!(h.ids().is_empty());
    let posts = h.posts.borrow();
    assert!(!posts.is_mutating());
    assert_eq!(posts.page, 1);
    assert_eq!(posts.error, None);
}
