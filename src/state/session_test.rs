use super::*;
use crate::net::types::Author;

const SAMPLE_TOKEN: &str = "abc.eyJ1c2VySWQiOiJ1MSJ9.sig";

fn post_by(author_id: Option<&str>) -> Post {
    Post {
        id: "p1".to_owned(),
        title: "t".to_owned(),
        content: "c".to_owned(),
        author: author_id.map(|id| Author { id: id.to_owned(), name: "A".to_owned() }),
    }
}

#[test]
fn open_without_persisted_token_is_logged_out() {
    let session = Session::open(Arc::new(MemoryTokenStore::default()));
    assert_eq!(session.token(), None);
    assert_eq!(session.status(), SessionStatus::LoggedOut);
    assert_eq!(session.user_id(), None);
}

#[test]
fn open_restores_persisted_token() {
    let session = Session::open(Arc::new(MemoryTokenStore::with_token(SAMPLE_TOKEN)));
    assert_eq!(session.token(), Some(SAMPLE_TOKEN));
    assert!(session.is_authenticated());
    assert_eq!(session.user_id().as_deref(), Some("u1"));
}

#[test]
fn open_treats_empty_persisted_token_as_absent() {
    let session = Session::open(Arc::new(MemoryTokenStore::with_token("")));
    assert!(!session.is_authenticated());
}

#[test]
fn set_and_clear_token_write_through_to_store() {
    let store = MemoryTokenStore::default();
    let mut session = Session::open(Arc::new(store.clone()));

    session.set_token(SAMPLE_TOKEN);
    assert_eq!(store.persisted().as_deref(), Some(SAMPLE_TOKEN));
    assert_eq!(session.token(), Some(SAMPLE_TOKEN));

    session.clear_token();
    assert_eq!(store.persisted(), None);
    assert_eq!(session.token(), None);
}

#[test]
fn malformed_token_is_authenticated_but_has_no_identity() {
    let mut session = Session::open(Arc::new(MemoryTokenStore::default()));
    session.set_token("not-a-jwt");
    assert!(session.is_authenticated());
    assert_eq!(session.claims(), None);
    assert_eq!(session.user_email(), None);
    assert!(!session.can_modify(&post_by(Some("u1"))));
}

#[test]
fn can_modify_only_own_posts() {
    let session = Session::open(Arc::new(MemoryTokenStore::with_token(SAMPLE_TOKEN)));
    assert!(session.can_modify(&post_by(Some("u1"))));
    assert!(!session.can_modify(&post_by(Some("u2"))));
    assert!(!session.can_modify(&post_by(None)));
}

#[test]
fn debug_output_does_not_leak_token() {
    let session = Session::open(Arc::new(MemoryTokenStore::with_token(SAMPLE_TOKEN)));
    let rendered = format!("{session:?}");
    assert!(!rendered.contains(SAMPLE_TOKEN));
    assert!(rendered.contains("LoggedIn"));
}
