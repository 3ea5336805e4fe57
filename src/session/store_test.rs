//! Tests for the session store.

use tempfile::TempDir;

use crate::models::SessionUser;
use crate::session::{SessionError, SessionStore};

fn user() -> SessionUser {
    SessionUser {
        id: "12".to_string(),
        email: "organizer@uni.edu".to_string(),
        full_name: Some("Club Organizer".to_string()),
        role: Some("ORGANIZATION".to_string()),
    }
}

#[test]
fn in_memory_store_starts_logged_out() {
    let store = SessionStore::in_memory();
    assert!(store.token().is_none());
    assert!(!store.is_authenticated());
    assert!(store.path().is_none());
}

#[test]
fn login_and_logout_in_memory() {
    let store = SessionStore::in_memory();
    store.login("abc", Some(user())).unwrap();
    assert_eq!(store.token().as_deref(), Some("abc"));
    assert_eq!(store.user(), Some(user()));

    store.logout().unwrap();
    assert!(store.token().is_none());
    assert!(store.user().is_none());
}

#[test]
fn empty_token_counts_as_missing() {
    let store = SessionStore::with_token("");
    assert!(store.token().is_none());
}

#[test]
fn missing_file_is_an_empty_session() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::open(dir.path().join("session.json")).unwrap();
    assert!(store.token().is_none());
}

#[test]
fn login_persists_access_token_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/session.json");

    let store = SessionStore::open(&path).unwrap();
    store.login("persisted-token", Some(user())).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["access_token"], "persisted-token");
    assert_eq!(raw["user"]["email"], "organizer@uni.edu");

    let reopened = SessionStore::open(&path).unwrap();
    assert_eq!(reopened.token().as_deref(), Some("persisted-token"));
    assert_eq!(reopened.user(), Some(user()));
}

#[test]
fn logout_persists_empty_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let store = SessionStore::open(&path).unwrap();
    store.login("t", None).unwrap();
    store.logout().unwrap();

    let reopened = SessionStore::open(&path).unwrap();
    assert!(reopened.token().is_none());
}

#[test]
fn corrupt_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let result = SessionStore::open(&path);
    assert!(matches!(result, Err(SessionError::Corrupt { .. })));
}
