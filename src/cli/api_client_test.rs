use std::env;
use std::sync::Arc;

use serial_test::serial;

use super::*;
use crate::transport::MockTransport;

fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

#[test]
#[serial]
fn test_explicit_url_wins_over_env() {
    unsafe {
        env::set_var("AHUB_API_URL", "http://from-env:1234/api");
    }
    assert_eq!(
        resolve_base_url(Some("http://explicit:7777/api".to_string())),
        "http://explicit:7777/api"
    );
    unsafe {
        env::remove_var("AHUB_API_URL");
    }
}

#[test]
#[serial]
fn test_env_url_is_used() {
    unsafe {
        env::set_var("AHUB_API_URL", "http://from-env:1234/api");
    }
    assert_eq!(resolve_base_url(None), "http://from-env:1234/api");
    unsafe {
        env::remove_var("AHUB_API_URL");
    }
}

#[test]
#[serial]
fn test_default_url() {
    unsafe {
        env::remove_var("AHUB_API_URL");
    }
    assert_eq!(resolve_base_url(None), DEFAULT_API_URL);
}

#[test]
fn test_new_opens_session_file() {
    init_crypto();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let client = ApiClient::new(Some("http://custom:8080/api/".to_string()), Some(path.clone()))
        .unwrap();

    assert_eq!(client.base_url(), "http://custom:8080/api");
    assert_eq!(client.session().path(), Some(path.as_path()));
    assert!(!client.session().is_authenticated());
}

#[test]
fn test_url_joins_path() {
    let client = ApiClient::with_parts(
        "http://backend/api",
        Arc::new(SessionStore::in_memory()),
        Arc::new(MockTransport::new()),
    );
    assert_eq!(client.url("/activities"), "http://backend/api/activities");
}
