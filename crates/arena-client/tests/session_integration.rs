//! Session lifecycle over real and in-memory credential stores.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use arena_client::{AuthGateway, LoginError, Resolution, Session, SessionState};
use arena_core::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};

use common::{TOKEN, client_for, principal_json, unreachable_client};

async fn mount_login_response(server: &MockServer, status: u16) {
    let template = if status == 200 {
        ResponseTemplate::new(200).set_body_json(principal_json(false))
    } else {
        ResponseTemplate::new(status)
            .set_body_json(json!({"detail": "Could not validate credentials"}))
    };
    Mock::given(method("GET"))
        .and(path("/user/login"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolve_without_credential_is_anonymous_and_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = Session::new(
        MemoryCredentialStore::new(),
        AuthGateway::new(client_for(&server)),
    );
    assert_eq!(session.state().unwrap(), SessionState::Absent);
    assert!(matches!(session.resolve().await.unwrap(), Resolution::Anonymous));
}

#[tokio::test]
async fn resolve_valid_credential_authenticates() {
    let server = MockServer::start().await;
    mount_login_response(&server, 200).await;

    let mut session = Session::new(
        MemoryCredentialStore::with_credential(Credential::new(TOKEN)),
        AuthGateway::new(client_for(&server)),
    );
    let resolution = session.resolve().await.unwrap();
    assert_eq!(resolution.principal().unwrap().name, "alice");
    assert_eq!(session.state().unwrap(), SessionState::Valid);
}

#[tokio::test]
async fn rejected_credential_moves_session_to_absent() {
    let server = MockServer::start().await;
    mount_login_response(&server, 401).await;

    let mut session = Session::new(
        MemoryCredentialStore::with_credential(Credential::new("stale")),
        AuthGateway::new(client_for(&server)),
    );
    assert!(matches!(session.resolve().await.unwrap(), Resolution::Expired));
    assert_eq!(session.state().unwrap(), SessionState::Absent);
    assert!(session.store().get().unwrap().is_none());
}

#[tokio::test]
async fn unreachable_backend_keeps_session_valid() {
    let mut session = Session::new(
        MemoryCredentialStore::with_credential(Credential::new(TOKEN)),
        AuthGateway::new(unreachable_client()),
    );
    assert!(matches!(
        session.resolve().await.unwrap(),
        Resolution::Unavailable(_)
    ));
    assert_eq!(session.state().unwrap(), SessionState::Valid);
    assert_eq!(
        session.store().get().unwrap(),
        Some(Credential::new(TOKEN))
    );
}

#[tokio::test]
async fn server_fault_on_verification_ends_session() {
    let server = MockServer::start().await;
    mount_login_response(&server, 503).await;

    let mut session = Session::new(
        MemoryCredentialStore::with_credential(Credential::new(TOKEN)),
        AuthGateway::new(client_for(&server)),
    );
    assert!(matches!(session.resolve().await.unwrap(), Resolution::Expired));
    assert_eq!(session.state().unwrap(), SessionState::Absent);
    assert!(session.store().get().unwrap().is_none());
}

#[tokio::test]
async fn wrong_password_persists_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("credentials.json");
    let mut session = Session::new(
        FileCredentialStore::new(&store_path),
        AuthGateway::new(client_for(&server)),
    );
    let err = session.login("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, LoginError::InvalidCredentials));
    assert_eq!(session.state().unwrap(), SessionState::Absent);
    assert!(!store_path.exists());
}

#[tokio::test]
async fn login_persists_across_reload_and_logout_clears() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": TOKEN})))
        .mount(&server)
        .await;
    mount_login_response(&server, 200).await;

    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("credentials.json");

    let mut session = Session::new(
        FileCredentialStore::new(&store_path),
        AuthGateway::new(client_for(&server)),
    );
    session.login("alice", "hunter2").await.unwrap();
    drop(session);

    // Reload: a brand-new session over the same file.
    let mut session = Session::new(
        FileCredentialStore::new(&store_path),
        AuthGateway::new(client_for(&server)),
    );
    assert!(matches!(
        session.resolve().await.unwrap(),
        Resolution::Authenticated { .. }
    ));
    session.logout().unwrap();
    drop(session);

    let mut session = Session::new(
        FileCredentialStore::new(&store_path),
        AuthGateway::new(client_for(&server)),
    );
    assert!(matches!(session.resolve().await.unwrap(), Resolution::Anonymous));
}
