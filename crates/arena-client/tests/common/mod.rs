//! Shared helpers for client integration tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::MockServer;

use arena_client::ApiClient;
use arena_core::Credential;
use arena_core::model::Principal;

pub const TOKEN: &str = "tok-valid";

pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri()).unwrap()
}

/// Client pointed at a port nothing listens on.
pub fn unreachable_client() -> ApiClient {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    ApiClient::new(&format!("http://127.0.0.1:{port}")).unwrap()
}

pub fn credential() -> Credential {
    Credential::new(TOKEN)
}

pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

pub fn principal_json(is_super_user: bool) -> Value {
    json!({
        "id": 1,
        "name": "alice",
        "tag": "#ALICE",
        "crowns": 120,
        "max_crowns": 250,
        "is_super_user": is_super_user
    })
}

pub fn principal(is_super_user: bool) -> Principal {
    serde_json::from_value(principal_json(is_super_user)).unwrap()
}

pub fn users_json() -> Value {
    json!([
        {"id": 2, "name": "bob", "crowns": 80, "max_crowns": 90},
        {"id": 3, "name": "carol", "crowns": 300, "max_crowns": 310}
    ])
}
