//! Arena REST API client.
//!
//! Uses reqwest to call the backend's user, subscription, battle record and
//! administration endpoints. The bearer credential is passed per call and
//! never stored on the client.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use arena_core::Credential;
use arena_core::model::{
    AggregatedBattleRecord, BattleRecord, Principal, Registration, SubscriptionEdge, UserId,
    UserSummary,
};

/// API client errors.
///
/// `Transport` means no response arrived; `Api` means the backend answered
/// and refused. Callers rely on that split to tell a flaky network from an
/// authoritative rejection.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not reach the server: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Server rejected the request ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Unexpected response from server: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of a backend rejection.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend answered with a 4xx, i.e. an authoritative "no".
    pub fn is_client_rejection(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Backend-supplied reason for a rejection.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Answer to `POST /admin/dump`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DumpReceipt {
    pub filename: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DumpList {
    Plain(Vec<String>),
    Wrapped { dumps: Vec<String> },
}

/// Arena REST API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given base URL (e.g. `http://localhost:8000/api/v1`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ApiError::Config("api_url is empty".into()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "api_url must start with http:// or https://, got {base_url}"
            )));
        }

        // Ensure a TLS crypto provider is installed (reqwest uses rustls-no-provider).
        // The `Err` case just means it was already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        // No request timeout: a dispatched request always runs to completion.
        let http = reqwest::Client::builder()
            .user_agent(concat!("arena/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// Build the full URL for an API path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        credential: Option<&Credential>,
    ) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match credential {
            Some(c) => builder.bearer_auth(c.expose()),
            None => builder,
        }
    }

    async fn send(
        builder: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> Result<Response, ApiError> {
        match builder.send().await {
            Ok(resp) => {
                debug!(%method, path, status = resp.status().as_u16(), "API response");
                Ok(resp)
            }
            Err(e) => {
                debug!(%method, path, error = %e, "API request failed");
                Err(ApiError::Transport(e))
            }
        }
    }

    /// Turn a non-expected response into `ApiError::Api` with the backend's reason.
    async fn reject(resp: Response) -> ApiError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        ApiError::Api {
            status: status.as_u16(),
            detail: extract_detail(status, &body),
        }
    }

    /// Require exactly `expected`, otherwise surface the backend's reason.
    async fn expect_status(resp: Response, expected: StatusCode) -> Result<Response, ApiError> {
        if resp.status() == expected {
            Ok(resp)
        } else {
            Err(Self::reject(resp).await)
        }
    }

    async fn expect_success(resp: Response) -> Result<Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(Self::reject(resp).await)
        }
    }

    async fn json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json().await.map_err(ApiError::Decode)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: &Credential,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path, Some(credential));
        let resp = Self::send(builder, &Method::GET, path).await?;
        let resp = Self::expect_status(resp, StatusCode::OK).await?;
        Self::json(resp).await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Register a new account. Succeeds only on `201 Created`.
    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let path = "/user/register";
        let builder = self.request(Method::POST, path, None).json(registration);
        let resp = Self::send(builder, &Method::POST, path).await?;
        Self::expect_status(resp, StatusCode::CREATED).await?;
        Ok(())
    }

    /// Exchange username and password for a bearer credential.
    pub async fn issue_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Credential, ApiError> {
        let path = "/user/token";
        let builder = self
            .request(Method::POST, path, None)
            .form(&[("username", username), ("password", password)]);
        let resp = Self::send(builder, &Method::POST, path).await?;
        let resp = Self::expect_status(resp, StatusCode::OK).await?;
        let token: TokenResponse = Self::json(resp).await?;
        Ok(Credential::new(token.access_token))
    }

    /// Resolve the credential to its principal (`GET /user/login`).
    pub async fn current_user(&self, credential: &Credential) -> Result<Principal, ApiError> {
        self.get_json("/user/login", credential).await
    }

    /// Every player except the caller.
    pub async fn list_users(&self, credential: &Credential) -> Result<Vec<UserSummary>, ApiError> {
        self.get_json("/user/get_all_except_self", credential).await
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Edges owned by the caller.
    pub async fn list_subscriptions(
        &self,
        credential: &Credential,
    ) -> Result<Vec<SubscriptionEdge>, ApiError> {
        self.get_json("/subscriptions/", credential).await
    }

    /// Follow `target`. Succeeds only on `201 Created`.
    pub async fn subscribe(&self, credential: &Credential, target: UserId) -> Result<(), ApiError> {
        let path = format!("/subscriptions/subscribe/{target}");
        let builder = self.request(Method::POST, &path, Some(credential));
        let resp = Self::send(builder, &Method::POST, &path).await?;
        Self::expect_status(resp, StatusCode::CREATED).await?;
        Ok(())
    }

    /// Unfollow `target`. Succeeds only on `200 OK`.
    pub async fn unsubscribe(
        &self,
        credential: &Credential,
        target: UserId,
    ) -> Result<(), ApiError> {
        let path = format!("/subscriptions/unsubscribe/{target}");
        let builder = self.request(Method::POST, &path, Some(credential));
        let resp = Self::send(builder, &Method::POST, &path).await?;
        Self::expect_status(resp, StatusCode::OK).await?;
        Ok(())
    }

    // =========================================================================
    // Battle records
    // =========================================================================

    pub async fn battle_records(
        &self,
        credential: &Credential,
    ) -> Result<Vec<BattleRecord>, ApiError> {
        self.get_json("/battle_records/", credential).await
    }

    pub async fn aggregated_battle_records(
        &self,
        credential: &Credential,
    ) -> Result<Vec<AggregatedBattleRecord>, ApiError> {
        self.get_json("/battle_records/aggregated", credential).await
    }

    // =========================================================================
    // Administration
    // =========================================================================

    pub(crate) async fn list_dumps(
        &self,
        credential: &Credential,
    ) -> Result<Vec<String>, ApiError> {
        let list: DumpList = self.get_json("/admin/dumps", credential).await?;
        Ok(match list {
            DumpList::Plain(names) | DumpList::Wrapped { dumps: names } => names,
        })
    }

    pub(crate) async fn create_dump(
        &self,
        credential: &Credential,
    ) -> Result<DumpReceipt, ApiError> {
        let path = "/admin/dump";
        let builder = self.request(Method::POST, path, Some(credential));
        let resp = Self::send(builder, &Method::POST, path).await?;
        let resp = Self::expect_success(resp).await?;
        Self::json(resp).await
    }

    pub(crate) async fn restore_dump(
        &self,
        credential: &Credential,
        filename: &str,
    ) -> Result<(), ApiError> {
        let path = "/admin/restore";
        let builder = self
            .request(Method::POST, path, Some(credential))
            .json(&serde_json::json!({ "filename": filename }));
        let resp = Self::send(builder, &Method::POST, path).await?;
        Self::expect_success(resp).await?;
        Ok(())
    }
}

/// Pull a human-readable reason out of an error body.
///
/// The backend answers `{"detail": "..."}`; validation failures carry a
/// structured `detail`, which is passed through as JSON text.
pub(crate) fn extract_detail(status: StatusCode, body: &str) -> String {
    let fallback = || status.canonical_reason().unwrap_or("Unknown error").to_string();
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            Some(serde_json::Value::Null) | None => fallback(),
            Some(other) => other.to_string(),
        },
        Ok(_) => fallback(),
        Err(_) => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                fallback()
            } else {
                trimmed.chars().take(200).collect()
            }
        }
    }
}
