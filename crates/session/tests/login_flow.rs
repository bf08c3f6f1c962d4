//! Black-box login flow against a stub credential-exchange endpoint.

use std::time::Duration;

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use upskeel_client::ApiClient;
use upskeel_session::{MemoryTokenStore, SessionError, SessionStore, TokenStore};

struct StubApi {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl StubApi {
    async fn spawn(router: Router) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            handle,
        })
    }
}

impl Drop for StubApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

fn mint_token(roles: &[&str]) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({
            "fullName": "Grace Hopper",
            "email": "grace@example.com",
            "roles": roles,
            "exp": (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp(),
        }),
        &jsonwebtoken::EncodingKey::from_secret(b"stub-secret"),
    )
    .expect("failed to encode token")
}

async fn login_handler(Json(body): Json<LoginBody>) -> axum::response::Response {
    if body.email == "grace@example.com" && body.password == "correct-horse" {
        Json(json!({ "token": mint_token(&["Student"]) })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn slow_login_handler(body: Json<LoginBody>) -> axum::response::Response {
    tokio::time::sleep(Duration::from_millis(300)).await;
    login_handler(body).await
}

#[tokio::test]
async fn login_establishes_and_persists_a_session() -> Result<()> {
    upskeel_observability::init();
    let srv = StubApi::spawn(Router::new().route("/auth/login", post(login_handler))).await?;
    let api = ApiClient::new(&srv.base_url);

    let storage = MemoryTokenStore::new();
    let probe = storage.clone();
    let store = SessionStore::restore(storage)?;
    assert!(!store.is_authenticated());

    let identity = store
        .login(&api, "grace@example.com", "correct-horse")
        .await?;

    assert_eq!(identity.full_name, "Grace Hopper");
    assert!(store.is_authenticated());
    assert_eq!(store.current_roles().len(), 1);

    // The token is persisted and readable by collaborators through the store.
    let persisted = probe.load()?;
    assert!(persisted.is_some());
    assert_eq!(store.token(), persisted);

    Ok(())
}

#[tokio::test]
async fn rejected_credentials_leave_the_store_unauthenticated() -> Result<()> {
    let srv = StubApi::spawn(Router::new().route("/auth/login", post(login_handler))).await?;
    let api = ApiClient::new(&srv.base_url);

    let storage = MemoryTokenStore::new();
    let probe = storage.clone();
    let store = SessionStore::new(storage);

    let err = store
        .login(&api, "grace@example.com", "wrong-password")
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::InvalidCredentials));
    assert!(!store.is_authenticated());
    assert_eq!(probe.load()?, None);

    Ok(())
}

#[tokio::test]
async fn unreachable_endpoint_is_a_retryable_network_error() {
    // Nothing listens here; the exchange cannot complete.
    let api = ApiClient::new("http://127.0.0.1:9");
    let store = SessionStore::new(MemoryTokenStore::new());

    let err = store.login(&api, "a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, SessionError::Network(_)));
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn stale_login_is_discarded_after_logout() -> Result<()> {
    let srv = StubApi::spawn(Router::new().route("/auth/login", post(slow_login_handler))).await?;
    let api = ApiClient::new(&srv.base_url);

    let storage = MemoryTokenStore::new();
    let probe = storage.clone();
    let store = SessionStore::new(storage);

    let in_flight = {
        let store = store.clone();
        let api = api.clone();
        tokio::spawn(async move { store.login(&api, "grace@example.com", "correct-horse").await })
    };

    // Let the request reach the stub, then log out before it completes.
    tokio::time::sleep(Duration::from_millis(50)).await;
    store.logout();

    let result = in_flight.await?;
    assert!(matches!(result, Err(SessionError::Superseded)));

    // The stale completion must not resurrect the session.
    assert!(!store.is_authenticated());
    assert_eq!(probe.load()?, None);

    Ok(())
}

#[tokio::test]
async fn relogin_replaces_the_previous_session() -> Result<()> {
    let srv = StubApi::spawn(Router::new().route("/auth/login", post(login_handler))).await?;
    let api = ApiClient::new(&srv.base_url);

    let store = SessionStore::new(MemoryTokenStore::new());
    store.apply_token(mint_token(&["Instructor"]))?;

    let identity = store
        .login(&api, "grace@example.com", "correct-horse")
        .await?;

    assert_eq!(identity.roles.len(), 1);
    assert_eq!(store.current_roles()[0].as_str(), "Student");

    Ok(())
}
