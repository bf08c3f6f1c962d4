//! The session store.
//!
//! One `SessionStore` exists per running client. It owns the bearer token
//! and the identity derived from it, and it is the only writer of the
//! persisted token. Handles are cheap to clone; all clones observe the same
//! session. No lock is held across an await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::watch;

use upskeel_auth::{Identity, Role, TokenError, decode_token_payload};
use upskeel_client::{ApiClient, ApiError};

use crate::token_store::{StorageError, TokenStore};

/// Immutable view of the session published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    identity: Option<Identity>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn roles(&self) -> &[Role] {
        self.identity
            .as_ref()
            .map(|identity| identity.roles.as_slice())
            .unwrap_or(&[])
    }
}

/// Error surface of the session store.
///
/// Every variant leaves the store in a fully consistent state: the worst
/// case is "stay logged out" or "stay on the previous session".
#[derive(Debug, Error)]
pub enum SessionError {
    /// Login rejected by the credential-exchange endpoint.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A token (fresh or persisted) failed to decode or carried no roles.
    #[error("invalid session token: {0}")]
    InvalidToken(#[from] TokenError),

    /// Credential exchange could not complete. Retryable.
    #[error("login request failed: {0}")]
    Network(String),

    /// Token persistence failed; the prior session is intact.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A newer login or logout completed first; this result was discarded.
    #[error("login superseded by a newer session change")]
    Superseded,
}

#[derive(Debug, Clone)]
struct ActiveSession {
    token: String,
    identity: Identity,
}

struct Inner {
    session: Option<ActiveSession>,
    /// Bumped on every committed mutation; an in-flight login whose sampled
    /// generation no longer matches is discarded instead of applied.
    generation: u64,
}

/// Process-wide session state with an explicit lifecycle: hydrated from
/// storage at startup, mutated only through [`login`](SessionStore::login),
/// [`apply_token`](SessionStore::apply_token) and
/// [`logout`](SessionStore::logout).
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
    storage: Arc<dyn TokenStore>,
    tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionStore {
    /// Create a logged-out store over the given token storage.
    pub fn new(storage: impl TokenStore + 'static) -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        Self {
            inner: Arc::new(Mutex::new(Inner {
                session: None,
                generation: 0,
            })),
            storage: Arc::new(storage),
            tx: Arc::new(tx),
        }
    }

    /// Restore a previously persisted session, if any.
    ///
    /// A corrupt or expired persisted token is discarded so hydration does
    /// not fail the same way on every startup. Only a storage read failure
    /// is an error.
    pub fn restore(storage: impl TokenStore + 'static) -> Result<Self, SessionError> {
        let store = Self::new(storage);

        let Some(token) = store.storage.load()? else {
            tracing::debug!("no persisted token; starting logged out");
            return Ok(store);
        };

        match derive_identity(&token) {
            Ok(identity) => {
                tracing::info!(email = %identity.email, "session restored from persisted token");
                let mut inner = store.lock();
                inner.session = Some(ActiveSession { token, identity });
                inner.generation += 1;
                store.publish(&inner);
                drop(inner);
            }
            Err(err) => {
                tracing::warn!(error = %err, "discarding unusable persisted token");
                if let Err(clear_err) = store.storage.clear() {
                    tracing::warn!(error = %clear_err, "failed to discard persisted token");
                }
            }
        }

        Ok(store)
    }

    /// Exchange credentials for a token and establish the session.
    ///
    /// While the exchange is in flight the session stays in its prior
    /// state. If a logout or another login commits first, this result is
    /// discarded with [`SessionError::Superseded`] rather than applied.
    pub async fn login(
        &self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<Identity, SessionError> {
        let started_at = self.lock().generation;

        let token = api
            .login(email, password)
            .await
            .map_err(map_exchange_error)?;

        self.apply_token_at(token, started_at)
    }

    /// Apply an externally issued token (e.g. from a signup flow that
    /// returns one directly).
    pub fn apply_token(&self, token: impl Into<String>) -> Result<Identity, SessionError> {
        let generation = self.lock().generation;
        self.apply_token_at(token.into(), generation)
    }

    /// Clear the persisted token and in-memory identity unconditionally.
    ///
    /// Idempotent, and never blocked by the network. A storage failure is
    /// logged and the in-memory teardown still proceeds.
    pub fn logout(&self) {
        if let Err(err) = self.storage.clear() {
            tracing::warn!(error = %err, "failed to clear persisted token");
        }

        let mut inner = self.lock();
        let was_logged_in = inner.session.take().is_some();
        inner.generation += 1;
        self.publish(&inner);
        drop(inner);

        if was_logged_in {
            tracing::info!("session cleared");
        }
    }

    /// Current role set; empty when logged out. Pure read.
    pub fn current_roles(&self) -> Vec<Role> {
        self.lock()
            .session
            .as_ref()
            .map(|session| session.identity.roles.clone())
            .unwrap_or_default()
    }

    /// Whether a valid session exists. Pure read.
    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_some()
    }

    /// Snapshot of the derived identity, if logged in.
    pub fn identity(&self) -> Option<Identity> {
        self.lock()
            .session
            .as_ref()
            .map(|session| session.identity.clone())
    }

    /// The current bearer token, for collaborators attaching it to
    /// outgoing requests. Only this store ever writes the persisted copy.
    pub fn token(&self) -> Option<String> {
        self.lock()
            .session
            .as_ref()
            .map(|session| session.token.clone())
    }

    /// Subscribe to session changes. The receiver observes an immutable
    /// snapshot; views re-read it whenever it changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    fn apply_token_at(
        &self,
        token: String,
        expected_generation: u64,
    ) -> Result<Identity, SessionError> {
        // Decode before taking the lock or touching storage: an invalid
        // token must leave the store unauthenticated with nothing persisted.
        let identity = derive_identity(&token)?;

        let mut inner = self.lock();
        if inner.generation != expected_generation {
            tracing::debug!("discarding stale login completion");
            return Err(SessionError::Superseded);
        }

        // Persist first: a storage failure leaves the prior session intact.
        self.storage.save(&token)?;

        inner.session = Some(ActiveSession {
            token,
            identity: identity.clone(),
        });
        inner.generation += 1;
        self.publish(&inner);
        drop(inner);

        tracing::info!(email = %identity.email, roles = ?identity.roles, "session established");
        Ok(identity)
    }

    fn publish(&self, inner: &Inner) {
        self.tx.send_replace(SessionSnapshot {
            identity: inner
                .session
                .as_ref()
                .map(|session| session.identity.clone()),
        });
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn derive_identity(token: &str) -> Result<Identity, TokenError> {
    let claims = decode_token_payload(token)?;
    Identity::from_claims(&claims, Utc::now())
}

fn map_exchange_error(err: ApiError) -> SessionError {
    match err {
        ApiError::Api {
            status: 400 | 401 | 403,
            ..
        } => SessionError::InvalidCredentials,
        ApiError::Api { status, message } => {
            SessionError::Network(format!("login endpoint returned {status}: {message}"))
        }
        ApiError::Network(msg) | ApiError::Parse(msg) => SessionError::Network(msg),
    }
}
