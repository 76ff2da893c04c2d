// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle: restore from storage, login, register, logout.
//!
//! Storage writes always complete before the in-memory state changes, and
//! the in-memory state changes before an operation returns. A 401 seen by
//! the gateway on any request purges storage; the manager notices through
//! the gateway's invalidation counter the next time its state is read.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};

use crate::error::ClientError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::services::gateway::Gateway;
use crate::storage::{keys, CredentialStore};

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Loading,
    Unauthenticated,
    Authenticated,
}

/// Snapshot of the client's belief about the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Session {
    /// State before the initial storage read.
    pub fn loading() -> Self {
        Self {
            user: None,
            token: None,
            is_authenticated: false,
            is_loading: true,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            is_loading: false,
            ..Self::loading()
        }
    }

    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            is_loading: false,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.is_loading {
            SessionState::Loading
        } else if self.is_authenticated {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }
}

/// Outcome of login/register, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Owns the token lifecycle for one client process.
pub struct SessionManager {
    gateway: Gateway,
    store: Arc<dyn CredentialStore>,
    session: RwLock<Session>,
    invalidations: Mutex<watch::Receiver<u64>>,
}

impl SessionManager {
    /// Create a manager in the `Loading` state. Call [`restore`](Self::restore)
    /// before use.
    pub fn new(gateway: Gateway, store: Arc<dyn CredentialStore>) -> Self {
        let invalidations = gateway.subscribe_invalidations();
        Self {
            gateway,
            store,
            session: RwLock::new(Session::loading()),
            invalidations: Mutex::new(invalidations),
        }
    }

    /// Create a manager sharing the gateway's credential store and restore it.
    pub async fn start(gateway: Gateway) -> Self {
        let store = gateway.store().clone();
        let manager = Self::new(gateway, store);
        manager.restore().await;
        manager
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Load credentials from storage. The stored token is trusted as-is;
    /// it is not re-validated against the server.
    pub async fn restore(&self) -> SessionState {
        // Purges from before this point are already reflected in storage.
        self.invalidations.lock().await.borrow_and_update();

        let token = self.store.get(keys::AUTH_TOKEN).await;
        let user_data = self.store.get(keys::USER_DATA).await;

        let restored = match (token, user_data) {
            (Some(token), Some(user_data)) => match serde_json::from_str::<User>(&user_data) {
                Ok(user) => {
                    tracing::info!(user_id = user.id, "Session restored from storage");
                    Session::authenticated(user, token)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Stored user record is corrupt, clearing credentials");
                    if let Err(e) = self.store.clear_credentials().await {
                        tracing::error!(error = %e, "Failed to clear corrupt credentials");
                    }
                    Session::unauthenticated()
                }
            },
            _ => Session::unauthenticated(),
        };

        let state = restored.state();
        *self.session.write().await = restored;
        state
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult {
        let body = LoginRequest { email, password };
        self.authenticate(LOGIN_PATH, &body, "Login failed").await
    }

    /// Create an account and log in.
    pub async fn register(&self, email: &str, username: &str, password: &str) -> AuthResult {
        let body = RegisterRequest {
            email,
            username,
            password,
        };
        self.authenticate(REGISTER_PATH, &body, "Registration failed")
            .await
    }

    /// Clear stored credentials and reset to unauthenticated. Never fails;
    /// storage errors are logged.
    pub async fn logout(&self) {
        if let Err(e) = self.store.clear_credentials().await {
            tracing::error!(error = %e, "Failed to clear credentials on logout");
        }
        *self.session.write().await = Session::unauthenticated();
        tracing::info!("Logged out");
    }

    /// Current session snapshot.
    pub async fn session(&self) -> Session {
        self.sync_invalidations().await;
        self.session.read().await.clone()
    }

    pub async fn state(&self) -> SessionState {
        self.session().await.state()
    }

    pub async fn user(&self) -> Option<User> {
        self.session().await.user
    }

    pub async fn token(&self) -> Option<String> {
        self.session().await.token
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session().await.is_authenticated
    }

    async fn authenticate<B: Serialize>(&self, path: &str, body: &B, fallback: &str) -> AuthResult {
        let response: AuthResponse = match self.gateway.post_json(path, body).await {
            Ok(response) => response,
            Err(e) => {
                tracing::info!(path, error = %e, "Authentication request failed");
                return AuthResult::failed(display_message(&e, fallback));
            }
        };

        let (token, user) = response.into_parts();

        if let Err(e) = self.persist(&token, &user).await {
            tracing::error!(error = %e, "Failed to persist credentials");
            return AuthResult::failed(display_message(&e, fallback));
        }

        tracing::info!(user_id = user.id, "Authenticated");
        // Purges that happened before these credentials were written are stale.
        self.invalidations.lock().await.borrow_and_update();
        *self.session.write().await = Session::authenticated(user, token);
        AuthResult::ok()
    }

    async fn persist(&self, token: &str, user: &User) -> Result<(), ClientError> {
        let user_data = serde_json::to_string(user)
            .map_err(|e| ClientError::Storage(format!("Failed to serialize user: {}", e)))?;
        self.store.set(keys::AUTH_TOKEN, token).await?;
        self.store.set(keys::USER_DATA, &user_data).await
    }

    /// Drop the in-memory session if the gateway purged credentials since
    /// we last looked.
    async fn sync_invalidations(&self) {
        let changed = {
            let mut rx = self.invalidations.lock().await;
            let changed = rx.has_changed().unwrap_or(false);
            if changed {
                rx.borrow_and_update();
            }
            changed
        };

        if changed {
            let mut session = self.session.write().await;
            if session.is_authenticated {
                tracing::info!("Session invalidated by a 401 response");
                *session = Session::unauthenticated();
            }
        }
    }
}

fn display_message(err: &ClientError, fallback: &str) -> String {
    match err.status() {
        Some(status) if err.detail().is_none() => format!("{} (HTTP {})", fallback, status),
        _ => err.to_string(),
    }
}
