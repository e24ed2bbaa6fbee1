//! Auth token lifecycle in lockstep with the secret store.
//!
//! The in-memory flag is only ever set authenticated after a successful
//! store operation; a failed write forces the state back to unauthenticated.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use tokio::sync::watch;
use tracing::debug;

use super::SecretStore;

/// Secret store key holding the session token
const AUTH_TOKEN_KEY: &str = "auth_token";

/// Length of the random suffix in generated demo tokens
const TOKEN_SUFFIX_LEN: usize = 9;

/// Invariant: `is_authenticated` is true exactly when `token` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
    pub is_authenticated: bool,
}

pub struct AuthManager {
    secrets: Arc<dyn SecretStore>,
    state: watch::Sender<AuthState>,
}

impl AuthManager {
    pub fn new(secrets: Arc<dyn SecretStore>) -> Self {
        let (state, _rx) = watch::channel(AuthState::default());
        Self { secrets, state }
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Restore a previously saved token from the secret store.
    ///
    /// Returns whether a token was restored. A missing token or a store
    /// read failure leaves the state unauthenticated without raising an
    /// error - an unreadable keychain is indistinguishable from a fresh
    /// install here.
    pub async fn load_token(&self) -> bool {
        match self.secrets.get(AUTH_TOKEN_KEY).await {
            Ok(Some(token)) => {
                self.state.send_modify(|auth| {
                    auth.token = Some(token);
                    auth.is_authenticated = true;
                });
                true
            }
            Ok(None) => false,
            Err(e) => {
                debug!(error = %e, "Failed to read auth token from secret store");
                false
            }
        }
    }

    /// Synthesize an opaque demo token. No store write and no state change;
    /// the caller persists it via `save_token`.
    pub fn generate_token(&self) -> String {
        let suffix: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_SUFFIX_LEN)
            .map(char::from)
            .collect();
        format!("demo_{}_{}", Utc::now().timestamp_millis(), suffix)
    }

    /// Persist a token and mark the session authenticated.
    ///
    /// A failed write leaves the state unauthenticated and surfaces the
    /// failure to the caller.
    pub async fn save_token(&self, token: &str) -> Result<()> {
        match self.secrets.set(AUTH_TOKEN_KEY, token).await {
            Ok(()) => {
                self.state.send_modify(|auth| {
                    auth.token = Some(token.to_string());
                    auth.is_authenticated = true;
                });
                Ok(())
            }
            Err(e) => {
                self.state.send_modify(|auth| {
                    auth.token = None;
                    auth.is_authenticated = false;
                });
                Err(e).context("Failed to persist auth token")
            }
        }
    }

    /// Delete the stored token. In-memory state is untouched; callers clear
    /// it separately via `logout`.
    pub async fn remove_token(&self) -> Result<()> {
        self.secrets.delete(AUTH_TOKEN_KEY).await
    }

    /// Clear in-memory auth state. Never touches the secret store.
    pub fn logout(&self) {
        self.state.send_modify(|auth| {
            auth.token = None;
            auth.is_authenticated = false;
        });
    }
}
