//! Cache-then-network state machine for the user directory.
//!
//! The directory is read from three sources with a fixed preference order:
//! the persistent cache (restored verbatim on startup), the in-memory list
//! (when offline or within the freshness window), and the remote service
//! (everything else). Results of a remote refresh are written back to the
//! cache so the next session can start offline.
//!
//! Concurrently in-flight operations are not serialized: each one settles by
//! writing the fields it owns, and the last settlement wins. A cache load
//! that settles after a network fetch will replay the older snapshot; see
//! the test module for the pinned behavior.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::DirectoryService;
use crate::cache::CacheStore;
use crate::connectivity::ConnectivityMonitor;
use crate::models::User;

/// Cache store key for the persisted directory snapshot
const USERS_CACHE_KEY: &str = "users_cache";

/// Consider the directory stale after 5 minutes.
/// The upstream list changes rarely; this mostly avoids refetching on every
/// screen visit.
const CACHE_TTL_MINUTES: i64 = 5;

/// Persisted form of the directory: the user list plus the instant it was
/// fetched from the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedUsers {
    pub users: Vec<User>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct UserDirectoryState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
    /// Set only by a genuine network fetch, never by a cache replay
    pub last_fetch: Option<DateTime<Utc>>,
}

impl UserDirectoryState {
    fn cache_is_fresh(&self) -> bool {
        match self.last_fetch {
            Some(at) => Utc::now() - at < Duration::minutes(CACHE_TTL_MINUTES),
            None => false,
        }
    }

    /// Human-readable age of the last network fetch
    pub fn cache_age_display(&self) -> String {
        let Some(last_fetch) = self.last_fetch else {
            return "never".to_string();
        };
        let minutes = (Utc::now() - last_fetch).num_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

/// Which branch a fetch settled through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The remote service was called and the directory replaced
    Refreshed,
    /// The freshness window was still open; no network call made
    CacheFresh,
    /// Offline, served from the in-memory list; no network call made
    OfflineFallback,
    /// Settled with an error surfaced in the state
    Failed,
}

enum Settled {
    Refreshed {
        users: Vec<User>,
        fetched_at: DateTime<Utc>,
    },
    CacheFresh,
    OfflineFallback,
    Failed(String),
}

pub struct UserDirectory {
    cache: Arc<dyn CacheStore>,
    connectivity: Arc<dyn ConnectivityMonitor>,
    directory: Arc<dyn DirectoryService>,
    state: watch::Sender<UserDirectoryState>,
}

impl UserDirectory {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        connectivity: Arc<dyn ConnectivityMonitor>,
        directory: Arc<dyn DirectoryService>,
    ) -> Self {
        let (state, _rx) = watch::channel(UserDirectoryState::default());
        Self {
            cache,
            connectivity,
            directory,
            state,
        }
    }

    pub fn snapshot(&self) -> UserDirectoryState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UserDirectoryState> {
        self.state.subscribe()
    }

    /// Restore the persisted directory snapshot verbatim.
    ///
    /// Freshness is not checked here - that happens in `fetch`. An absent,
    /// unreadable, or malformed blob resets to an empty directory. Never
    /// touches `loading` or `error`.
    pub async fn load_from_cache(&self) {
        let restored = match self.cache.get(USERS_CACHE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<CachedUsers>(&raw) {
                Ok(cached) => Some(cached),
                Err(e) => {
                    debug!(error = %e, "Discarding malformed directory cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                debug!(error = %e, "Failed to read directory cache entry");
                None
            }
        };

        self.state.send_modify(|s| match restored {
            Some(cached) => {
                s.users = cached.users;
                s.last_fetch = Some(cached.fetched_at);
            }
            None => {
                s.users = Vec::new();
                s.last_fetch = None;
            }
        });
    }

    /// Refresh the directory, preferring cache over network.
    ///
    /// `loading` is raised for exactly the duration of this call, whichever
    /// branch settles it. Offline with a non-empty in-memory list counts as
    /// satisfied; offline with nothing cached is an error. Within the
    /// freshness window the network is skipped and `last_fetch` keeps its
    /// old value. Only a real network success replaces `users`, advances
    /// `last_fetch`, and persists the snapshot.
    pub async fn fetch(&self) -> FetchOutcome {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let snapshot = self.state.borrow().clone();
        let settled = self.fetch_inner(snapshot).await;

        match settled {
            Settled::Refreshed { users, fetched_at } => {
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.users = users;
                    s.last_fetch = Some(fetched_at);
                });
                FetchOutcome::Refreshed
            }
            Settled::CacheFresh => {
                self.state.send_modify(|s| s.loading = false);
                FetchOutcome::CacheFresh
            }
            Settled::OfflineFallback => {
                self.state.send_modify(|s| s.loading = false);
                FetchOutcome::OfflineFallback
            }
            Settled::Failed(message) => {
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(message);
                });
                FetchOutcome::Failed
            }
        }
    }

    async fn fetch_inner(&self, snapshot: UserDirectoryState) -> Settled {
        let status = self.connectivity.status().await;

        if !status.is_connected {
            if snapshot.users.is_empty() {
                return Settled::Failed(
                    "No internet connection and no cached data available".to_string(),
                );
            }
            debug!(users = snapshot.users.len(), "Offline, serving directory from memory");
            return Settled::OfflineFallback;
        }

        if snapshot.cache_is_fresh() && !snapshot.users.is_empty() {
            debug!("Directory cache still fresh, skipping network call");
            return Settled::CacheFresh;
        }

        match self.directory.fetch_users().await {
            Ok(users) => {
                let fetched_at = Utc::now();
                if let Err(e) = self.persist(&users, fetched_at).await {
                    warn!(error = %e, "Failed to persist directory cache");
                }
                Settled::Refreshed { users, fetched_at }
            }
            Err(e) => Settled::Failed(format!("{:#}", e)),
        }
    }

    async fn persist(&self, users: &[User], fetched_at: DateTime<Utc>) -> Result<()> {
        let blob = serde_json::to_string(&CachedUsers {
            users: users.to_vec(),
            fetched_at,
        })?;
        self.cache.set(USERS_CACHE_KEY, &blob).await
    }

    /// Dismiss the surfaced error; no other field changes
    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}
