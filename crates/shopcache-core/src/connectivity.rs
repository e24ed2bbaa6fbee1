//! Network connectivity reporting.
//!
//! The real app reads connectivity from a platform native module; this crate
//! keeps that collaborator behind a trait and ships a simulated
//! implementation, matching the rest of the stubbed device surface.

use async_trait::async_trait;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityStatus {
    pub is_connected: bool,
}

/// Reports current online/offline status on demand and via subscription.
#[async_trait]
pub trait ConnectivityMonitor: Send + Sync {
    async fn status(&self) -> ConnectivityStatus;
    fn subscribe(&self) -> watch::Receiver<ConnectivityStatus>;
}

/// Watch-backed connectivity source toggled by the caller.
pub struct SimulatedConnectivity {
    tx: watch::Sender<ConnectivityStatus>,
}

impl SimulatedConnectivity {
    pub fn new(is_connected: bool) -> Self {
        let (tx, _rx) = watch::channel(ConnectivityStatus { is_connected });
        Self { tx }
    }

    /// Flip the simulated link state and notify subscribers
    pub fn set_connected(&self, is_connected: bool) {
        self.tx.send_replace(ConnectivityStatus { is_connected });
    }
}

#[async_trait]
impl ConnectivityMonitor for SimulatedConnectivity {
    async fn status(&self) -> ConnectivityStatus {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<ConnectivityStatus> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_status_follows_toggle() {
        let connectivity = SimulatedConnectivity::new(true);
        assert!(connectivity.status().await.is_connected);

        connectivity.set_connected(false);
        assert!(!connectivity.status().await.is_connected);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let connectivity = SimulatedConnectivity::new(true);
        let mut rx = connectivity.subscribe();

        connectivity.set_connected(false);
        rx.changed().await.expect("Watch channel closed");
        assert!(!rx.borrow().is_connected);
    }
}
