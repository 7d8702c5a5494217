//! Connectivity tracking and the network-gating guard.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;

use crate::config::NetworkConfig;
use crate::repository::RepositoryError;

/// Writer side of the shared connectivity flag.
pub struct ConnectivityMonitor {
    tx: watch::Sender<bool>,
}

impl ConnectivityMonitor {
    pub fn new(online: bool) -> Self {
        let (tx, _) = watch::channel(online);
        Self { tx }
    }

    /// Publish the current reachability. Subscribers are only woken on an
    /// actual change.
    pub fn set_online(&self, online: bool) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == online {
                false
            } else {
                *current = online;
                true
            }
        });
        if changed {
            tracing::info!(online, "connectivity changed");
        }
    }

    pub fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn status(&self) -> ConnectivityStatus {
        ConnectivityStatus {
            rx: self.tx.subscribe(),
        }
    }
}

/// Live, cloneable view of the connectivity flag.
#[derive(Clone)]
pub struct ConnectivityStatus {
    rx: watch::Receiver<bool>,
}

impl ConnectivityStatus {
    pub fn is_online(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the next change. Errors once the monitor is gone.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }

    /// Read the flag and mark it as seen for `changed`.
    pub(crate) fn mark_seen(&mut self) -> bool {
        *self.rx.borrow_and_update()
    }
}

/// Gate for effects that need the network.
///
/// Offline, the guard waits a fixed grace delay and then fails with
/// [`RepositoryError::NoConnection`]; it never polls or waits for the
/// network to come back. Online, it delegates immediately.
#[derive(Clone)]
pub struct NetworkGuard {
    status: ConnectivityStatus,
    grace: Duration,
}

impl NetworkGuard {
    pub fn new(status: ConnectivityStatus, config: &NetworkConfig) -> Self {
        Self {
            status,
            grace: config.grace(),
        }
    }

    pub async fn ensure_online(&self) -> Result<(), RepositoryError> {
        if self.status.is_online() {
            return Ok(());
        }
        tokio::time::sleep(self.grace).await;
        tracing::debug!(grace = ?self.grace, "offline, failing guarded effect");
        Err(RepositoryError::NoConnection)
    }

    /// Run `effect` only when online.
    pub async fn run<T, F>(&self, effect: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        self.ensure_online().await?;
        effect.await
    }

    pub fn status(&self) -> &ConnectivityStatus {
        &self.status
    }
}
