//! Lifecycle scope of one screen.
//!
//! Every task a screen spawns (action worker, reconnect hook) selects on the
//! scope and stops as soon as it is cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Owner side of a screen scope. Cancels the scope when dropped.
pub struct ScreenScope {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// End the scope. Idempotent.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Create a handle for sharing with spawned tasks
    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            cancelled: Arc::clone(&self.cancelled),
            notify: Arc::clone(&self.notify),
        }
    }
}

impl Default for ScreenScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Lightweight handle for observing scope cancellation
#[derive(Clone)]
pub struct ScopeHandle {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ScopeHandle {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolve once the scope is cancelled.
    pub async fn cancelled(&self) {
        // Register with Notify before checking the flag: otherwise cancel()
        // could fire between the check and the await and the wakeup is lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}
