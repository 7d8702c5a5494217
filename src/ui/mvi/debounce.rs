//! Async debouncing for pipelines that react to rapid input.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs only the most recently scheduled task, once input has been quiet
/// for the debounce window.
///
/// Scheduling a new task aborts the pending one. Dropping the debouncer
/// aborts whatever is still pending, which ties the task to the lifetime of
/// the owning pipeline.
pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replace any pending task with `task`, to run after the window.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            task.await;
        }));
    }

    /// Abort the pending task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a scheduled task has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn only_last_scheduled_task_runs() {
        let runs = Arc::new(Mutex::new(Vec::new()));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        for query in ["s", "sh", "sho"] {
            let runs = Arc::clone(&runs);
            debouncer.schedule(async move {
                runs.lock().push(query);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(*runs.lock(), vec!["sho"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_pending_task() {
        let runs = Arc::new(Mutex::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        let counter = Arc::clone(&runs);
        debouncer.schedule(async move {
            *counter.lock() += 1;
        });
        assert!(debouncer.is_pending());
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*runs.lock(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_pending_task() {
        let runs = Arc::new(Mutex::new(0));
        {
            let mut debouncer = Debouncer::new(Duration::from_millis(50));
            let counter = Arc::clone(&runs);
            debouncer.schedule(async move {
                *counter.lock() += 1;
            });
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*runs.lock(), 0);
    }
}
