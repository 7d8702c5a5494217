//! Output handle through which a pipeline reports outcomes and events.

use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::watch;

use super::queue::QueueSender;
use super::reducer::Reducer;

/// Cloneable sink for a screen's outcomes and events.
///
/// `emit` folds an outcome into the state cell right away, so the state a
/// subscriber sees is always the left fold of every outcome emitted so far.
/// `event` bypasses the reducer and lands in the screen's event queue.
pub struct Emitter<R: Reducer, E> {
    screen: &'static str,
    state: Arc<watch::Sender<R::State>>,
    events: QueueSender<E>,
}

impl<R: Reducer, E: Debug + Send + 'static> Emitter<R, E> {
    pub(crate) fn new(
        screen: &'static str,
        state: Arc<watch::Sender<R::State>>,
        events: QueueSender<E>,
    ) -> Self {
        Self {
            screen,
            state,
            events,
        }
    }

    /// Reduce `outcome` into the current state.
    pub fn emit(&self, outcome: R::Outcome) {
        tracing::trace!(screen = self.screen, ?outcome, "reducing outcome");
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = R::reduce(current, outcome);
        });
    }

    /// Deliver a one-shot event to the UI. State is left untouched.
    pub fn event(&self, event: E) {
        tracing::debug!(screen = self.screen, ?event, "emitting event");
        if let Some(evicted) = self.events.send(event) {
            tracing::debug!(
                screen = self.screen,
                ?evicted,
                "event queue full, dropped oldest event"
            );
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> R::State {
        self.state.borrow().clone()
    }

    pub fn screen(&self) -> &'static str {
        self.screen
    }
}

impl<R: Reducer, E> Clone for Emitter<R, E> {
    fn clone(&self) -> Self {
        Self {
            screen: self.screen,
            state: Arc::clone(&self.state),
            events: self.events.clone(),
        }
    }
}
