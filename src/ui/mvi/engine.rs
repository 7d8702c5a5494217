//! Per-screen state machine runtime.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::emitter::Emitter;
use super::pipeline::{Pipeline, StateOf};
use super::queue::{self, QueueReceiver, QueueSender};
use crate::config::EngineConfig;
use crate::network::ConnectivityStatus;
use crate::scope::{ScopeHandle, ScreenScope};

/// Builder for one screen's state machine.
pub struct StateMachine<P: Pipeline> {
    initial: StateOf<P>,
    action_buffer: usize,
    event_buffer: usize,
    connectivity: Option<ConnectivityStatus>,
}

impl<P: Pipeline> StateMachine<P> {
    /// Start from the state's default value and the configured buffers.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            initial: <StateOf<P> as Default>::default(),
            action_buffer: config.action_buffer,
            event_buffer: config.event_buffer,
            connectivity: None,
        }
    }

    pub fn with_initial_state(mut self, state: StateOf<P>) -> Self {
        self.initial = state;
        self
    }

    /// Subscribe to connectivity so `P::on_reconnect` can fire on
    /// offline→online transitions.
    pub fn with_connectivity(mut self, status: ConnectivityStatus) -> Self {
        self.connectivity = Some(status);
        self
    }

    /// Spawn the action worker (and reconnect hook, if any).
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self, pipeline: P) -> ScreenHandle<P> {
        let scope = ScreenScope::new();
        let (action_tx, action_rx) = queue::channel(self.action_buffer);
        let (event_tx, event_rx) = queue::channel(self.event_buffer);
        let (state_tx, state_rx) = watch::channel(self.initial);
        let emitter = Emitter::new(P::NAME, Arc::new(state_tx), event_tx);

        tracing::debug!(screen = P::NAME, "starting state machine");

        if let Some(status) = self.connectivity {
            tokio::spawn(watch_connectivity::<P>(
                status,
                state_rx.clone(),
                action_tx.clone(),
                scope.handle(),
            ));
        }

        let worker = tokio::spawn(run_actions(pipeline, action_rx, emitter, scope.handle()));

        ScreenHandle {
            actions: action_tx,
            state: state_rx,
            events: event_rx,
            scope,
            worker,
        }
    }
}

/// UI-facing side of a running screen.
///
/// Dropping the handle ends the screen scope: the worker stops, the pipeline
/// (and any debounced work it owns) is dropped.
pub struct ScreenHandle<P: Pipeline> {
    actions: QueueSender<P::Action>,
    state: watch::Receiver<StateOf<P>>,
    events: QueueReceiver<P::Event>,
    scope: ScreenScope,
    worker: JoinHandle<()>,
}

impl<P: Pipeline> ScreenHandle<P> {
    /// Fire-and-forget. Never blocks; on overflow the oldest queued action
    /// is discarded.
    pub fn submit(&self, action: P::Action) {
        if self.scope.is_cancelled() {
            tracing::debug!(screen = P::NAME, ?action, "screen closed, ignoring action");
            return;
        }
        if let Some(evicted) = self.actions.send(action) {
            tracing::debug!(
                screen = P::NAME,
                ?evicted,
                "action queue full, dropped oldest action"
            );
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> StateOf<P> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every reduction.
    pub fn subscribe(&self) -> watch::Receiver<StateOf<P>> {
        self.state.clone()
    }

    /// Wait until the state satisfies `predicate` and return that state.
    ///
    /// Returns `None` if the screen stops before that happens.
    pub async fn wait_for<F>(&self, mut predicate: F) -> Option<StateOf<P>>
    where
        F: FnMut(&StateOf<P>) -> bool,
    {
        let mut rx = self.state.clone();
        rx.wait_for(|state| predicate(state))
            .await
            .ok()
            .map(|state| state.clone())
    }

    /// Next one-shot event. Returns `None` once the screen has stopped and no
    /// events are left.
    pub async fn next_event(&self) -> Option<P::Event> {
        self.events.recv().await
    }

    pub fn try_next_event(&self) -> Option<P::Event> {
        self.events.try_recv()
    }

    /// Actions discarded by overflow since the screen started.
    pub fn dropped_actions(&self) -> u64 {
        self.actions.dropped()
    }

    /// End the screen scope.
    pub fn close(&self) {
        self.scope.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.scope.is_cancelled() || self.worker.is_finished()
    }
}

async fn run_actions<P: Pipeline>(
    mut pipeline: P,
    actions: QueueReceiver<P::Action>,
    emitter: Emitter<P::Reducer, P::Event>,
    scope: ScopeHandle,
) {
    loop {
        let action = tokio::select! {
            biased;
            _ = scope.cancelled() => break,
            next = actions.recv() => match next {
                Some(action) => action,
                None => break,
            },
        };

        tracing::debug!(screen = P::NAME, ?action, "processing action");
        let processing = AssertUnwindSafe(pipeline.process(action, &emitter)).catch_unwind();

        tokio::select! {
            biased;
            _ = scope.cancelled() => break,
            finished = processing => {
                if finished.is_err() {
                    tracing::error!(
                        screen = P::NAME,
                        "action processing panicked, continuing with next action"
                    );
                }
            }
        }
    }
    tracing::debug!(screen = P::NAME, "state machine stopped");
}

async fn watch_connectivity<P: Pipeline>(
    mut status: ConnectivityStatus,
    state: watch::Receiver<StateOf<P>>,
    actions: QueueSender<P::Action>,
    scope: ScopeHandle,
) {
    let mut online = status.mark_seen();
    loop {
        tokio::select! {
            biased;
            _ = scope.cancelled() => break,
            changed = status.changed() => if changed.is_err() { break },
        }

        let now = status.mark_seen();
        if now && !online {
            let refresh = P::on_reconnect(&state.borrow());
            if let Some(action) = refresh {
                tracing::info!(screen = P::NAME, ?action, "connectivity restored, refreshing");
                if let Some(evicted) = actions.send(action) {
                    tracing::debug!(
                        screen = P::NAME,
                        ?evicted,
                        "action queue full, dropped oldest action"
                    );
                }
            }
        }
        online = now;
    }
}
