//! Per-screen effect pipeline trait.

use std::fmt::Debug;

use async_trait::async_trait;

use super::action::Action;
use super::emitter::Emitter;
use super::reducer::Reducer;

/// State type of a pipeline's reducer.
pub type StateOf<P> = <<P as Pipeline>::Reducer as Reducer>::State;

/// Maps each action to zero or more outcomes and events.
///
/// The engine calls `process` for one action at a time, in arrival order,
/// and does not start the next action until the returned future completes.
/// Collaborator failures must be turned into explicit failure outcomes or
/// queued messages here; the engine only guards against panics.
#[async_trait]
pub trait Pipeline: Send + 'static {
    /// Screen name used in logs.
    const NAME: &'static str;

    type Action: Action;
    type Reducer: Reducer;
    type Event: Debug + Send + 'static;

    async fn process(
        &mut self,
        action: Self::Action,
        emit: &Emitter<Self::Reducer, Self::Event>,
    );

    /// Action to submit when connectivity comes back while the screen is in
    /// `state`. `None` means the screen is not refresh-eligible there.
    fn on_reconnect(_state: &StateOf<Self>) -> Option<Self::Action> {
        None
    }
}
