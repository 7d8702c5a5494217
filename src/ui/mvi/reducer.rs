//! Reducer trait for MVI architecture.

use std::fmt::Debug;

use super::state::UiState;

/// Marker trait for outcomes produced by a pipeline and folded into state.
pub trait Outcome: Debug + Send + 'static {}

/// Reducer transforms state based on outcomes.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Outcome) -> State
///
/// An outcome that does not apply to the current state variant returns the
/// state unchanged.
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The outcome type this reducer handles.
    type Outcome: Outcome;

    /// Process an outcome and return the new state.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: Self::State, outcome: Self::Outcome) -> Self::State;
}
