//! Model-View-Intent (MVI) engine shared by every screen.
//!
//! # Architecture
//!
//! ```text
//! submit(Action) ──→ action queue ──→ Pipeline::process ──→ Outcome ──→ Reducer ──→ State
//!                      (drop-oldest)        │                                      │
//!                                           └──→ Event ──→ event queue             └──→ View
//! ```
//!
//! - **Action**: a request from the UI or the system
//! - **Outcome**: what processing an action produced, folded into state
//! - **Event**: one-shot output (navigation) kept out of state entirely
//! - **Reducer**: pure `(State, Outcome) -> State`
//! - **Pipeline**: per-screen async logic mapping actions to outcomes/events
//!
//! Actions are processed strictly one after another per screen. A pipeline
//! that needs overlapping work (debounced suggestions) spawns it itself and
//! emits through a cloned [`Emitter`].

mod action;
mod debounce;
mod emitter;
mod engine;
mod pipeline;
pub mod queue;
mod reducer;
mod state;

pub use action::Action;
pub use debounce::Debouncer;
pub use emitter::Emitter;
pub use engine::{ScreenHandle, StateMachine};
pub use pipeline::{Pipeline, StateOf};
pub use reducer::{Outcome, Reducer};
pub use state::UiState;
