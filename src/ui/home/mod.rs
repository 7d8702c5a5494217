mod action;
mod outcome;
mod pipeline;
mod reducer;
mod state;

pub use action::{HomeAction, HomeEvent};
pub use outcome::HomeOutcome;
pub use pipeline::HomePipeline;
pub use reducer::HomeReducer;
pub use state::HomeState;
