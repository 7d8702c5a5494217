mod action;
mod outcome;
mod pipeline;
mod reducer;
mod state;

pub use action::{SavedAction, SavedEvent};
pub use outcome::SavedOutcome;
pub use pipeline::SavedPipeline;
pub use reducer::SavedReducer;
pub use state::SavedState;
