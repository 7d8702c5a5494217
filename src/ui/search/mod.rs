mod action;
mod outcome;
mod pipeline;
mod reducer;
mod state;

pub use action::{SearchAction, SearchEvent};
pub use outcome::SearchOutcome;
pub use pipeline::SearchPipeline;
pub use reducer::SearchReducer;
pub use state::SearchState;
