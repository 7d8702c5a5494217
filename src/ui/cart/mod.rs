mod action;
mod outcome;
mod pipeline;
mod reducer;
mod state;

pub use action::{CartAction, CartEvent};
pub use outcome::CartOutcome;
pub use pipeline::CartPipeline;
pub use reducer::CartReducer;
pub use state::CartState;
