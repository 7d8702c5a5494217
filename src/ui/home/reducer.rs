use crate::ui::mvi::Reducer;

use super::outcome::HomeOutcome;
use super::state::HomeState;

pub struct HomeReducer;

impl Reducer for HomeReducer {
    type State = HomeState;
    type Outcome = HomeOutcome;

    fn reduce(state: Self::State, outcome: Self::Outcome) -> Self::State {
        match outcome {
            HomeOutcome::Loading => HomeState::Loading,
            HomeOutcome::Refreshing => match state {
                HomeState::Content {
                    products,
                    saved_ids,
                    ..
                } => HomeState::Content {
                    products,
                    saved_ids,
                    refreshing: true,
                },
                other => other,
            },
            HomeOutcome::RefreshFinished => match state {
                HomeState::Content {
                    products,
                    saved_ids,
                    ..
                } => HomeState::Content {
                    products,
                    saved_ids,
                    refreshing: false,
                },
                other => other,
            },
            HomeOutcome::Loaded {
                products,
                saved_ids,
            } => HomeState::Content {
                products,
                saved_ids,
                refreshing: false,
            },
            HomeOutcome::SaveToggled { id, saved } => match state {
                HomeState::Content {
                    products,
                    mut saved_ids,
                    refreshing,
                } => {
                    if saved {
                        saved_ids.insert(id);
                    } else {
                        saved_ids.remove(&id);
                    }
                    HomeState::Content {
                        products,
                        saved_ids,
                        refreshing,
                    }
                }
                other => other,
            },
            HomeOutcome::Failed(message) => HomeState::Error { message },
        }
    }
}
