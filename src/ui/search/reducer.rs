use crate::ui::mvi::Reducer;

use super::outcome::SearchOutcome;
use super::state::SearchState;

pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchState;
    type Outcome = SearchOutcome;

    fn reduce(state: Self::State, outcome: Self::Outcome) -> Self::State {
        match outcome {
            SearchOutcome::HistoryLoaded(history) => match state {
                SearchState::Init {
                    history_hidden,
                    query,
                    ..
                } => SearchState::Init {
                    history,
                    history_hidden,
                    query,
                },
                other => other,
            },
            SearchOutcome::HistoryHidden(hidden) => match state {
                SearchState::Init { history, query, .. } => SearchState::Init {
                    history,
                    history_hidden: hidden,
                    query,
                },
                other => other,
            },
            SearchOutcome::QueryChanged(query) => match state {
                SearchState::Init {
                    history,
                    history_hidden,
                    ..
                } => SearchState::Init {
                    history,
                    history_hidden,
                    query,
                },
                SearchState::Suggesting { suggestions, .. } => {
                    SearchState::Suggesting { suggestions, query }
                }
                other => other,
            },
            SearchOutcome::Cleared { history } => {
                let history_hidden = matches!(
                    state,
                    SearchState::Init {
                        history_hidden: true,
                        ..
                    }
                );
                SearchState::Init {
                    history,
                    history_hidden,
                    query: String::new(),
                }
            }
            SearchOutcome::Suggestions { query, suggestions } => match state {
                // A submitted search in flight wins over late suggestions.
                searching @ SearchState::Searching { .. } => searching,
                _ => SearchState::Suggesting { suggestions, query },
            },
            SearchOutcome::Searching(query) => SearchState::Searching { query },
            SearchOutcome::Found {
                query,
                products,
                sort,
                saved_ids,
            } => SearchState::Results {
                products,
                query,
                sort,
                saved_ids,
            },
            SearchOutcome::Sorted { sort, products } => match state {
                SearchState::Results {
                    query, saved_ids, ..
                } => SearchState::Results {
                    products,
                    query,
                    sort,
                    saved_ids,
                },
                other => other,
            },
            SearchOutcome::SaveToggled { id, saved } => match state {
                SearchState::Results {
                    products,
                    query,
                    sort,
                    mut saved_ids,
                } => {
                    if saved {
                        saved_ids.insert(id);
                    } else {
                        saved_ids.remove(&id);
                    }
                    SearchState::Results {
                        products,
                        query,
                        sort,
                        saved_ids,
                    }
                }
                other => other,
            },
            SearchOutcome::Failed(message) => SearchState::Error { message },
        }
    }
}
