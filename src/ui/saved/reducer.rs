use crate::ui::mvi::Reducer;

use super::outcome::SavedOutcome;
use super::state::SavedState;

pub struct SavedReducer;

impl Reducer for SavedReducer {
    type State = SavedState;
    type Outcome = SavedOutcome;

    fn reduce(state: Self::State, outcome: Self::Outcome) -> Self::State {
        match outcome {
            SavedOutcome::Fetching => SavedState::Fetching,
            SavedOutcome::Loaded {
                mut items,
                sort,
                has_more,
            } => {
                sort.apply(&mut items);
                SavedState::Content {
                    items,
                    sort,
                    has_more,
                }
            }
            SavedOutcome::PageAppended {
                items: page,
                has_more,
            } => match state {
                SavedState::Content {
                    mut items, sort, ..
                } => {
                    for item in page {
                        if !items.iter().any(|i| i.product.id == item.product.id) {
                            items.push(item);
                        }
                    }
                    sort.apply(&mut items);
                    SavedState::Content {
                        items,
                        sort,
                        has_more,
                    }
                }
                other => other,
            },
            SavedOutcome::SortChanged(sort) => match state {
                SavedState::Content {
                    mut items,
                    has_more,
                    ..
                } => {
                    sort.apply(&mut items);
                    SavedState::Content {
                        items,
                        sort,
                        has_more,
                    }
                }
                other => other,
            },
            SavedOutcome::Removed(id) => match state {
                SavedState::Content {
                    mut items,
                    sort,
                    has_more,
                } => {
                    items.retain(|item| item.product.id != id);
                    SavedState::Content {
                        items,
                        sort,
                        has_more,
                    }
                }
                other => other,
            },
            SavedOutcome::Failed(message) => SavedState::Error { message },
        }
    }
}
