use crate::domain::{ProductId, SavedItem, SavedSort};
use crate::ui::mvi::Outcome;

#[derive(Debug, Clone, PartialEq)]
pub enum SavedOutcome {
    Fetching,
    Loaded {
        items: Vec<SavedItem>,
        sort: SavedSort,
        has_more: bool,
    },
    PageAppended {
        items: Vec<SavedItem>,
        has_more: bool,
    },
    SortChanged(SavedSort),
    /// Emitted only after the durable removal succeeded.
    Removed(ProductId),
    Failed(String),
}

impl Outcome for SavedOutcome {}
