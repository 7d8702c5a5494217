use crate::domain::{ProductId, SavedSort};
use crate::ui::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum SavedAction {
    /// Load the first page.
    Fetch,
    LoadMore,
    ChangeSort(SavedSort),
    Remove(ProductId),
    Open(ProductId),
}

impl Action for SavedAction {}

#[derive(Debug, Clone, PartialEq)]
pub enum SavedEvent {
    OpenProduct(ProductId),
}
