use crate::domain::{ProductId, SortOption};
use crate::ui::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    LoadHistory,
    /// Search bar text changed. Suggestions follow after the debounce window.
    UpdateQuery(String),
    /// Explicit search; bypasses the debounce.
    Submit(String),
    ChangeSort(SortOption),
    RemoveHistory(String),
    ClearHistory,
    SetHistoryHidden(bool),
    ToggleSave(ProductId),
}

impl Action for SearchAction {}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    NavigateToLogin,
}
