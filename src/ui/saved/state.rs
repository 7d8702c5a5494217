use serde::Serialize;

use crate::domain::{SavedItem, SavedSort};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SavedState {
    #[default]
    Fetching,
    Content {
        /// Always ordered by `sort`.
        items: Vec<SavedItem>,
        sort: SavedSort,
        has_more: bool,
    },
    Error {
        message: String,
    },
}

impl UiState for SavedState {}

impl SavedState {
    pub fn items(&self) -> &[SavedItem] {
        match self {
            Self::Content { items, .. } => items,
            _ => &[],
        }
    }
}
