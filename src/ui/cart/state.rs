use serde::Serialize;

use crate::domain::CartLine;
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CartState {
    #[default]
    Loading,
    Content {
        lines: Vec<CartLine>,
        /// Derived from `lines` on every reduction.
        all_selected: bool,
    },
    Error {
        message: String,
    },
}

impl UiState for CartState {}

impl CartState {
    pub fn all_selected(&self) -> bool {
        matches!(self, Self::Content { all_selected: true, .. })
    }

    pub fn selected_total_cents(&self) -> u64 {
        match self {
            Self::Content { lines, .. } => lines
                .iter()
                .filter(|line| line.selected)
                .map(CartLine::total_cents)
                .sum(),
            _ => 0,
        }
    }
}
