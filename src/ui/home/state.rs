use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{Product, ProductId};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HomeState {
    #[default]
    Loading,
    Content {
        products: Vec<Product>,
        saved_ids: HashSet<ProductId>,
        refreshing: bool,
    },
    Error {
        message: String,
    },
}

impl UiState for HomeState {}

impl HomeState {
    pub fn is_saved(&self, id: &ProductId) -> bool {
        matches!(self, Self::Content { saved_ids, .. } if saved_ids.contains(id))
    }
}
