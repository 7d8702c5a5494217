use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{Product, ProductId, SortOption};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchState {
    Init {
        history: Vec<String>,
        history_hidden: bool,
        query: String,
    },
    Suggesting {
        suggestions: Vec<String>,
        query: String,
    },
    Searching {
        query: String,
    },
    Results {
        products: Vec<Product>,
        query: String,
        sort: SortOption,
        saved_ids: HashSet<ProductId>,
    },
    Error {
        message: String,
    },
}

impl Default for SearchState {
    fn default() -> Self {
        Self::Init {
            history: Vec::new(),
            history_hidden: false,
            query: String::new(),
        }
    }
}

impl UiState for SearchState {}

impl SearchState {
    /// Text currently in the search bar, if the state tracks one.
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Init { query, .. }
            | Self::Suggesting { query, .. }
            | Self::Searching { query }
            | Self::Results { query, .. } => Some(query),
            Self::Error { .. } => None,
        }
    }
}
