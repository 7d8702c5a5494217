use std::collections::HashSet;

use crate::domain::{Product, ProductId, SortOption};
use crate::ui::mvi::Outcome;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    HistoryLoaded(Vec<String>),
    HistoryHidden(bool),
    QueryChanged(String),
    /// Query emptied: back to the history view.
    Cleared { history: Vec<String> },
    Suggestions {
        query: String,
        suggestions: Vec<String>,
    },
    Searching(String),
    Found {
        query: String,
        products: Vec<Product>,
        sort: SortOption,
        saved_ids: HashSet<ProductId>,
    },
    /// Products already ordered by `sort`.
    Sorted {
        sort: SortOption,
        products: Vec<Product>,
    },
    SaveToggled {
        id: ProductId,
        saved: bool,
    },
    Failed(String),
}

impl Outcome for SearchOutcome {}
