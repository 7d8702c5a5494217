use std::collections::HashSet;

use crate::domain::{Product, ProductId};
use crate::ui::mvi::Outcome;

#[derive(Debug, Clone, PartialEq)]
pub enum HomeOutcome {
    Loading,
    Refreshing,
    /// A refresh ended; whatever feed is on screen stays.
    RefreshFinished,
    Loaded {
        products: Vec<Product>,
        saved_ids: HashSet<ProductId>,
    },
    SaveToggled {
        id: ProductId,
        saved: bool,
    },
    Failed(String),
}

impl Outcome for HomeOutcome {}
