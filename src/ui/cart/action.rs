use crate::domain::{Product, ProductId};
use crate::ui::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Fetch,
    /// Adds to the quantity of an existing line, otherwise appends an
    /// unselected one.
    Add { product: Product, quantity: u32 },
    Remove(ProductId),
    UpdateSelection { id: ProductId, selected: bool },
    UpdateAllSelection(bool),
    Checkout,
}

impl Action for CartAction {}

#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    NavigateToCheckout {
        items: Vec<ProductId>,
        total_cents: u64,
    },
}
