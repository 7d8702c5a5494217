//! Inert value records shared by repositories and screens.

use std::cmp::Reverse;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    /// Price in the smallest currency unit.
    pub price_cents: u64,
}

impl Product {
    pub fn new(id: &str, title: &str, category: &str, price_cents: u64) -> Self {
        Self {
            id: ProductId::from(id),
            title: title.to_string(),
            category: category.to_string(),
            price_cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub selected: bool,
}

impl CartLine {
    pub fn total_cents(&self) -> u64 {
        self.product.price_cents * u64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItem {
    pub product: Product,
    /// Monotonic save stamp; larger is more recent.
    pub saved_at: u64,
}

/// Persisted identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Ordering of search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Repository order.
    #[default]
    Relevance,
    PriceLowToHigh,
    PriceHighToLow,
    Title,
}

impl SortOption {
    /// Order `products` in place. Stable, so ties keep relevance order.
    pub fn apply(self, products: &mut [Product]) {
        match self {
            Self::Relevance => {}
            Self::PriceLowToHigh => products.sort_by_key(|p| p.price_cents),
            Self::PriceHighToLow => products.sort_by_key(|p| Reverse(p.price_cents)),
            Self::Title => products.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relevance" => Some(Self::Relevance),
            "price-asc" | "price_low_to_high" => Some(Self::PriceLowToHigh),
            "price-desc" | "price_high_to_low" => Some(Self::PriceHighToLow),
            "title" => Some(Self::Title),
            _ => None,
        }
    }
}

/// Ordering of the saved list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavedSort {
    /// Most recently saved first.
    #[default]
    DateSaved,
    PriceLowToHigh,
    PriceHighToLow,
}

impl SavedSort {
    /// Order `items` in place. Ties fall back to most recently saved.
    pub fn apply(self, items: &mut [SavedItem]) {
        items.sort_by_key(|item| Reverse(item.saved_at));
        match self {
            Self::DateSaved => {}
            Self::PriceLowToHigh => items.sort_by_key(|item| item.product.price_cents),
            Self::PriceHighToLow => items.sort_by_key(|item| Reverse(item.product.price_cents)),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "date" | "date_saved" => Some(Self::DateSaved),
            "price-asc" | "price_low_to_high" => Some(Self::PriceLowToHigh),
            "price-desc" | "price_high_to_low" => Some(Self::PriceHighToLow),
            _ => None,
        }
    }
}
