//! In-memory collaborators.
//!
//! Used by the demo binary and the tests. Each repository can be switched
//! into a failing mode and records the calls tests care about.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;

use super::{
    CartRepository, CatalogRepository, RepositoryError, SavedPage, SavedRepository,
    SearchRepository, Services, SessionAuth,
};
use crate::domain::{CartLine, Product, ProductId, SavedItem, UserIdentity};
use crate::messages::MessageQueue;
use crate::network::NetworkGuard;
use crate::session::MemorySessionStore;

const SUGGESTION_LIMIT: usize = 5;

#[derive(Default)]
struct FailSwitch(AtomicBool);

impl FailSwitch {
    fn set(&self, failing: bool) {
        self.0.store(failing, Ordering::SeqCst);
    }

    fn check(&self, source: &str) -> Result<(), RepositoryError> {
        if self.0.load(Ordering::SeqCst) {
            Err(RepositoryError::Unavailable(format!("{source} is unavailable")))
        } else {
            Ok(())
        }
    }
}

/// Product catalog seeded for the demo and tests.
pub fn seed_catalog() -> Vec<Product> {
    vec![
        Product::new("p-100", "Running Shoes", "shoes", 8999),
        Product::new("p-101", "Short Sleeve Shirt", "apparel", 2499),
        Product::new("p-102", "Shoulder Bag", "accessories", 5450),
        Product::new("p-103", "Trail Shoes", "shoes", 11900),
        Product::new("p-104", "Wool Socks", "apparel", 1299),
        Product::new("p-105", "Show Tickets Wallet", "accessories", 1999),
        Product::new("p-106", "Ceramic Mug", "home", 1550),
    ]
}

pub struct MemoryCatalog {
    products: Mutex<Vec<Product>>,
    fail: FailSwitch,
    feed_calls: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            fail: FailSwitch::default(),
            feed_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.set(failing);
    }

    pub fn set_products(&self, products: Vec<Product>) {
        *self.products.lock() = products;
    }

    pub fn feed_calls(&self) -> usize {
        self.feed_calls.load(Ordering::SeqCst)
    }
}

impl CatalogRepository for MemoryCatalog {
    fn feed(&self) -> BoxStream<'static, Result<Vec<Product>, RepositoryError>> {
        self.feed_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .fail
            .check("catalog")
            .map(|()| self.products.lock().clone());
        stream::iter(vec![result]).boxed()
    }
}

pub struct MemorySearch {
    catalog: Vec<Product>,
    history: Mutex<Vec<String>>,
    history_limit: usize,
    suggestion_queries: Mutex<Vec<String>>,
    fail: FailSwitch,
}

impl MemorySearch {
    pub fn new(catalog: Vec<Product>, history_limit: usize) -> Self {
        Self {
            catalog,
            history: Mutex::new(Vec::new()),
            history_limit,
            suggestion_queries: Mutex::new(Vec::new()),
            fail: FailSwitch::default(),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.set(failing);
    }

    /// Queries passed to `suggestions`, in call order.
    pub fn suggestion_queries(&self) -> Vec<String> {
        self.suggestion_queries.lock().clone()
    }

    fn matches(product: &Product, needle: &str) -> bool {
        product.title.to_lowercase().contains(needle)
            || product.category.to_lowercase().contains(needle)
    }
}

#[async_trait]
impl SearchRepository for MemorySearch {
    async fn suggestions(&self, query: &str) -> Result<Vec<String>, RepositoryError> {
        self.suggestion_queries.lock().push(query.to_string());
        self.fail.check("suggestions")?;
        let needle = query.to_lowercase();
        Ok(self
            .catalog
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .map(|p| p.title.clone())
            .take(SUGGESTION_LIMIT)
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        self.fail.check("search")?;
        let needle = query.to_lowercase();
        Ok(self
            .catalog
            .iter()
            .filter(|p| Self::matches(p, &needle))
            .cloned()
            .collect())
    }

    async fn history(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.history.lock().clone())
    }

    async fn record_query(&self, query: &str) -> Result<(), RepositoryError> {
        let mut history = self.history.lock();
        history.retain(|q| q != query);
        history.insert(0, query.to_string());
        history.truncate(self.history_limit);
        Ok(())
    }

    async fn remove_query(&self, query: &str) -> Result<(), RepositoryError> {
        self.fail.check("history")?;
        self.history.lock().retain(|q| q != query);
        Ok(())
    }

    async fn clear_history(&self) -> Result<(), RepositoryError> {
        self.fail.check("history")?;
        self.history.lock().clear();
        Ok(())
    }
}

pub struct MemorySaved {
    items: Mutex<Vec<SavedItem>>,
    clock: AtomicU64,
    fail: FailSwitch,
}

impl MemorySaved {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            clock: AtomicU64::new(1),
            fail: FailSwitch::default(),
        }
    }

    /// Save products in the given order; the last one is the most recent.
    pub fn with_products(products: Vec<Product>) -> Self {
        let saved = Self::new();
        {
            let mut items = saved.items.lock();
            for product in products {
                let saved_at = saved.clock.fetch_add(1, Ordering::SeqCst);
                items.push(SavedItem { product, saved_at });
            }
        }
        saved
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.set(failing);
    }

    pub fn ids(&self) -> HashSet<ProductId> {
        self.items
            .lock()
            .iter()
            .map(|item| item.product.id.clone())
            .collect()
    }
}

impl Default for MemorySaved {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SavedRepository for MemorySaved {
    async fn saved_ids(&self) -> Result<HashSet<ProductId>, RepositoryError> {
        self.fail.check("saved items")?;
        Ok(self.ids())
    }

    async fn toggle(&self, product: &Product) -> Result<bool, RepositoryError> {
        self.fail.check("saved items")?;
        let mut items = self.items.lock();
        if let Some(index) = items.iter().position(|i| i.product.id == product.id) {
            items.remove(index);
            return Ok(false);
        }
        let saved_at = self.clock.fetch_add(1, Ordering::SeqCst);
        items.push(SavedItem {
            product: product.clone(),
            saved_at,
        });
        Ok(true)
    }

    async fn page(&self, offset: usize, limit: usize) -> Result<SavedPage, RepositoryError> {
        self.fail.check("saved items")?;
        let mut items = self.items.lock().clone();
        items.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        let total = items.len();
        let page: Vec<SavedItem> = items.into_iter().skip(offset).take(limit).collect();
        Ok(SavedPage {
            has_more: offset.saturating_add(limit) < total,
            items: page,
        })
    }

    async fn remove(&self, id: &ProductId) -> Result<(), RepositoryError> {
        self.fail.check("saved items")?;
        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|item| &item.product.id != id);
        if items.len() == before {
            return Err(RepositoryError::NotFound(id.clone()));
        }
        Ok(())
    }
}

pub struct MemoryCart {
    lines: Mutex<Vec<CartLine>>,
    fail: FailSwitch,
}

impl MemoryCart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self {
            lines: Mutex::new(lines),
            fail: FailSwitch::default(),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.set(failing);
    }

    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.lock().clone()
    }

    fn update<F>(&self, id: &ProductId, apply: F) -> Result<(), RepositoryError>
    where
        F: FnOnce(&mut CartLine),
    {
        let mut lines = self.lines.lock();
        let line = lines
            .iter_mut()
            .find(|line| &line.product.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        apply(line);
        Ok(())
    }
}

#[async_trait]
impl CartRepository for MemoryCart {
    async fn lines(&self) -> Result<Vec<CartLine>, RepositoryError> {
        self.fail.check("cart")?;
        Ok(self.snapshot())
    }

    async fn add(&self, product: Product, quantity: u32) -> Result<(), RepositoryError> {
        self.fail.check("cart")?;
        let mut lines = self.lines.lock();
        match lines.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => lines.push(CartLine {
                product,
                quantity,
                selected: false,
            }),
        }
        Ok(())
    }

    async fn remove(&self, id: &ProductId) -> Result<(), RepositoryError> {
        self.fail.check("cart")?;
        let mut lines = self.lines.lock();
        let before = lines.len();
        lines.retain(|line| &line.product.id != id);
        if lines.len() == before {
            return Err(RepositoryError::NotFound(id.clone()));
        }
        Ok(())
    }

    async fn set_selected(&self, id: &ProductId, selected: bool) -> Result<(), RepositoryError> {
        self.fail.check("cart")?;
        self.update(id, |line| line.selected = selected)
    }

    async fn set_all_selected(&self, selected: bool) -> Result<(), RepositoryError> {
        self.fail.check("cart")?;
        for line in self.lines.lock().iter_mut() {
            line.selected = selected;
        }
        Ok(())
    }
}

/// A full set of in-memory collaborators.
#[derive(Clone)]
pub struct MemoryBackend {
    pub catalog: Arc<MemoryCatalog>,
    pub search: Arc<MemorySearch>,
    pub saved: Arc<MemorySaved>,
    pub cart: Arc<MemoryCart>,
    pub auth: Arc<SessionAuth<MemorySessionStore>>,
}

impl MemoryBackend {
    /// Seeded catalog, two saved items, two unselected cart lines.
    pub fn seeded(signed_in: bool) -> Self {
        let catalog = seed_catalog();
        let session = if signed_in {
            MemorySessionStore::signed_in(demo_user())
        } else {
            MemorySessionStore::new()
        };
        let cart_lines = catalog
            .iter()
            .take(2)
            .map(|product| CartLine {
                product: product.clone(),
                quantity: 1,
                selected: false,
            })
            .collect();

        Self {
            search: Arc::new(MemorySearch::new(catalog.clone(), 10)),
            saved: Arc::new(MemorySaved::with_products(
                catalog.iter().skip(3).take(2).cloned().collect(),
            )),
            cart: Arc::new(MemoryCart::new(cart_lines)),
            catalog: Arc::new(MemoryCatalog::new(catalog)),
            auth: Arc::new(SessionAuth::new(session)),
        }
    }

    pub fn services(&self, network: NetworkGuard, messages: MessageQueue) -> Services {
        Services {
            auth: self.auth.clone(),
            catalog: self.catalog.clone(),
            search: self.search.clone(),
            saved: self.saved.clone(),
            cart: self.cart.clone(),
            messages,
            network,
        }
    }
}

pub fn demo_user() -> UserIdentity {
    UserIdentity {
        id: "demo".to_string(),
        email: "demo@example.com".to_string(),
        display_name: "Demo Shopper".to_string(),
    }
}
