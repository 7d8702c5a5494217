//! Collaborator contracts consumed by the screen pipelines.
//!
//! Reads may be streaming ([`CatalogRepository::feed`]); writes are
//! single-shot. Every call either succeeds or returns a [`RepositoryError`].

pub mod auth;
pub mod error;
pub mod memory;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::{CartLine, Product, ProductId, SavedItem, UserIdentity};
use crate::messages::MessageQueue;
use crate::network::NetworkGuard;

pub use auth::SessionAuth;
pub use error::RepositoryError;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn current_user(&self) -> Result<Option<UserIdentity>, RepositoryError>;
    async fn sign_in(&self, user: UserIdentity) -> Result<(), RepositoryError>;
    async fn sign_out(&self) -> Result<(), RepositoryError>;
}

pub trait CatalogRepository: Send + Sync {
    /// Home feed. May yield more than once (cached, then fresh).
    fn feed(&self) -> BoxStream<'static, Result<Vec<Product>, RepositoryError>>;
}

#[async_trait]
pub trait SearchRepository: Send + Sync {
    async fn suggestions(&self, query: &str) -> Result<Vec<String>, RepositoryError>;
    async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError>;
    /// Most recent first.
    async fn history(&self) -> Result<Vec<String>, RepositoryError>;
    async fn record_query(&self, query: &str) -> Result<(), RepositoryError>;
    async fn remove_query(&self, query: &str) -> Result<(), RepositoryError>;
    async fn clear_history(&self) -> Result<(), RepositoryError>;
}

/// One page of the saved list, most recently saved first.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPage {
    pub items: Vec<SavedItem>,
    pub has_more: bool,
}

#[async_trait]
pub trait SavedRepository: Send + Sync {
    async fn saved_ids(&self) -> Result<HashSet<ProductId>, RepositoryError>;
    /// Save or unsave; returns whether the product is saved afterwards.
    async fn toggle(&self, product: &Product) -> Result<bool, RepositoryError>;
    async fn page(&self, offset: usize, limit: usize) -> Result<SavedPage, RepositoryError>;
    async fn remove(&self, id: &ProductId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn lines(&self) -> Result<Vec<CartLine>, RepositoryError>;
    async fn add(&self, product: Product, quantity: u32) -> Result<(), RepositoryError>;
    async fn remove(&self, id: &ProductId) -> Result<(), RepositoryError>;
    async fn set_selected(&self, id: &ProductId, selected: bool) -> Result<(), RepositoryError>;
    async fn set_all_selected(&self, selected: bool) -> Result<(), RepositoryError>;
}

/// Everything a screen pipeline may call, injected at construction.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub search: Arc<dyn SearchRepository>,
    pub saved: Arc<dyn SavedRepository>,
    pub cart: Arc<dyn CartRepository>,
    pub messages: MessageQueue,
    pub network: NetworkGuard,
}
