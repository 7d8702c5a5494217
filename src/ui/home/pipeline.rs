use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use super::action::{HomeAction, HomeEvent};
use super::outcome::HomeOutcome;
use super::reducer::HomeReducer;
use super::state::HomeState;
use crate::domain::{Product, ProductId};
use crate::messages::MessageQueue;
use crate::network::NetworkGuard;
use crate::repository::{
    AuthRepository, CatalogRepository, RepositoryError, SavedRepository, Services,
};
use crate::ui::mvi::{Emitter, Pipeline};

type HomeEmitter = Emitter<HomeReducer, HomeEvent>;

/// Home feed effects. Refresh-eligible: reconnecting retries a failed load
/// and refreshes a loaded feed.
pub struct HomePipeline {
    auth: Arc<dyn AuthRepository>,
    catalog: Arc<dyn CatalogRepository>,
    saved: Arc<dyn SavedRepository>,
    network: NetworkGuard,
    messages: MessageQueue,
    products: Vec<Product>,
}

impl HomePipeline {
    pub fn new(services: &Services) -> Self {
        Self {
            auth: services.auth.clone(),
            catalog: services.catalog.clone(),
            saved: services.saved.clone(),
            network: services.network.clone(),
            messages: services.messages.clone(),
            products: Vec::new(),
        }
    }

    /// Consume the feed stream, emitting `Loaded` for every value it yields.
    /// Returns whether the stream yielded anything.
    async fn load(&mut self, emit: &HomeEmitter) -> Result<bool, RepositoryError> {
        self.network.ensure_online().await?;
        let mut feed = self.catalog.feed();
        let mut yielded = false;
        while let Some(next) = feed.next().await {
            yielded = true;
            let products = next?;
            let saved_ids = self.saved_ids().await;
            self.products = products.clone();
            emit.emit(HomeOutcome::Loaded {
                products,
                saved_ids,
            });
        }
        Ok(yielded)
    }

    async fn saved_ids(&self) -> HashSet<ProductId> {
        match self.auth.current_user().await {
            Ok(Some(_)) => match self.saved.saved_ids().await {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load saved ids for feed");
                    HashSet::new()
                }
            },
            Ok(None) => HashSet::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session");
                HashSet::new()
            }
        }
    }

    async fn fetch(&mut self, emit: &HomeEmitter) {
        emit.emit(HomeOutcome::Loading);
        match self.load(emit).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!("home feed ended without a value");
                self.products.clear();
                emit.emit(HomeOutcome::Loaded {
                    products: Vec::new(),
                    saved_ids: self.saved_ids().await,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load home feed");
                emit.emit(HomeOutcome::Failed(e.user_message()));
            }
        }
    }

    async fn refresh(&mut self, emit: &HomeEmitter) {
        if !matches!(emit.state(), HomeState::Content { .. }) {
            return self.fetch(emit).await;
        }
        emit.emit(HomeOutcome::Refreshing);
        if let Err(e) = self.load(emit).await {
            tracing::warn!(error = %e, "failed to refresh home feed");
            self.messages.push(e.user_message());
        }
        emit.emit(HomeOutcome::RefreshFinished);
    }

    async fn toggle_save(&mut self, id: ProductId, emit: &HomeEmitter) {
        match self.auth.current_user().await {
            Ok(Some(_)) => {}
            Ok(None) => return emit.event(HomeEvent::NavigateToLogin),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session");
                return emit.event(HomeEvent::NavigateToLogin);
            }
        }

        let Some(product) = self.products.iter().find(|p| p.id == id).cloned() else {
            tracing::debug!(product = %id, "save toggled for product not in feed");
            return;
        };

        match self.network.run(self.saved.toggle(&product)).await {
            Ok(saved) => emit.emit(HomeOutcome::SaveToggled { id, saved }),
            Err(e) => {
                tracing::warn!(error = %e, product = %id, "failed to toggle saved");
                self.messages.push(e.user_message());
            }
        }
    }
}

#[async_trait]
impl Pipeline for HomePipeline {
    const NAME: &'static str = "home";

    type Action = HomeAction;
    type Reducer = HomeReducer;
    type Event = HomeEvent;

    async fn process(&mut self, action: HomeAction, emit: &HomeEmitter) {
        match action {
            HomeAction::Fetch => self.fetch(emit).await,
            HomeAction::Refresh => self.refresh(emit).await,
            HomeAction::ToggleSave(id) => self.toggle_save(id, emit).await,
            HomeAction::OpenProduct(id) => emit.event(HomeEvent::OpenProduct(id)),
        }
    }

    fn on_reconnect(state: &HomeState) -> Option<HomeAction> {
        match state {
            HomeState::Error { .. } => Some(HomeAction::Fetch),
            HomeState::Content { .. } => Some(HomeAction::Refresh),
            HomeState::Loading => None,
        }
    }
}
