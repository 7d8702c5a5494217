use std::sync::Arc;

use async_trait::async_trait;

use super::action::{SavedAction, SavedEvent};
use super::outcome::SavedOutcome;
use super::reducer::SavedReducer;
use super::state::SavedState;
use crate::config::SavedConfig;
use crate::domain::{ProductId, SavedSort};
use crate::messages::MessageQueue;
use crate::network::NetworkGuard;
use crate::repository::{SavedRepository, Services};
use crate::ui::mvi::{Emitter, Pipeline};

type SavedEmitter = Emitter<SavedReducer, SavedEvent>;

/// Saved-list effects: paging, re-sorting and removal.
pub struct SavedPipeline {
    saved: Arc<dyn SavedRepository>,
    network: NetworkGuard,
    messages: MessageQueue,
    page_size: usize,
    sort: SavedSort,
    /// Items fetched so far; next page offset.
    loaded: usize,
    has_more: bool,
}

impl SavedPipeline {
    pub fn new(services: &Services, config: &SavedConfig) -> Self {
        Self {
            saved: services.saved.clone(),
            network: services.network.clone(),
            messages: services.messages.clone(),
            page_size: config.page_size.max(1),
            sort: SavedSort::default(),
            loaded: 0,
            has_more: false,
        }
    }

    async fn fetch(&mut self, emit: &SavedEmitter) {
        emit.emit(SavedOutcome::Fetching);
        match self.network.run(self.saved.page(0, self.page_size)).await {
            Ok(page) => {
                self.loaded = page.items.len();
                self.has_more = page.has_more;
                emit.emit(SavedOutcome::Loaded {
                    items: page.items,
                    sort: self.sort,
                    has_more: page.has_more,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load saved items");
                emit.emit(SavedOutcome::Failed(e.user_message()));
            }
        }
    }

    async fn load_more(&mut self, emit: &SavedEmitter) {
        if !self.has_more || !matches!(emit.state(), SavedState::Content { .. }) {
            tracing::debug!(loaded = self.loaded, "no further saved page to load");
            return;
        }
        match self
            .network
            .run(self.saved.page(self.loaded, self.page_size))
            .await
        {
            Ok(page) => {
                self.loaded += page.items.len();
                self.has_more = page.has_more;
                emit.emit(SavedOutcome::PageAppended {
                    items: page.items,
                    has_more: page.has_more,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load next saved page");
                self.messages.push(e.user_message());
            }
        }
    }

    async fn remove(&mut self, id: ProductId, emit: &SavedEmitter) {
        let removed = self.network.run(self.saved.remove(&id)).await;
        match removed {
            Ok(()) => {
                self.loaded = self.loaded.saturating_sub(1);
                emit.emit(SavedOutcome::Removed(id));
            }
            Err(e) => {
                tracing::warn!(error = %e, product = %id, "failed to remove saved item");
                self.messages.push(e.user_message());
            }
        }
    }
}

#[async_trait]
impl Pipeline for SavedPipeline {
    const NAME: &'static str = "saved";

    type Action = SavedAction;
    type Reducer = SavedReducer;
    type Event = SavedEvent;

    async fn process(&mut self, action: SavedAction, emit: &SavedEmitter) {
        match action {
            SavedAction::Fetch => self.fetch(emit).await,
            SavedAction::LoadMore => self.load_more(emit).await,
            SavedAction::ChangeSort(sort) => {
                self.sort = sort;
                emit.emit(SavedOutcome::SortChanged(sort));
            }
            SavedAction::Remove(id) => self.remove(id, emit).await,
            SavedAction::Open(id) => emit.event(SavedEvent::OpenProduct(id)),
        }
    }

    fn on_reconnect(state: &SavedState) -> Option<SavedAction> {
        match state {
            SavedState::Error { .. } => Some(SavedAction::Fetch),
            _ => None,
        }
    }
}
