use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use super::action::{SearchAction, SearchEvent};
use super::outcome::SearchOutcome;
use super::reducer::SearchReducer;
use crate::config::SearchConfig;
use crate::domain::{Product, ProductId, SortOption};
use crate::messages::MessageQueue;
use crate::network::NetworkGuard;
use crate::repository::{AuthRepository, SavedRepository, SearchRepository, Services};
use crate::ui::mvi::{Debouncer, Emitter, Pipeline};

type SearchEmitter = Emitter<SearchReducer, SearchEvent>;

/// Search screen effects.
///
/// Suggestions run off the action loop behind a [`Debouncer`] so that
/// typing never blocks later actions and only the latest query is fetched.
/// Submitting a search cancels any pending suggestion fetch.
pub struct SearchPipeline {
    auth: Arc<dyn AuthRepository>,
    search: Arc<dyn SearchRepository>,
    saved: Arc<dyn SavedRepository>,
    network: NetworkGuard,
    messages: MessageQueue,
    debouncer: Debouncer,
    history_limit: usize,
    sort: SortOption,
    /// Last results in repository (relevance) order.
    results: Vec<Product>,
}

impl SearchPipeline {
    pub fn new(services: &Services, config: &SearchConfig) -> Self {
        Self {
            auth: services.auth.clone(),
            search: services.search.clone(),
            saved: services.saved.clone(),
            network: services.network.clone(),
            messages: services.messages.clone(),
            debouncer: Debouncer::new(config.debounce()),
            history_limit: config.history_limit,
            sort: SortOption::default(),
            results: Vec::new(),
        }
    }

    async fn history(&self) -> Vec<String> {
        match self.search.history().await {
            Ok(mut history) => {
                history.truncate(self.history_limit);
                history
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load search history");
                Vec::new()
            }
        }
    }

    fn sorted_results(&self) -> Vec<Product> {
        let mut products = self.results.clone();
        self.sort.apply(&mut products);
        products
    }

    async fn saved_ids(&self) -> HashSet<ProductId> {
        match self.auth.current_user().await {
            Ok(Some(_)) => self.saved.saved_ids().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to load saved ids for results");
                HashSet::new()
            }),
            Ok(None) => HashSet::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session");
                HashSet::new()
            }
        }
    }

    async fn update_query(&mut self, text: String, emit: &SearchEmitter) {
        emit.emit(SearchOutcome::QueryChanged(text.clone()));

        let query = text.trim().to_string();
        if query.is_empty() {
            self.debouncer.cancel();
            let history = self.history().await;
            emit.emit(SearchOutcome::Cleared { history });
            return;
        }

        let search = Arc::clone(&self.search);
        let network = self.network.clone();
        let emit = emit.clone();
        self.debouncer.schedule(async move {
            let fetched = network.run(search.suggestions(&query)).await;
            match fetched {
                Ok(suggestions) => emit.emit(SearchOutcome::Suggestions { query, suggestions }),
                Err(e) => tracing::debug!(error = %e, %query, "suggestions unavailable"),
            }
        });
    }

    async fn submit(&mut self, text: String, emit: &SearchEmitter) {
        self.debouncer.cancel();
        let query = text.trim().to_string();
        if query.is_empty() {
            return;
        }

        emit.emit(SearchOutcome::Searching(query.clone()));
        if let Err(e) = self.search.record_query(&query).await {
            tracing::warn!(error = %e, %query, "failed to record search history");
        }

        let found = self.network.run(self.search.search(&query)).await;
        match found {
            Ok(products) => {
                tracing::debug!(%query, count = products.len(), "search finished");
                self.results = products;
                let saved_ids = self.saved_ids().await;
                emit.emit(SearchOutcome::Found {
                    query,
                    products: self.sorted_results(),
                    sort: self.sort,
                    saved_ids,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, %query, "search failed");
                emit.emit(SearchOutcome::Failed(e.user_message()));
            }
        }
    }

    async fn toggle_save(&mut self, id: ProductId, emit: &SearchEmitter) {
        match self.auth.current_user().await {
            Ok(Some(_)) => {}
            Ok(None) => return emit.event(SearchEvent::NavigateToLogin),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session");
                return emit.event(SearchEvent::NavigateToLogin);
            }
        }

        let Some(product) = self.results.iter().find(|p| p.id == id).cloned() else {
            tracing::debug!(product = %id, "save toggled for product not in results");
            return;
        };

        match self.network.run(self.saved.toggle(&product)).await {
            Ok(saved) => emit.emit(SearchOutcome::SaveToggled { id, saved }),
            Err(e) => {
                tracing::warn!(error = %e, product = %id, "failed to toggle saved");
                self.messages.push(e.user_message());
            }
        }
    }

    async fn remove_history(&mut self, query: String, emit: &SearchEmitter) {
        if let Err(e) = self.search.remove_query(&query).await {
            tracing::warn!(error = %e, %query, "failed to remove history entry");
            self.messages.push(e.user_message());
            return;
        }
        emit.emit(SearchOutcome::HistoryLoaded(self.history().await));
    }

    async fn clear_history(&mut self, emit: &SearchEmitter) {
        if let Err(e) = self.search.clear_history().await {
            tracing::warn!(error = %e, "failed to clear history");
            self.messages.push(e.user_message());
            return;
        }
        emit.emit(SearchOutcome::HistoryLoaded(Vec::new()));
    }
}

#[async_trait]
impl Pipeline for SearchPipeline {
    const NAME: &'static str = "search";

    type Action = SearchAction;
    type Reducer = SearchReducer;
    type Event = SearchEvent;

    async fn process(&mut self, action: SearchAction, emit: &SearchEmitter) {
        match action {
            SearchAction::LoadHistory => {
                emit.emit(SearchOutcome::HistoryLoaded(self.history().await));
            }
            SearchAction::UpdateQuery(text) => self.update_query(text, emit).await,
            SearchAction::Submit(text) => self.submit(text, emit).await,
            SearchAction::ChangeSort(sort) => {
                self.sort = sort;
                emit.emit(SearchOutcome::Sorted {
                    sort,
                    products: self.sorted_results(),
                });
            }
            SearchAction::RemoveHistory(query) => self.remove_history(query, emit).await,
            SearchAction::ClearHistory => self.clear_history(emit).await,
            SearchAction::SetHistoryHidden(hidden) => {
                emit.emit(SearchOutcome::HistoryHidden(hidden));
            }
            SearchAction::ToggleSave(id) => self.toggle_save(id, emit).await,
        }
    }
}
