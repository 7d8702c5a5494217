use std::sync::Arc;

use async_trait::async_trait;

use super::action::{CartAction, CartEvent};
use super::outcome::CartOutcome;
use super::reducer::CartReducer;
use super::state::CartState;
use crate::domain::CartLine;
use crate::messages::MessageQueue;
use crate::network::NetworkGuard;
use crate::repository::{CartRepository, RepositoryError, Services};
use crate::ui::mvi::{Emitter, Pipeline};

type CartEmitter = Emitter<CartReducer, CartEvent>;

/// Cart screen effects.
///
/// Every mutation is written to the repository first and the cart is then
/// re-read, so selection and membership always reach the state together in
/// a single `Synced` outcome. `lines` mirrors the last read for checkout.
pub struct CartPipeline {
    cart: Arc<dyn CartRepository>,
    network: NetworkGuard,
    messages: MessageQueue,
    lines: Vec<CartLine>,
}

impl CartPipeline {
    pub fn new(services: &Services) -> Self {
        Self {
            cart: services.cart.clone(),
            network: services.network.clone(),
            messages: services.messages.clone(),
            lines: Vec::new(),
        }
    }

    async fn fetch(&mut self, emit: &CartEmitter) {
        emit.emit(CartOutcome::Loading);
        match self.network.run(self.cart.lines()).await {
            Ok(lines) => self.publish(lines, emit),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load cart");
                emit.emit(CartOutcome::Failed(e.user_message()));
            }
        }
    }

    /// Run a write, then resynchronize from the repository.
    async fn mutate<F>(&mut self, write: F, emit: &CartEmitter)
    where
        F: std::future::Future<Output = Result<(), RepositoryError>> + Send,
    {
        let synced = async {
            self.network.run(write).await?;
            self.cart.lines().await
        }
        .await;

        match synced {
            Ok(lines) => self.publish(lines, emit),
            Err(e) => {
                tracing::warn!(error = %e, "cart update failed");
                self.messages.push(e.user_message());
            }
        }
    }

    fn publish(&mut self, lines: Vec<CartLine>, emit: &CartEmitter) {
        self.lines = lines.clone();
        emit.emit(CartOutcome::Synced(lines));
    }

    fn checkout(&self, emit: &CartEmitter) {
        let selected: Vec<&CartLine> = self.lines.iter().filter(|line| line.selected).collect();
        if selected.is_empty() {
            self.messages.push("Select at least one item to check out.");
            return;
        }
        emit.event(CartEvent::NavigateToCheckout {
            items: selected.iter().map(|line| line.product.id.clone()).collect(),
            total_cents: selected.iter().map(|line| line.total_cents()).sum(),
        });
    }
}

#[async_trait]
impl Pipeline for CartPipeline {
    const NAME: &'static str = "cart";

    type Action = CartAction;
    type Reducer = CartReducer;
    type Event = CartEvent;

    async fn process(&mut self, action: CartAction, emit: &CartEmitter) {
        match action {
            CartAction::Fetch => self.fetch(emit).await,
            CartAction::Add { product, quantity } => {
                let cart = Arc::clone(&self.cart);
                self.mutate(async move { cart.add(product, quantity).await }, emit)
                    .await;
            }
            CartAction::Remove(id) => {
                let cart = Arc::clone(&self.cart);
                self.mutate(async move { cart.remove(&id).await }, emit).await;
            }
            CartAction::UpdateSelection { id, selected } => {
                let cart = Arc::clone(&self.cart);
                self.mutate(async move { cart.set_selected(&id, selected).await }, emit)
                    .await;
            }
            CartAction::UpdateAllSelection(selected) => {
                let cart = Arc::clone(&self.cart);
                self.mutate(async move { cart.set_all_selected(selected).await }, emit)
                    .await;
            }
            CartAction::Checkout => self.checkout(emit),
        }
    }

    fn on_reconnect(state: &CartState) -> Option<CartAction> {
        match state {
            CartState::Error { .. } => Some(CartAction::Fetch),
            _ => None,
        }
    }
}
