use async_trait::async_trait;

use super::{AuthRepository, RepositoryError};
use crate::domain::UserIdentity;
use crate::session::SessionStore;

/// Auth collaborator backed by a persisted session.
pub struct SessionAuth<S> {
    store: S,
}

impl<S: SessionStore> SessionAuth<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: SessionStore> AuthRepository for SessionAuth<S> {
    async fn current_user(&self) -> Result<Option<UserIdentity>, RepositoryError> {
        Ok(self.store.load()?)
    }

    async fn sign_in(&self, user: UserIdentity) -> Result<(), RepositoryError> {
        self.store.save(&user)?;
        tracing::info!(user = %user.id, "signed in");
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), RepositoryError> {
        self.store.clear()?;
        tracing::info!("signed out");
        Ok(())
    }
}
