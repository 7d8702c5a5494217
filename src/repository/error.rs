use thiserror::Error;

use crate::domain::ProductId;
use crate::session::SessionError;

/// Failures surfaced by collaborator calls.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Raised by the network guard while offline.
    #[error("No internet connection")]
    NoConnection,

    #[error("Sign in required")]
    Unauthenticated,

    #[error("Product '{0}' not found")]
    NotFound(ProductId),

    /// Backend or data source failure.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl RepositoryError {
    /// User-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoConnection => {
                "No internet connection. Check your network and try again.".to_string()
            }
            Self::Unauthenticated => "Please sign in to continue.".to_string(),
            Self::NotFound(_) => "That item is no longer available.".to_string(),
            Self::Unavailable(_) | Self::Session(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}
