use crate::domain::ProductId;
use crate::ui::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum HomeAction {
    Fetch,
    /// Reload while keeping the current feed on screen.
    Refresh,
    ToggleSave(ProductId),
    OpenProduct(ProductId),
}

impl Action for HomeAction {}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeEvent {
    NavigateToLogin,
    OpenProduct(ProductId),
}
