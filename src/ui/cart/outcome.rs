use crate::domain::CartLine;
use crate::ui::mvi::Outcome;

#[derive(Debug, Clone, PartialEq)]
pub enum CartOutcome {
    Loading,
    /// Authoritative cart contents, re-read after every mutation.
    Synced(Vec<CartLine>),
    Failed(String),
}

impl Outcome for CartOutcome {}
