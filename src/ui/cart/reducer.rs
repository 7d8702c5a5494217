use crate::domain::CartLine;
use crate::ui::mvi::Reducer;

use super::outcome::CartOutcome;
use super::state::CartState;

pub struct CartReducer;

impl Reducer for CartReducer {
    type State = CartState;
    type Outcome = CartOutcome;

    fn reduce(_state: Self::State, outcome: Self::Outcome) -> Self::State {
        match outcome {
            CartOutcome::Loading => CartState::Loading,
            CartOutcome::Synced(lines) => {
                let all_selected = all_selected(&lines);
                CartState::Content {
                    lines,
                    all_selected,
                }
            }
            CartOutcome::Failed(message) => CartState::Error { message },
        }
    }
}

fn all_selected(lines: &[CartLine]) -> bool {
    !lines.is_empty() && lines.iter().all(|line| line.selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    fn line(id: &str, selected: bool) -> CartLine {
        CartLine {
            product: Product::new(id, id, "misc", 1000),
            quantity: 2,
            selected,
        }
    }

    #[test]
    fn synced_derives_all_selected() {
        let state = CartReducer::reduce(
            CartState::Loading,
            CartOutcome::Synced(vec![line("a", true), line("b", true)]),
        );
        assert!(state.all_selected());
        assert_eq!(state.selected_total_cents(), 4000);
    }

    #[test]
    fn partial_selection_is_not_all_selected() {
        let state = CartReducer::reduce(
            CartState::Loading,
            CartOutcome::Synced(vec![line("a", true), line("b", false)]),
        );
        assert!(!state.all_selected());
        assert_eq!(state.selected_total_cents(), 2000);
    }

    #[test]
    fn empty_cart_is_not_all_selected() {
        let state = CartReducer::reduce(CartState::Loading, CartOutcome::Synced(Vec::new()));
        assert!(matches!(state, CartState::Content { all_selected: false, .. }));
    }

    #[test]
    fn failed_replaces_content() {
        let content = CartReducer::reduce(
            CartState::Loading,
            CartOutcome::Synced(vec![line("a", true)]),
        );
        let state = CartReducer::reduce(content, CartOutcome::Failed("offline".to_string()));
        assert_eq!(
            state,
            CartState::Error {
                message: "offline".to_string()
            }
        );
    }

    #[test]
    fn reduce_is_deterministic() {
        let input = CartState::Content {
            lines: vec![line("a", false)],
            all_selected: false,
        };
        let outcome = CartOutcome::Synced(vec![line("a", true)]);
        let first = CartReducer::reduce(input.clone(), outcome.clone());
        let second = CartReducer::reduce(input, outcome);
        assert_eq!(first, second);
    }
}
