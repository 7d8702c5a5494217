mod common;

use std::time::Duration;

use common::{settle, within, Harness};
use storefront::domain::{ProductId, SortOption};
use storefront::repository::SearchRepository;
use storefront::ui::mvi::{ScreenHandle, StateMachine};
use storefront::ui::search::{SearchAction, SearchEvent, SearchPipeline, SearchState};

fn search_screen(harness: &Harness) -> ScreenHandle<SearchPipeline> {
    StateMachine::new(&harness.config.engine)
        .spawn(SearchPipeline::new(&harness.services, &harness.config.search))
}

fn result_titles(state: &SearchState) -> Vec<String> {
    match state {
        SearchState::Results { products, .. } => products.iter().map(|p| p.title.clone()).collect(),
        other => panic!("Expected Results, got {other:?}"),
    }
}

async fn results(screen: &ScreenHandle<SearchPipeline>) -> SearchState {
    within(screen.wait_for(|s| {
        matches!(s, SearchState::Results { .. } | SearchState::Error { .. })
    }))
    .await
    .unwrap()
}

/// `(history, history_hidden)` of an `Init` state.
fn history_of(state: &SearchState) -> (Vec<String>, bool) {
    match state {
        SearchState::Init {
            history,
            history_hidden,
            ..
        } => (history.clone(), *history_hidden),
        other => panic!("Expected Init, got {other:?}"),
    }
}

/// Submit `queries` in order, then clear the query box and wait for the
/// history they leave behind.
async fn searched(screen: &ScreenHandle<SearchPipeline>, queries: &[&str]) -> SearchState {
    for query in queries {
        screen.submit(SearchAction::Submit(query.to_string()));
    }
    screen.submit(SearchAction::UpdateQuery(String::new()));
    within(screen.wait_for(|s| {
        matches!(s, SearchState::Init { history, .. } if history.len() == queries.len())
    }))
    .await
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn typing_fetches_suggestions_once_for_latest_query() {
    let harness = Harness::new(true, true);
    let screen = search_screen(&harness);

    for text in ["s", "sh", "sho"] {
        screen.submit(SearchAction::UpdateQuery(text.to_string()));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let state = within(screen.wait_for(|s| matches!(s, SearchState::Suggesting { .. })))
        .await
        .unwrap();

    assert_eq!(harness.backend.search.suggestion_queries(), vec!["sho"]);
    assert_eq!(
        state,
        SearchState::Suggesting {
            suggestions: vec![
                "Running Shoes".to_string(),
                "Short Sleeve Shirt".to_string(),
                "Shoulder Bag".to_string(),
                "Trail Shoes".to_string(),
                "Show Tickets Wallet".to_string(),
            ],
            query: "sho".to_string(),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn clearing_the_query_cancels_pending_suggestions() {
    let harness = Harness::new(true, true);
    let screen = search_screen(&harness);

    screen.submit(SearchAction::UpdateQuery("sho".to_string()));
    screen.submit(SearchAction::UpdateQuery(String::new()));
    settle().await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    settle().await;

    assert!(harness.backend.search.suggestion_queries().is_empty());
    assert!(matches!(screen.state(), SearchState::Init { ref query, .. } if query.is_empty()));
}

#[tokio::test(start_paused = true)]
async fn submit_cancels_suggestions_and_records_history() {
    let harness = Harness::new(true, true);
    let screen = search_screen(&harness);

    screen.submit(SearchAction::UpdateQuery("shoe".to_string()));
    screen.submit(SearchAction::Submit("shoes".to_string()));
    let state = results(&screen).await;

    tokio::time::sleep(Duration::from_secs(1)).await;
    settle().await;
    assert!(harness.backend.search.suggestion_queries().is_empty());
    assert_eq!(screen.state(), state);
    assert_eq!(result_titles(&state), vec!["Running Shoes", "Trail Shoes"]);

    screen.submit(SearchAction::Submit("mug".to_string()));
    screen.submit(SearchAction::UpdateQuery(String::new()));
    let state = within(screen.wait_for(|s| matches!(s, SearchState::Init { .. })))
        .await
        .unwrap();
    match state {
        SearchState::Init { history, .. } => assert_eq!(history, vec!["mug", "shoes"]),
        other => panic!("Expected Init, got {other:?}"),
    }
}

#[tokio::test]
async fn sort_reorders_results_and_relevance_restores_them() {
    let harness = Harness::new(true, true);
    let screen = search_screen(&harness);

    screen.submit(SearchAction::Submit("sh".to_string()));
    let relevance = result_titles(&results(&screen).await);

    screen.submit(SearchAction::ChangeSort(SortOption::PriceHighToLow));
    let state = within(screen.wait_for(|s| {
        matches!(s, SearchState::Results { sort: SortOption::PriceHighToLow, .. })
    }))
    .await
    .unwrap();
    assert_eq!(
        result_titles(&state),
        vec![
            "Trail Shoes",
            "Running Shoes",
            "Shoulder Bag",
            "Short Sleeve Shirt",
            "Show Tickets Wallet",
        ]
    );

    screen.submit(SearchAction::ChangeSort(SortOption::Relevance));
    let state = within(screen.wait_for(|s| {
        matches!(s, SearchState::Results { sort: SortOption::Relevance, .. })
    }))
    .await
    .unwrap();
    assert_eq!(result_titles(&state), relevance);
}

#[tokio::test]
async fn saving_while_signed_out_asks_for_login() {
    let harness = Harness::new(false, true);
    let screen = search_screen(&harness);

    screen.submit(SearchAction::Submit("mug".to_string()));
    results(&screen).await;
    screen.submit(SearchAction::ToggleSave(ProductId::from("p-106")));

    assert_eq!(
        within(screen.next_event()).await,
        Some(SearchEvent::NavigateToLogin)
    );
    assert!(!harness.backend.saved.ids().contains(&ProductId::from("p-106")));
}

#[tokio::test]
async fn saving_a_result_marks_it_saved() {
    let harness = Harness::new(true, true);
    let screen = search_screen(&harness);

    screen.submit(SearchAction::Submit("mug".to_string()));
    results(&screen).await;
    screen.submit(SearchAction::ToggleSave(ProductId::from("p-106")));

    let id = ProductId::from("p-106");
    within(screen.wait_for(|s| {
        matches!(s, SearchState::Results { saved_ids, .. } if saved_ids.contains(&id))
    }))
    .await
    .unwrap();
    assert!(harness.backend.saved.ids().contains(&id));
}

#[tokio::test(start_paused = true)]
async fn offline_search_fails_after_grace_delay() {
    let harness = Harness::new(true, false);
    let screen = search_screen(&harness);
    let started = tokio::time::Instant::now();

    screen.submit(SearchAction::Submit("shoes".to_string()));
    let state = results(&screen).await;

    assert!(started.elapsed() >= harness.config.network.grace());
    assert_eq!(
        state,
        SearchState::Error {
            message: "No internet connection. Check your network and try again.".to_string()
        }
    );
}

#[tokio::test]
async fn load_history_reads_stored_queries() {
    let harness = Harness::new(true, true);
    harness.backend.search.record_query("boots").await.unwrap();
    harness.backend.search.record_query("scarf").await.unwrap();
    let screen = search_screen(&harness);

    screen.submit(SearchAction::LoadHistory);
    let state = within(screen.wait_for(|s| {
        matches!(s, SearchState::Init { history, .. } if !history.is_empty())
    }))
    .await
    .unwrap();
    assert_eq!(history_of(&state), (vec!["scarf".to_string(), "boots".to_string()], false));
}

#[tokio::test]
async fn removing_a_history_entry_updates_the_list() {
    let harness = Harness::new(true, true);
    let screen = search_screen(&harness);
    let state = searched(&screen, &["shoes", "bag", "mug"]).await;
    assert_eq!(history_of(&state).0, vec!["mug", "bag", "shoes"]);

    screen.submit(SearchAction::RemoveHistory("bag".to_string()));
    let state = within(screen.wait_for(|s| {
        matches!(s, SearchState::Init { history, .. } if history.len() == 2)
    }))
    .await
    .unwrap();
    assert_eq!(history_of(&state).0, vec!["mug", "shoes"]);
    assert_eq!(
        harness.backend.search.history().await.unwrap(),
        vec!["mug", "shoes"]
    );
}

#[tokio::test]
async fn clearing_history_keeps_the_hidden_flag() {
    let harness = Harness::new(true, true);
    let screen = search_screen(&harness);
    searched(&screen, &["shoes", "mug"]).await;

    screen.submit(SearchAction::SetHistoryHidden(true));
    let state = within(screen.wait_for(|s| {
        matches!(s, SearchState::Init { history_hidden: true, .. })
    }))
    .await
    .unwrap();
    assert_eq!(history_of(&state).0, vec!["mug", "shoes"]);

    screen.submit(SearchAction::ClearHistory);
    let state = within(screen.wait_for(|s| {
        matches!(s, SearchState::Init { history, .. } if history.is_empty())
    }))
    .await
    .unwrap();
    assert_eq!(history_of(&state), (Vec::new(), true));
    assert!(harness.backend.search.history().await.unwrap().is_empty());

    screen.submit(SearchAction::SetHistoryHidden(false));
    let state = within(screen.wait_for(|s| {
        matches!(s, SearchState::Init { history_hidden: false, .. })
    }))
    .await
    .unwrap();
    assert_eq!(history_of(&state), (Vec::new(), false));
}

#[tokio::test]
async fn failed_history_removal_keeps_state_and_queues_message() {
    let harness = Harness::new(true, true);
    let screen = search_screen(&harness);
    let before = searched(&screen, &["shoes", "mug"]).await;

    harness.backend.search.set_failing(true);
    screen.submit(SearchAction::RemoveHistory("shoes".to_string()));
    within(async {
        while harness.messages.is_empty() {
            tokio::task::yield_now().await;
        }
    })
    .await;

    assert_eq!(screen.state(), before);
    assert_eq!(
        harness.message_texts(),
        vec!["Something went wrong. Please try again.".to_string()]
    );
    harness.backend.search.set_failing(false);
    assert_eq!(
        harness.backend.search.history().await.unwrap(),
        vec!["mug", "shoes"]
    );
}
