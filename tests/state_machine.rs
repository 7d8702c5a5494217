//! Engine behaviour with a minimal counter screen.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use common::{settle, within};
use storefront::config::EngineConfig;
use storefront::network::ConnectivityMonitor;
use storefront::ui::mvi::{Action, Emitter, Outcome, Pipeline, Reducer, StateMachine, UiState};

#[derive(Debug, Clone, PartialEq, Default)]
struct CounterState {
    applied: Vec<u32>,
    blocked: bool,
    failed: bool,
}

impl UiState for CounterState {}

#[derive(Debug, Clone)]
enum CounterAction {
    Add(u32),
    Block,
    Panic,
    Ping,
    Fail,
}

impl Action for CounterAction {}

#[derive(Debug)]
enum CounterOutcome {
    Added(u32),
    Blocked,
    Released,
    Failed,
}

impl Outcome for CounterOutcome {}

#[derive(Debug, PartialEq)]
enum CounterEvent {
    Pong,
}

struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Outcome = CounterOutcome;

    fn reduce(mut state: CounterState, outcome: CounterOutcome) -> CounterState {
        match outcome {
            CounterOutcome::Added(n) => state.applied.push(n),
            CounterOutcome::Blocked => state.blocked = true,
            CounterOutcome::Released => state.blocked = false,
            CounterOutcome::Failed => state.failed = true,
        }
        state
    }
}

struct CounterPipeline {
    gate: Arc<Notify>,
}

#[async_trait]
impl Pipeline for CounterPipeline {
    const NAME: &'static str = "counter";

    type Action = CounterAction;
    type Reducer = CounterReducer;
    type Event = CounterEvent;

    async fn process(&mut self, action: CounterAction, emit: &Emitter<CounterReducer, CounterEvent>) {
        match action {
            CounterAction::Add(n) => emit.emit(CounterOutcome::Added(n)),
            CounterAction::Block => {
                emit.emit(CounterOutcome::Blocked);
                self.gate.notified().await;
                emit.emit(CounterOutcome::Released);
            }
            CounterAction::Panic => panic!("boom"),
            CounterAction::Ping => emit.event(CounterEvent::Pong),
            CounterAction::Fail => emit.emit(CounterOutcome::Failed),
        }
    }

    fn on_reconnect(state: &CounterState) -> Option<CounterAction> {
        state.failed.then_some(CounterAction::Add(99))
    }
}

fn counter() -> (CounterPipeline, Arc<Notify>) {
    let gate = Arc::new(Notify::new());
    (CounterPipeline { gate: gate.clone() }, gate)
}

#[tokio::test]
async fn actions_fold_in_submission_order() {
    let (pipeline, _gate) = counter();
    let screen = StateMachine::new(&EngineConfig::default()).spawn(pipeline);

    for n in 1..=10 {
        screen.submit(CounterAction::Add(n));
    }

    let state = within(screen.wait_for(|s| s.applied.len() == 10))
        .await
        .unwrap();
    assert_eq!(state.applied, (1..=10).collect::<Vec<_>>());
    assert_eq!(screen.dropped_actions(), 0);
}

#[tokio::test]
async fn initial_state_is_observable_before_any_action() {
    let (pipeline, _gate) = counter();
    let initial = CounterState {
        applied: vec![7],
        ..Default::default()
    };
    let screen = StateMachine::new(&EngineConfig::default())
        .with_initial_state(initial.clone())
        .spawn(pipeline);

    assert_eq!(screen.state(), initial);
}

#[tokio::test]
async fn overflow_drops_oldest_pending_actions() {
    let (pipeline, gate) = counter();
    let screen = StateMachine::new(&EngineConfig::default()).spawn(pipeline);

    screen.submit(CounterAction::Block);
    within(screen.wait_for(|s| s.blocked)).await.unwrap();

    for n in 0..25 {
        screen.submit(CounterAction::Add(n));
    }
    assert_eq!(screen.dropped_actions(), 5);

    gate.notify_one();
    let state = within(screen.wait_for(|s| s.applied.len() == 20))
        .await
        .unwrap();
    assert_eq!(state.applied, (5..25).collect::<Vec<_>>());
    assert!(!state.blocked);
}

#[tokio::test]
async fn panicking_action_does_not_stop_the_screen() {
    let (pipeline, _gate) = counter();
    let screen = StateMachine::new(&EngineConfig::default()).spawn(pipeline);

    screen.submit(CounterAction::Panic);
    screen.submit(CounterAction::Add(1));

    let state = within(screen.wait_for(|s| !s.applied.is_empty()))
        .await
        .unwrap();
    assert_eq!(state.applied, vec![1]);
    assert!(!screen.is_closed());
}

#[tokio::test]
async fn events_bypass_state_and_are_delivered_once() {
    let (pipeline, _gate) = counter();
    let screen = StateMachine::new(&EngineConfig::default()).spawn(pipeline);
    let mut changes = screen.subscribe();
    let _ = changes.borrow_and_update();

    screen.submit(CounterAction::Ping);
    assert_eq!(within(screen.next_event()).await, Some(CounterEvent::Pong));
    assert_eq!(screen.try_next_event(), None);

    assert!(!changes.has_changed().unwrap());
    assert_eq!(screen.state(), CounterState::default());
}

#[tokio::test]
async fn subscribers_see_every_reduction() {
    let (pipeline, _gate) = counter();
    let screen = StateMachine::new(&EngineConfig::default()).spawn(pipeline);
    let mut changes = screen.subscribe();

    screen.submit(CounterAction::Add(3));
    within(changes.changed()).await.unwrap();
    assert_eq!(changes.borrow_and_update().applied, vec![3]);
}

#[tokio::test]
async fn closed_screen_ignores_actions_and_stops() {
    let (pipeline, _gate) = counter();
    let screen = StateMachine::new(&EngineConfig::default()).spawn(pipeline);

    screen.submit(CounterAction::Block);
    within(screen.wait_for(|s| s.blocked)).await.unwrap();

    screen.close();
    assert!(screen.is_closed());
    screen.submit(CounterAction::Add(1));

    // The worker drops the pipeline and its state sender once it stops.
    assert_eq!(within(screen.wait_for(|_| false)).await, None);
    assert!(screen.state().applied.is_empty());
    assert!(screen.state().blocked);
}

#[tokio::test(start_paused = true)]
async fn reconnect_submits_the_refresh_action() {
    let (pipeline, _gate) = counter();
    let monitor = ConnectivityMonitor::new(true);
    let screen = StateMachine::new(&EngineConfig::default())
        .with_connectivity(monitor.status())
        .spawn(pipeline);

    screen.submit(CounterAction::Fail);
    within(screen.wait_for(|s| s.failed)).await.unwrap();

    monitor.set_online(false);
    settle().await;
    assert!(screen.state().applied.is_empty());

    monitor.set_online(true);
    let state = within(screen.wait_for(|s| !s.applied.is_empty()))
        .await
        .unwrap();
    assert_eq!(state.applied, vec![99]);
}

#[tokio::test(start_paused = true)]
async fn staying_online_never_triggers_refresh() {
    let (pipeline, _gate) = counter();
    let monitor = ConnectivityMonitor::new(true);
    let screen = StateMachine::new(&EngineConfig::default())
        .with_connectivity(monitor.status())
        .spawn(pipeline);

    screen.submit(CounterAction::Fail);
    within(screen.wait_for(|s| s.failed)).await.unwrap();

    monitor.set_online(true);
    tokio::time::sleep(Duration::from_millis(50)).await;
    settle().await;
    assert!(screen.state().applied.is_empty());
}
