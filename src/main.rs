use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use storefront::config::Config;
use storefront::domain::{SavedSort, SortOption};
use storefront::logging::init_tracing;
use storefront::messages::MessageQueue;
use storefront::network::{ConnectivityMonitor, NetworkGuard};
use storefront::repository::memory::MemoryBackend;
use storefront::ui::cart::{CartAction, CartPipeline, CartState};
use storefront::ui::home::{HomeAction, HomePipeline, HomeState};
use storefront::ui::mvi::{Pipeline, ScreenHandle, StateMachine, StateOf};
use storefront::ui::saved::{SavedAction, SavedPipeline, SavedState};
use storefront::ui::search::{SearchAction, SearchPipeline, SearchState};

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Drive a storefront screen against the demo catalog")]
struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start with connectivity down.
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    screen: Screen,
}

#[derive(Debug, Subcommand)]
enum Screen {
    /// Load the home feed.
    Home,
    /// Run a search.
    Search {
        query: String,
        /// relevance, price-asc, price-desc or title.
        #[arg(long, value_parser = parse_sort)]
        sort: Option<SortOption>,
    },
    /// Show the cart.
    Cart {
        #[arg(long)]
        select_all: bool,
    },
    /// Show saved items.
    Saved {
        /// date, price-asc or price-desc.
        #[arg(long, value_parser = parse_saved_sort)]
        sort: Option<SavedSort>,
    },
}

fn parse_sort(s: &str) -> Result<SortOption, String> {
    SortOption::parse(s).ok_or_else(|| format!("unknown sort '{s}'"))
}

fn parse_saved_sort(s: &str) -> Result<SavedSort, String> {
    SavedSort::parse(s).ok_or_else(|| format!("unknown sort '{s}'"))
}

#[derive(Serialize)]
struct Report<S> {
    screen: &'static str,
    state: S,
    messages: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading config")?;
    init_tracing(&config.logging.filter);

    let monitor = ConnectivityMonitor::new(!cli.offline);
    let messages = MessageQueue::new();
    let network = NetworkGuard::new(monitor.status(), &config.network);
    let backend = MemoryBackend::seeded(true);
    let services = backend.services(network, messages.clone());

    let output = match cli.screen {
        Screen::Home => {
            let screen = StateMachine::new(&config.engine)
                .with_connectivity(monitor.status())
                .spawn(HomePipeline::new(&services));
            screen.submit(HomeAction::Fetch);
            let state = settle(&screen, |s| !matches!(s, HomeState::Loading)).await?;
            render::<HomePipeline, _>(state, &messages)?
        }
        Screen::Search { query, sort } => {
            let screen = StateMachine::new(&config.engine)
                .spawn(SearchPipeline::new(&services, &config.search));
            if let Some(sort) = sort {
                screen.submit(SearchAction::ChangeSort(sort));
            }
            screen.submit(SearchAction::Submit(query));
            let state = settle(&screen, |s| {
                matches!(s, SearchState::Results { .. } | SearchState::Error { .. })
            })
            .await?;
            render::<SearchPipeline, _>(state, &messages)?
        }
        Screen::Cart { select_all } => {
            let screen = StateMachine::new(&config.engine).spawn(CartPipeline::new(&services));
            screen.submit(CartAction::Fetch);
            if select_all {
                screen.submit(CartAction::UpdateAllSelection(true));
            }
            let state = settle(&screen, |s| match s {
                CartState::Loading => false,
                CartState::Content { all_selected, .. } => *all_selected || !select_all,
                CartState::Error { .. } => true,
            })
            .await?;
            render::<CartPipeline, _>(state, &messages)?
        }
        Screen::Saved { sort } => {
            let screen = StateMachine::new(&config.engine)
                .spawn(SavedPipeline::new(&services, &config.saved));
            if let Some(sort) = sort {
                screen.submit(SavedAction::ChangeSort(sort));
            }
            screen.submit(SavedAction::Fetch);
            let state = settle(&screen, |s| !matches!(s, SavedState::Fetching)).await?;
            render::<SavedPipeline, _>(state, &messages)?
        }
    };

    println!("{output}");
    Ok(())
}

async fn settle<P, F>(screen: &ScreenHandle<P>, predicate: F) -> Result<StateOf<P>>
where
    P: Pipeline,
    F: FnMut(&StateOf<P>) -> bool,
{
    let state = screen
        .wait_for(predicate)
        .await
        .ok_or_else(|| anyhow!("{} screen stopped before settling", P::NAME));
    screen.close();
    state
}

fn render<P: Pipeline, S: Serialize>(state: S, messages: &MessageQueue) -> Result<String> {
    let report = Report {
        screen: P::NAME,
        state,
        messages: messages.pending().into_iter().map(|m| m.text).collect(),
    };
    serde_json::to_string_pretty(&report).context("serializing screen state")
}
