use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub saved: SavedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Buffers of the per-screen state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Action queue capacity; oldest actions are dropped beyond it (default: 20).
    #[serde(default = "default_buffer")]
    pub action_buffer: usize,
    /// Event queue capacity; oldest events are dropped beyond it (default: 20).
    #[serde(default = "default_buffer")]
    pub event_buffer: usize,
}

/// Search screen tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet window before fetching suggestions (default: 300).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Max remembered queries (default: 10).
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Delay before an offline guard reports "no connection" (default: 1000).
    #[serde(default = "default_grace_ms")]
    pub grace_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedConfig {
    /// Items fetched per saved-list page (default: 20).
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_buffer() -> usize {
    crate::ui::mvi::queue::DEFAULT_CAPACITY
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_history_limit() -> usize {
    10
}

fn default_grace_ms() -> u64 {
    1000
}

fn default_page_size() -> usize {
    20
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl NetworkConfig {
    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            action_buffer: default_buffer(),
            event_buffer: default_buffer(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            history_limit: default_history_limit(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            grace_ms: default_grace_ms(),
        }
    }
}

impl Default for SavedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
