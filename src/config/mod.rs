pub mod loader;
pub mod store;
pub mod types;

pub use loader::ConfigError;
pub use store::ConfigStore;
pub use types::{
    Config, EngineConfig, LoggingConfig, NetworkConfig, SavedConfig, SearchConfig,
};
