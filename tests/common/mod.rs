//! Shared test utilities: a seeded backend wired to a controllable network.

#![allow(dead_code, unused_imports)]

use std::future::Future;
use std::time::Duration;

use storefront::config::Config;
use storefront::messages::MessageQueue;
use storefront::network::{ConnectivityMonitor, NetworkGuard};
use storefront::repository::memory::MemoryBackend;
use storefront::repository::Services;

pub struct Harness {
    pub config: Config,
    pub backend: MemoryBackend,
    pub monitor: ConnectivityMonitor,
    pub messages: MessageQueue,
    pub services: Services,
}

impl Harness {
    pub fn new(signed_in: bool, online: bool) -> Self {
        Self::with_config(Config::default(), signed_in, online)
    }

    pub fn with_config(config: Config, signed_in: bool, online: bool) -> Self {
        let monitor = ConnectivityMonitor::new(online);
        let messages = MessageQueue::new();
        let network = NetworkGuard::new(monitor.status(), &config.network);
        let backend = MemoryBackend::seeded(signed_in);
        let services = backend.services(network, messages.clone());
        Self {
            config,
            backend,
            monitor,
            messages,
            services,
        }
    }

    pub fn message_texts(&self) -> Vec<String> {
        self.messages.pending().into_iter().map(|m| m.text).collect()
    }
}

/// Await `fut`, failing the test if it takes longer than five seconds.
pub async fn within<F: Future>(fut: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(5), fut)
        .await
        .expect("Timed out waiting for screen")
}

/// Let spawned tasks run until they are idle.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
