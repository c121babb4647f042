//! Application state.
//!
//! Every request handler shares one [`QueryCache`], so all writes pass
//! through its invalidation path and all reads share its cached results.

use std::sync::Arc;

use tokio::sync::broadcast;

use subsync_core::cache::{CacheEvent, Freshness};
use subsync_core::storage::{MemberRepository, PaymentRepository, ReminderRepository};

use crate::cache::QueryCache;
use crate::config::Config;
use crate::seed::{SeedInitializer, SeedOutcome};
use crate::storage::{DocumentRepository, InMemoryDocumentStore};

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Cached read path and write-through repository.
    pub queries: Arc<QueryCache>,
    /// Runs the sample-data seed at most once.
    pub seeder: Arc<SeedInitializer>,
    /// Name rendered into reminder templates.
    pub organization_name: Arc<str>,
    /// Shutdown signal sender.
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Creates AppState backed by the in-memory document store.
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(InMemoryDocumentStore::new());
        let repository = Arc::new(DocumentRepository::new(store));
        Self::with_repository(repository, config)
    }

    /// Creates AppState over any repository implementing the three
    /// membership repository traits.
    pub fn with_repository<R>(repository: Arc<R>, config: &Config) -> Self
    where
        R: MemberRepository + PaymentRepository + ReminderRepository + 'static,
    {
        let queries = QueryCache::from_repository(
            repository,
            Freshness::new(config.cache_ttl()),
            config.cache_event_capacity,
        );
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            queries: Arc::new(queries),
            seeder: Arc::new(SeedInitializer::new()),
            organization_name: Arc::from(config.organization_name.as_str()),
            shutdown_tx,
        }
    }

    /// Seeds sample data if the store is empty. Never fails.
    pub async fn seed(&self) -> SeedOutcome {
        self.seeder.run(self.queries.as_ref()).await
    }

    /// Subscribe to cache events.
    pub fn subscribe_cache_events(&self) -> broadcast::Receiver<CacheEvent> {
        self.queries.subscribe()
    }

    /// Subscribe to shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal background tasks to shut down.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Spawns a task that logs cache events until shutdown.
    pub fn spawn_cache_event_logger(&self) {
        let mut events = self.subscribe_cache_events();
        let mut shutdown_rx = self.subscribe_shutdown();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = events.recv() => {
                        match result {
                            Ok(event) => {
                                tracing::trace!(key = %event.key(), event = ?event, "Cache event");
                            }
                            Err(broadcast::error::RecvError::Lagged(n)) => {
                                tracing::warn!(lagged = n, "Cache event logger lagged");
                            }
                            Err(broadcast::error::RecvError::Closed) => break,
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::debug!("Cache event logger shutting down");
                        break;
                    }
                }
            }
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
