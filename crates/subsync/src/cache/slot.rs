//! A single cached query.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{broadcast, Mutex, RwLock};

use subsync_core::cache::{CacheEvent, Clock, Freshness, QueryKey};
use subsync_core::storage::Result;

struct CachedQuery<T> {
    value: Arc<Vec<T>>,
    fetched_at: Instant,
    generation: u64,
}

/// The cached result of one collection query.
///
/// At most one fetch runs at a time: readers that find the slot stale queue
/// on the fetch lock and, once it is theirs, re-check freshness before
/// fetching, so concurrent readers share a single store read.
///
/// Invalidation bumps the slot's generation. A result is only served while
/// its generation is current, which makes a fetch that was in flight when
/// the invalidation happened stale as soon as it lands.
pub struct QuerySlot<T> {
    key: QueryKey,
    entry: RwLock<Option<CachedQuery<T>>>,
    fetch_lock: Mutex<()>,
    generation: AtomicU64,
    fetches: AtomicU64,
    events: broadcast::Sender<CacheEvent>,
}

impl<T: Send + Sync> QuerySlot<T> {
    pub fn new(key: QueryKey, events: broadcast::Sender<CacheEvent>) -> Self {
        Self {
            key,
            entry: RwLock::new(None),
            fetch_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
            fetches: AtomicU64::new(0),
            events,
        }
    }

    /// Returns the cached result if fresh, otherwise runs `fetch` and caches
    /// its result.
    ///
    /// A failed fetch is returned to the caller and leaves the slot as it was.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        clock: &dyn Clock,
        freshness: Freshness,
        fetch: F,
    ) -> Result<Arc<Vec<T>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        if let Some(value) = self.fresh(clock, freshness).await {
            tracing::trace!(key = %self.key, "Cache hit");
            return Ok(value);
        }

        let _guard = self.fetch_lock.lock().await;

        // Another reader may have refreshed the slot while we waited.
        if let Some(value) = self.fresh(clock, freshness).await {
            tracing::trace!(key = %self.key, "Cache hit after waiting on fetch");
            return Ok(value);
        }

        tracing::trace!(key = %self.key, "Cache miss");
        let generation = self.generation.load(Ordering::SeqCst);
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let value = Arc::new(fetch().await?);

        *self.entry.write().await = Some(CachedQuery {
            value: value.clone(),
            fetched_at: clock.now(),
            generation,
        });
        let _ = self.events.send(CacheEvent::Refreshed(self.key));

        Ok(value)
    }

    /// Marks the cached result stale. The next read refetches.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.events.send(CacheEvent::Invalidated(self.key));
        tracing::debug!(key = %self.key, "Query invalidated");
    }

    /// Number of fetches this slot has started.
    #[cfg(test)]
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    async fn fresh(&self, clock: &dyn Clock, freshness: Freshness) -> Option<Arc<Vec<T>>> {
        let entry = self.entry.read().await;
        let cached = entry.as_ref()?;
        let current = cached.generation == self.generation.load(Ordering::SeqCst);
        (current && freshness.is_fresh(cached.fetched_at, clock.now()))
            .then(|| cached.value.clone())
    }
}
