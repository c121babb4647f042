use std::time::{Duration, Instant};

/// How long a fetched query result is served without refetching.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Freshness policy for cached query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freshness {
    window: Duration,
}

impl Freshness {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns true while a result fetched at `fetched_at` may still be served.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::{Duration, Instant};
    /// use subsync_core::cache::Freshness;
    ///
    /// let policy = Freshness::default();
    /// let fetched = Instant::now();
    /// assert!(policy.is_fresh(fetched, fetched + Duration::from_secs(299)));
    /// assert!(!policy.is_fresh(fetched, fetched + Duration::from_secs(300)));
    /// ```
    pub fn is_fresh(&self, fetched_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(fetched_at) < self.window
    }
}

impl Default for Freshness {
    fn default() -> Self {
        Self::new(DEFAULT_FRESHNESS_WINDOW)
    }
}
