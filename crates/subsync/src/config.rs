use std::{env, time::Duration};

/// Organisation name used when rendering reminder templates.
pub const DEFAULT_ORGANIZATION_NAME: &str = "Radha Giridhari Sevaashram";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Query cache freshness window in seconds (default: 300)
    pub cache_ttl_seconds: u64,
    /// Capacity of the cache event channel (default: 64)
    pub cache_event_capacity: usize,
    /// Seed sample data into an empty store on startup (default: true)
    pub seed_sample_data: bool,
    /// Organisation name shown in reminder messages
    pub organization_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Query cache freshness window (default: 300)
    /// - `CACHE_EVENT_CAPACITY` - Cache event channel capacity (default: 64)
    /// - `SEED_SAMPLE_DATA` - Seed an empty store on startup (default: true)
    /// - `ORGANIZATION_NAME` - Name used in reminder messages
    pub fn from_env() -> Self {
        Self {
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_event_capacity: env::var("CACHE_EVENT_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
            seed_sample_data: env::var("SEED_SAMPLE_DATA")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),
            organization_name: env::var("ORGANIZATION_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ORGANIZATION_NAME.to_string()),
        }
    }

    /// Get the cache freshness window as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
