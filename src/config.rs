//! Configuration Module
//!
//! Loads cache and monitor settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

/// Runtime configuration.
///
/// All values can be configured via environment variables with defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Port of the stats monitor HTTP server
    pub monitor_port: u16,
    /// Period of the background expired-entry sweep
    pub cleanup_interval: Duration,
    /// Per-cache entry bound, 0 = unbounded
    pub max_entries: usize,
    pub ttl: CacheTtls,
}

/// Default TTL of each named cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheTtls {
    pub component: Duration,
    pub api: Duration,
    pub ui: Duration,
    pub dashboard: Duration,
    pub progress: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            component: Duration::from_secs(5 * 60),
            api: Duration::from_secs(5 * 60),
            ui: Duration::from_secs(60),
            dashboard: Duration::from_secs(2 * 60),
            progress: Duration::from_secs(10 * 60),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `MONITOR_PORT` (default: 3000)
    /// - `CLEANUP_INTERVAL_MS` (default: 30000)
    /// - `MAX_ENTRIES` (default: 1000)
    /// - `COMPONENT_CACHE_TTL_MS`, `API_CACHE_TTL_MS`, `UI_CACHE_TTL_MS`,
    ///   `DASHBOARD_CACHE_TTL_MS`, `PROGRESS_CACHE_TTL_MS`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Unparsable values are logged and replaced by their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let ms = |name: &str, default: Duration| {
            Duration::from_millis(parse_or(&lookup, name, millis(default)))
        };

        Self {
            monitor_port: parse_or(&lookup, "MONITOR_PORT", defaults.monitor_port),
            cleanup_interval: ms("CLEANUP_INTERVAL_MS", defaults.cleanup_interval),
            max_entries: parse_or(&lookup, "MAX_ENTRIES", defaults.max_entries),
            ttl: CacheTtls {
                component: ms("COMPONENT_CACHE_TTL_MS", defaults.ttl.component),
                api: ms("API_CACHE_TTL_MS", defaults.ttl.api),
                ui: ms("UI_CACHE_TTL_MS", defaults.ttl.ui),
                dashboard: ms("DASHBOARD_CACHE_TTL_MS", defaults.ttl.dashboard),
                progress: ms("PROGRESS_CACHE_TTL_MS", defaults.ttl.progress),
            },
        }
    }

    /// Rejects settings that cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cleanup_interval.is_zero() {
            return Err(ConfigError::ZeroCleanupInterval);
        }

        let ttls = [
            ("component", self.ttl.component),
            ("api", self.ttl.api),
            ("ui", self.ttl.ui),
            ("dashboard", self.ttl.dashboard),
            ("progress", self.ttl.progress),
        ];
        if let Some((name, _)) = ttls.iter().find(|(_, ttl)| ttl.is_zero()) {
            return Err(ConfigError::ZeroDefaultTtl(*name));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monitor_port: 3000,
            cleanup_interval: Duration::from_secs(30),
            max_entries: 1000,
            ttl: CacheTtls::default(),
        }
    }
}

fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {}={:?}, using default", name, raw);
            default
        }),
        None => default,
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
