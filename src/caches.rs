//! Platform Caches
//!
//! The named cache instances used by the learning platform, built once at
//! startup and handed to whatever needs them.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::cache::{shared, CacheStats, SharedCache, TtlCache};
use crate::config::Config;
use crate::domain::{DashboardSummary, LearnerProgress};
use crate::error::CacheError;

// == Cache Kind ==
/// Identifies one of the platform caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    /// Rendered component fragments
    Component,
    /// Upstream API responses
    Api,
    /// Transient UI state
    Ui,
    /// Dashboard aggregates
    Dashboard,
    /// Learner progress snapshots
    Progress,
}

impl CacheKind {
    pub const ALL: [CacheKind; 5] = [
        CacheKind::Component,
        CacheKind::Api,
        CacheKind::Ui,
        CacheKind::Dashboard,
        CacheKind::Progress,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CacheKind::Component => "component",
            CacheKind::Api => "api",
            CacheKind::Ui => "ui",
            CacheKind::Dashboard => "dashboard",
            CacheKind::Progress => "progress",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CacheKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CacheError::UnknownCache(s.to_string()))
    }
}

// == App Caches ==
/// Owns every platform cache. Cloning shares the same instances.
#[derive(Debug, Clone)]
pub struct AppCaches {
    component: SharedCache<String>,
    api: SharedCache<Value>,
    ui: SharedCache<Value>,
    dashboard: SharedCache<DashboardSummary>,
    progress: SharedCache<LearnerProgress>,
}

/// Runs the same expression against whichever typed cache `kind` names.
macro_rules! with_cache {
    ($self:ident, $kind:expr, |$cache:ident| $body:expr) => {
        match $kind {
            CacheKind::Component => {
                let $cache = &$self.component;
                $body
            }
            CacheKind::Api => {
                let $cache = &$self.api;
                $body
            }
            CacheKind::Ui => {
                let $cache = &$self.ui;
                $body
            }
            CacheKind::Dashboard => {
                let $cache = &$self.dashboard;
                $body
            }
            CacheKind::Progress => {
                let $cache = &$self.progress;
                $body
            }
        }
    };
}

impl AppCaches {
    // == Constructor ==
    pub fn from_config(config: &Config) -> Self {
        fn build<V>(kind: CacheKind, ttl: Duration, max_entries: usize) -> SharedCache<V> {
            shared(TtlCache::new(kind.as_str(), ttl).with_max_entries(max_entries))
        }

        let max = config.max_entries;
        Self {
            component: build(CacheKind::Component, config.ttl.component, max),
            api: build(CacheKind::Api, config.ttl.api, max),
            ui: build(CacheKind::Ui, config.ttl.ui, max),
            dashboard: build(CacheKind::Dashboard, config.ttl.dashboard, max),
            progress: build(CacheKind::Progress, config.ttl.progress, max),
        }
    }

    // == Accessors ==
    pub fn component(&self) -> &SharedCache<String> {
        &self.component
    }

    pub fn api(&self) -> &SharedCache<Value> {
        &self.api
    }

    pub fn ui(&self) -> &SharedCache<Value> {
        &self.ui
    }

    pub fn dashboard(&self) -> &SharedCache<DashboardSummary> {
        &self.dashboard
    }

    pub fn progress(&self) -> &SharedCache<LearnerProgress> {
        &self.progress
    }

    // == Maintenance ==
    pub async fn stats(&self, kind: CacheKind) -> CacheStats {
        with_cache!(self, kind, |cache| cache.read().await.stats())
    }

    /// Stats of every cache, in [`CacheKind::ALL`] order.
    pub async fn stats_all(&self) -> Vec<(CacheKind, CacheStats)> {
        let mut all = Vec::with_capacity(CacheKind::ALL.len());
        for kind in CacheKind::ALL {
            all.push((kind, self.stats(kind).await));
        }
        all
    }

    /// Empties one cache and returns how many entries it held.
    pub async fn clear(&self, kind: CacheKind) -> usize {
        with_cache!(self, kind, |cache| {
            let mut guard = cache.write().await;
            let count = guard.len();
            guard.clear();
            count
        })
    }

    pub async fn cleanup(&self, kind: CacheKind) -> usize {
        with_cache!(self, kind, |cache| cache.write().await.cleanup())
    }

    /// Sweeps every cache, locking one at a time.
    pub async fn cleanup_all(&self) -> usize {
        let mut removed = 0;
        for kind in CacheKind::ALL {
            removed += self.cleanup(kind).await;
        }
        removed
    }

    pub async fn reset_stats(&self, kind: CacheKind) -> CacheStats {
        with_cache!(self, kind, |cache| {
            let mut guard = cache.write().await;
            guard.reset_stats();
            guard.stats()
        })
    }
}
