//! Hot-swappable route table.
//!
//! # Responsibilities
//! - Publish the current trie snapshot to any number of readers
//! - Rebuild off to the side on reload, then swap atomically
//!
//! # Design Decisions
//! - `ArcSwap` store: readers never lock and never see a half-built trie
//! - In-flight matches keep the snapshot they loaded
//! - Reloads go through the fingerprint cache when one is configured

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::mpsc;

use crate::config::RouterConfig;
use crate::observability::metrics;
use crate::routing::cache::TrieCache;
use crate::routing::matcher::RouteMatch;
use crate::routing::route::Route;
use crate::routing::trie::{build_trie, RouteTrie};
use crate::template::QueryParams;

/// One published generation of the route table.
#[derive(Debug)]
pub struct RouteSnapshot {
    pub trie: Arc<RouteTrie>,
    pub base_path: Option<String>,
}

impl RouteSnapshot {
    /// Match against this snapshot using its base path.
    pub fn match_route(&self, pathname: &str, query: Option<&QueryParams>) -> Option<RouteMatch<'_>> {
        self.trie.match_route(pathname, query, self.base_path.as_deref())
    }
}

/// Route table shared between request handlers and the reloader.
#[derive(Debug)]
pub struct RouteTable {
    current: ArcSwap<RouteSnapshot>,
    cache: Option<TrieCache>,
}

impl RouteTable {
    /// Create a table serving `trie`, without a build cache.
    pub fn new(trie: RouteTrie, base_path: Option<String>) -> Self {
        let snapshot = RouteSnapshot {
            trie: Arc::new(trie),
            base_path,
        };
        metrics::record_route_count(snapshot.trie.len());
        Self {
            current: ArcSwap::from_pointee(snapshot),
            cache: None,
        }
    }

    /// Create a table from configuration, with a build cache when enabled.
    pub fn from_config(config: &RouterConfig) -> Self {
        let cache = config
            .cache
            .enabled
            .then(|| TrieCache::new(config.cache.max_entries));
        let trie = match &cache {
            Some(cache) => cache.get_or_build(&config.routes),
            None => Arc::new(build_trie(config.routes.iter().cloned())),
        };
        metrics::record_route_count(trie.len());

        Self {
            current: ArcSwap::from_pointee(RouteSnapshot {
                trie,
                base_path: config.base_path.clone(),
            }),
            cache,
        }
    }

    /// The current snapshot. Holding it pins that generation.
    pub fn snapshot(&self) -> Arc<RouteSnapshot> {
        self.current.load_full()
    }

    pub fn cache(&self) -> Option<&TrieCache> {
        self.cache.as_ref()
    }

    /// Rebuild from a full route set and publish the result.
    pub fn reload(&self, routes: &[Route], base_path: Option<String>) {
        let trie = match &self.cache {
            Some(cache) => cache.get_or_build(routes),
            None => Arc::new(build_trie(routes.iter().cloned())),
        };
        let route_count = trie.len();

        self.current.store(Arc::new(RouteSnapshot { trie, base_path }));
        metrics::record_route_count(route_count);
        tracing::info!(routes = route_count, "Route table reloaded");
    }

    pub fn apply_config(&self, config: &RouterConfig) {
        self.reload(&config.routes, config.base_path.clone());
    }

    /// Apply configuration updates until the sender side closes.
    pub async fn apply_updates(&self, mut updates: mpsc::UnboundedReceiver<RouterConfig>) {
        while let Some(config) = updates.recv().await {
            self.apply_config(&config);
        }
        tracing::debug!("Route table update channel closed");
    }
}
