//! Memoized trie builds keyed by route-set fingerprint.
//!
//! # Design Decisions
//! - The key covers the full ordered route set, so any change to a route
//!   (path, exact flag, name, query) or to registration order misses
//! - `invalidate` drops everything; use it after out-of-band changes
//! - Bounded: an arbitrary entry is evicted when full

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use dashmap::DashMap;

use crate::observability::metrics;
use crate::routing::route::Route;
use crate::routing::trie::{build_trie, RouteTrie};

/// Fingerprint of an ordered route set. Stable for the life of the process.
pub fn fingerprint(routes: &[Route]) -> u64 {
    let mut hasher = DefaultHasher::new();
    routes.hash(&mut hasher);
    hasher.finish()
}

/// A thread-safe cache of built tries.
#[derive(Debug)]
pub struct TrieCache {
    entries: DashMap<u64, Arc<RouteTrie>>,
    max_entries: usize,
}

impl TrieCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Return the cached trie for `routes`, building it on a miss.
    pub fn get_or_build(&self, routes: &[Route]) -> Arc<RouteTrie> {
        let key = fingerprint(routes);

        if let Some(hit) = self.entries.get(&key) {
            metrics::record_cache_lookup(true);
            tracing::debug!(fingerprint = key, "Trie cache hit");
            return Arc::clone(hit.value());
        }

        metrics::record_cache_lookup(false);
        tracing::debug!(fingerprint = key, routes = routes.len(), "Trie cache miss");
        let trie = Arc::new(build_trie(routes.iter().cloned()));

        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            let victim = self.entries.iter().next().map(|entry| *entry.key());
            if let Some(victim) = victim {
                self.entries.remove(&victim);
            }
        }
        self.entries.insert(key, Arc::clone(&trie));

        trie
    }

    /// Drop every cached trie.
    pub fn invalidate(&self) {
        self.entries.clear();
        tracing::debug!("Trie cache invalidated");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
