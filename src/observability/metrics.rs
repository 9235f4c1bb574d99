//! Metrics collection.
//!
//! # Metrics
//! - `route_trie_builds_total` (counter): trie builds
//! - `route_trie_rejected_routes_total` (counter): routes dropped for bad templates
//! - `route_trie_routes` (gauge): routes in the published table
//! - `route_trie_matches_total` (counter): lookups by outcome (hit, miss)
//! - `route_trie_candidates` (histogram): candidates collected per lookup
//! - `route_trie_cache_lookups_total` (counter): build cache lookups by result
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Recorded through the `metrics` facade; exporting is the host's concern

pub fn record_build(rejected: usize) {
    metrics::counter!("route_trie_builds_total").increment(1);
    if rejected > 0 {
        metrics::counter!("route_trie_rejected_routes_total").increment(rejected as u64);
    }
}

pub fn record_route_count(routes: usize) {
    metrics::gauge!("route_trie_routes").set(routes as f64);
}

pub fn record_match(hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    metrics::counter!("route_trie_matches_total", "outcome" => outcome).increment(1);
}

pub fn record_candidates(count: usize) {
    metrics::histogram!("route_trie_candidates").record(count as f64);
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    metrics::counter!("route_trie_cache_lookups_total", "result" => result).increment(1);
}
