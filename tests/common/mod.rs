//! Shared utilities for integration tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use route_trie::{QueryParams, Route, RouteTrie};

static CONFIG_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Exact routes for each template, in order.
#[allow(dead_code)]
pub fn exact_routes(paths: &[&str]) -> Vec<Route> {
    paths.iter().map(|path| Route::new(*path).exact()).collect()
}

/// Template of the route matching `pathname`, if any.
#[allow(dead_code)]
pub fn matched<'a>(trie: &'a RouteTrie, pathname: &str) -> Option<&'a str> {
    trie.match_route(pathname, None, None)
        .map(|found| found.route.path.as_str())
}

/// Like [`matched`], with a raw query string.
#[allow(dead_code)]
pub fn matched_with_query<'a>(trie: &'a RouteTrie, pathname: &str, query: &str) -> Option<&'a str> {
    let query = QueryParams::from_query_str(query);
    trie.match_route(pathname, Some(&query), None)
        .map(|found| found.route.label())
}

/// Write `contents` to a fresh file in the system temp dir.
#[allow(dead_code)]
pub fn write_config(contents: &str) -> PathBuf {
    let seq = CONFIG_SEQ.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "route-trie-test-{}-{}.toml",
        std::process::id(),
        seq
    ));
    std::fs::write(&path, contents).unwrap();
    path
}
