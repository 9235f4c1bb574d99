//! Trie descent and candidate disambiguation.
//!
//! # Responsibilities
//! - Walk the trie along the request path, collecting candidate routes
//! - Evaluate candidates against their full templates in precedence order
//! - Return the first success or an explicit no-match
//!
//! # Design Decisions
//! - Literal edges beat the wildcard edge at the same node
//! - Candidates are evaluated back to front: deeper nodes first, later
//!   registrations first within a node. A later, more specific route
//!   shadows an earlier, general one without removing it
//! - Candidates live in an append-only `Vec`; no sorting step
//! - No match is `None`, never an error

use serde::Serialize;

use crate::observability::metrics;
use crate::routing::route::{Route, RouteId};
use crate::routing::trie::RouteTrie;
use crate::template::{strip_base_path, MatchResult, QueryParams};

/// The winning route and what its template extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    #[serde(rename = "match")]
    pub matched: MatchResult,
}

impl RouteTrie {
    /// Route ids collected along the request path, in collection order.
    fn collect(&self, path: &str) -> Vec<RouteId> {
        let mut collected = self.root.routes.clone();
        let mut cursor = &self.root;

        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            match cursor.children.step(segment) {
                Some(next) => {
                    collected.extend_from_slice(&next.routes);
                    cursor = next;
                }
                None => break,
            }
        }

        collected
    }

    /// Candidate routes for `pathname`, in evaluation order.
    pub fn candidates(&self, pathname: &str, base_path: Option<&str>) -> Vec<&Route> {
        let Some(path) = strip_base_path(pathname, base_path.unwrap_or("")) else {
            return Vec::new();
        };
        self.collect(path)
            .into_iter()
            .rev()
            .map(|id| &self.routes[id].route)
            .collect()
    }

    /// Find the best matching route for a request.
    ///
    /// `query` and `base_path` are handed to each candidate's template
    /// unchanged; `base_path` is also stripped before descending the trie.
    pub fn match_route(
        &self,
        pathname: &str,
        query: Option<&QueryParams>,
        base_path: Option<&str>,
    ) -> Option<RouteMatch<'_>> {
        let Some(path) = strip_base_path(pathname, base_path.unwrap_or("")) else {
            tracing::trace!(pathname, base_path = ?base_path, "Path outside base path");
            metrics::record_match(false);
            return None;
        };

        let collected = self.collect(path);
        metrics::record_candidates(collected.len());

        let found = collected.iter().rev().find_map(|&id| {
            let compiled = &self.routes[id];
            compiled
                .template
                .matches(pathname, query, base_path)
                .map(|matched| RouteMatch {
                    route: &compiled.route,
                    matched,
                })
        });

        match &found {
            Some(found) => tracing::debug!(
                pathname,
                route = %found.route.label(),
                candidates = collected.len(),
                "Route matched"
            ),
            None => tracing::debug!(pathname, candidates = collected.len(), "No route matched"),
        }
        metrics::record_match(found.is_some());

        found
    }
}

/// Find the best matching route in `trie`. See [`RouteTrie::match_route`].
pub fn match_route<'a>(
    trie: &'a RouteTrie,
    pathname: &str,
    query: Option<&QueryParams>,
    base_path: Option<&str>,
) -> Option<RouteMatch<'a>> {
    trie.match_route(pathname, query, base_path)
}
