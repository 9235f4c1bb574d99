//! Prefix trie over literal route segments.
//!
//! # Responsibilities
//! - Compile every route template once at build time
//! - Key each route by its leading run of literal segments
//! - Keep per-node route lists in registration order
//!
//! # Design Decisions
//! - Plain owned tree: each node exclusively owns its children
//! - Nodes hold route ids; the trie owns the routes themselves
//! - Immutable after `build` (shared across threads without locks)
//! - A bad template rejects only that route, never the whole build

use std::collections::HashMap;
use std::fmt;

use crate::observability::metrics;
use crate::routing::expand::{expand_tokens, ExpandedToken};
use crate::routing::route::{Route, RouteId};
use crate::template::{CompiledTemplate, TemplateError};

/// One trie edge label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentKey {
    Literal(String),
    Wildcard,
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKey::Literal(segment) => f.write_str(segment),
            SegmentKey::Wildcard => f.write_str("*"),
        }
    }
}

/// Outgoing edges of a node.
#[derive(Debug, Default)]
pub(crate) struct Branch {
    literal: HashMap<String, Node>,
    wildcard: Option<Box<Node>>,
}

impl Branch {
    /// Follow the edge for one request segment. Wildcard is a fallback only.
    pub(crate) fn step(&self, segment: &str) -> Option<&Node> {
        self.literal.get(segment).or(self.wildcard.as_deref())
    }

    fn entry(&mut self, key: SegmentKey) -> &mut Node {
        match key {
            SegmentKey::Literal(segment) => self.literal.entry(segment).or_default(),
            SegmentKey::Wildcard => &mut **self.wildcard.get_or_insert_with(Box::default),
        }
    }

    fn edges(&self) -> impl Iterator<Item = (SegmentKey, &Node)> {
        let mut literal: Vec<(&String, &Node)> = self.literal.iter().collect();
        literal.sort_by(|a, b| a.0.cmp(b.0));
        literal
            .into_iter()
            .map(|(segment, node)| (SegmentKey::Literal(segment.clone()), node))
            .chain(self.wildcard.as_deref().map(|node| (SegmentKey::Wildcard, node)))
    }
}

#[derive(Debug, Default)]
pub(crate) struct Node {
    /// Routes whose key ends here, in registration order.
    pub(crate) routes: Vec<RouteId>,
    pub(crate) children: Branch,
}

/// A route together with its compiled template.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pub route: Route,
    pub template: CompiledTemplate,
}

/// A route whose template could not be compiled.
#[derive(Debug, Clone)]
pub struct RejectedRoute {
    pub route: Route,
    pub error: TemplateError,
}

/// Output of [`RouteTrie::build`].
#[derive(Debug)]
pub struct TrieBuild {
    pub trie: RouteTrie,
    pub rejected: Vec<RejectedRoute>,
}

/// Immutable route index keyed by literal path prefixes.
#[derive(Debug, Default)]
pub struct RouteTrie {
    pub(crate) routes: Vec<CompiledRoute>,
    pub(crate) root: Node,
}

impl RouteTrie {
    /// A trie with no routes; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a trie from the full route set, in registration order.
    pub fn build<I>(routes: I) -> TrieBuild
    where
        I: IntoIterator<Item = Route>,
    {
        let mut trie = Self::empty();
        let mut rejected = Vec::new();

        for route in routes {
            let template = match CompiledTemplate::compile(&route.path, route.exact, &route.query) {
                Ok(template) => template,
                Err(error) => {
                    tracing::warn!(route = %route.label(), path = %route.path, error = %error, "Rejecting route with invalid template");
                    rejected.push(RejectedRoute { route, error });
                    continue;
                }
            };

            let key = insertion_key(&expand_tokens(template.tokens()));
            let id = trie.routes.len();
            tracing::trace!(route = %route.label(), depth = key.len(), "Indexing route");
            trie.routes.push(CompiledRoute { route, template });
            trie.insert(id, key);
        }

        tracing::info!(routes = trie.len(), rejected = rejected.len(), "Route trie built");
        metrics::record_build(rejected.len());

        TrieBuild { trie, rejected }
    }

    fn insert(&mut self, id: RouteId, key: Vec<SegmentKey>) {
        debug_assert!(id < self.routes.len(), "route {id} inserted before it was stored");
        let mut node = &mut self.root;
        for segment in key {
            node = node.children.entry(segment);
        }
        node.routes.push(id);
    }

    /// Number of indexed routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id).map(|compiled| &compiled.route)
    }

    /// Indexed routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().map(|compiled| &compiled.route)
    }

    /// Depth-first listing of every route with the key it is stored under.
    /// Literal edges are visited in sorted order, then the wildcard edge.
    pub fn entries(&self) -> Vec<(Vec<SegmentKey>, &Route)> {
        let mut out = Vec::with_capacity(self.len());
        let mut prefix = Vec::new();
        self.collect_entries(&self.root, &mut prefix, &mut out);
        out
    }

    fn collect_entries<'a>(
        &'a self,
        node: &'a Node,
        prefix: &mut Vec<SegmentKey>,
        out: &mut Vec<(Vec<SegmentKey>, &'a Route)>,
    ) {
        for &id in &node.routes {
            out.push((prefix.clone(), &self.routes[id].route));
        }
        for (key, child) in node.children.edges() {
            prefix.push(key);
            self.collect_entries(child, prefix, out);
            prefix.pop();
        }
    }
}

/// Build a trie, logging and dropping routes with invalid templates.
///
/// An empty route set yields an empty trie.
pub fn build_trie<I>(routes: I) -> RouteTrie
where
    I: IntoIterator<Item = Route>,
{
    RouteTrie::build(routes).trie
}

/// The maximal leading run of literal segments.
///
/// A route without literal prefix is keyed by the wildcard symbol when it
/// starts with a single-segment parameter and stays on the root otherwise.
fn insertion_key(expanded: &[ExpandedToken]) -> Vec<SegmentKey> {
    let key: Vec<SegmentKey> = expanded
        .iter()
        .map_while(|token| match token {
            ExpandedToken::Literal(segment) => Some(SegmentKey::Literal(segment.clone())),
            _ => None,
        })
        .collect();

    if key.is_empty() && expanded.first() == Some(&ExpandedToken::Wildcard) {
        return vec![SegmentKey::Wildcard];
    }
    key
}
