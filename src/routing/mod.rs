//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup / on reload):
//!     Route[]
//!     → template (parse + compile each template)
//!     → expand.rs (literal / wildcard / unsupported tokens)
//!     → trie.rs (insert under leading literal segments)
//!     → Freeze as immutable RouteTrie, publish via table.rs
//!
//! Incoming request path:
//!     → matcher.rs (descend trie, collect candidates)
//!     → candidates evaluated deepest / latest first
//!     → Return: RouteMatch or NoMatch
//! ```
//!
//! # Design Decisions
//! - Tries compiled once, immutable at runtime
//! - Deterministic: same route set and path always pick the same route
//! - Later, more specific routes override earlier, general ones

pub mod cache;
pub mod expand;
pub mod matcher;
pub mod route;
pub mod table;
pub mod trie;

pub use cache::TrieCache;
pub use matcher::{match_route, RouteMatch};
pub use route::{Route, RouteId};
pub use table::{RouteSnapshot, RouteTable};
pub use trie::{build_trie, RejectedRoute, RouteTrie, SegmentKey, TrieBuild};
