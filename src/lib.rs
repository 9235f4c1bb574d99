//! Prefix-Trie Route Matcher Library
//!
//! Indexes URL route templates by their leading literal segments so that a
//! request path is checked against a short candidate list instead of every
//! registered route.
//!
//! ```
//! use route_trie::{build_trie, Route};
//!
//! let trie = build_trie(vec![
//!     Route::new("/jira/:x").exact(),
//!     Route::new("/jira/software").exact(),
//! ]);
//!
//! let found = trie.match_route("/jira/software", None, None).unwrap();
//! assert_eq!(found.route.path, "/jira/software");
//!
//! let found = trie.match_route("/jira/servicedesk", None, None).unwrap();
//! assert_eq!(found.matched.params["x"], "servicedesk");
//! ```

pub mod config;
pub mod observability;
pub mod routing;
pub mod template;

pub use config::RouterConfig;
pub use routing::{build_trie, match_route, Route, RouteMatch, RouteTable, RouteTrie, TrieCache};
pub use template::{MatchResult, QueryParams, QueryValue, TemplateError};
