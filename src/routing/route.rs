//! Registered route definitions.

use serde::{Deserialize, Serialize};

/// Index of a route inside the trie that owns it.
pub type RouteId = usize;

/// A registered path template and its metadata.
///
/// Routes are immutable once registered; the trie owns them and its nodes
/// refer to them by [`RouteId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Route {
    /// Route identifier for logging and CLI output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Path template, e.g. `/browse/:issueKey`.
    pub path: String,

    /// Whether the template must consume the entire request path.
    #[serde(default)]
    pub exact: bool,

    /// Query requirements (`key`, `key?`, `key=value`, `key!=value`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<String>,
}

impl Route {
    /// Create a non-exact route for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            name: None,
            path: path.into(),
            exact: false,
            query: Vec::new(),
        }
    }

    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_query(mut self, spec: impl Into<String>) -> Self {
        self.query.push(spec.into());
        self
    }

    /// Name if set, otherwise the template.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let route = Route::new("/browse/:key").exact().named("issue").with_query("view?");
        assert!(route.exact);
        assert_eq!(route.label(), "issue");
        assert_eq!(route.query, vec!["view?".to_string()]);
        assert_eq!(Route::new("/a").label(), "/a");
    }

    #[test]
    fn test_deserialize_defaults() {
        let route: Route = toml::from_str(r#"path = "/about""#).unwrap();
        assert_eq!(route, Route::new("/about"));
    }
}
