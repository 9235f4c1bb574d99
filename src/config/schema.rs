//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the route table.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::Route;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Prefix stripped from request paths before matching (e.g., "/app").
    pub base_path: Option<String>,

    /// Route definitions, in registration order.
    pub routes: Vec<Route>,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Trie build cache settings.
    pub cache: CacheConfig,

    /// Config file watch settings.
    pub watch: WatchConfig,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log format (pretty, json).
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

/// Trie build cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Reuse built tries for identical route sets.
    pub enabled: bool,

    /// Maximum number of cached tries.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 8,
        }
    }
}

/// Config file watcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Poll interval for the file watcher in seconds.
    pub poll_interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert!(config.routes.is_empty());
        assert!(config.base_path.is_none());
        assert_eq!(config.observability.log_level, "info");
        assert!(config.cache.enabled);
        assert_eq!(config.watch.poll_interval_secs, 2);
    }

    #[test]
    fn test_routes_keep_file_order() {
        let config: RouterConfig = toml::from_str(
            r#"
            base_path = "/app"

            [[routes]]
            name = "issue"
            path = "/browse/:issueKey"
            exact = true
            query = ["view?"]

            [[routes]]
            path = "/browse"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_path.as_deref(), Some("/app"));
        assert_eq!(config.routes[0].label(), "issue");
        assert!(config.routes[0].exact);
        assert_eq!(config.routes[0].query, vec!["view?".to_string()]);
        assert_eq!(config.routes[1].path, "/browse");
        assert!(!config.routes[1].exact);
    }
}
