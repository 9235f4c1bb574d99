//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and formats
//! - Detect duplicate route names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Template syntax is not checked here: a bad template rejects only its
//!   own route at build time

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::template::QuerySpec;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty path")]
    EmptyPath { index: usize },

    #[error("duplicate route name `{0}`")]
    DuplicateName(String),

    #[error("route `{route}` has an invalid query requirement `{spec}`")]
    InvalidQuery { route: String, spec: String },

    #[error("base_path `{0}` must start with `/` and must not end with `/`")]
    InvalidBasePath(String),

    #[error("unknown log level `{0}`")]
    UnknownLogLevel(String),

    #[error("unknown log format `{0}`")]
    UnknownLogFormat(String),

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.path.trim().is_empty() {
            errors.push(ValidationError::EmptyPath { index });
        }
        if let Some(name) = &route.name {
            if !names.insert(name.as_str()) {
                errors.push(ValidationError::DuplicateName(name.clone()));
            }
        }
        for spec in &route.query {
            if spec.parse::<QuerySpec>().is_err() {
                errors.push(ValidationError::InvalidQuery {
                    route: route.label().to_string(),
                    spec: spec.clone(),
                });
            }
        }
    }

    if let Some(base_path) = &config.base_path {
        if !base_path.starts_with('/') || (base_path.len() > 1 && base_path.ends_with('/')) {
            errors.push(ValidationError::InvalidBasePath(base_path.clone()));
        }
    }

    let observability = &config.observability;
    if !LOG_LEVELS.contains(&observability.log_level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(observability.log_level.clone()));
    }
    if !LOG_FORMATS.contains(&observability.log_format.as_str()) {
        errors.push(ValidationError::UnknownLogFormat(observability.log_format.clone()));
    }

    if config.cache.max_entries == 0 {
        errors.push(ValidationError::Zero { field: "cache.max_entries" });
    }
    if config.watch.poll_interval_secs == 0 {
        errors.push(ValidationError::Zero { field: "watch.poll_interval_secs" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Route;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.routes = vec![
            Route::new("").named("a"),
            Route::new("/x").named("a").with_query("!=1"),
        ];
        config.base_path = Some("app/".to_string());
        config.observability.log_level = "loud".to_string();
        config.cache.max_entries = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyPath { index: 0 },
                ValidationError::DuplicateName("a".to_string()),
                ValidationError::InvalidQuery {
                    route: "a".to_string(),
                    spec: "!=1".to_string()
                },
                ValidationError::InvalidBasePath("app/".to_string()),
                ValidationError::UnknownLogLevel("loud".to_string()),
                ValidationError::Zero { field: "cache.max_entries" },
            ]
        );
    }

    #[test]
    fn test_base_path_rules() {
        let mut config = RouterConfig::default();
        for (base_path, valid) in [("/app", true), ("/", true), ("/app/", false), ("app", false)] {
            config.base_path = Some(base_path.to_string());
            assert_eq!(validate_config(&config).is_ok(), valid, "{}", base_path);
        }
    }
}
