//! Path templates: parsing and full per-route matching.
//!
//! # Data Flow
//! ```text
//! "/browse/:issueKey"
//!     → parser.rs (template string → Token[])
//!     → path.rs (Token[] → anchored Regex)
//!     → query.rs (route query requirements)
//!     → CompiledTemplate::matches(pathname, query, base_path)
//!     → MatchResult { params, query, path, is_exact } or no match
//! ```
//!
//! # Design Decisions
//! - The routing trie only sees tokens; parameter names and patterns are
//!   re-derived here from the original template for every match
//! - Templates are compiled once at build time, never on the request path
//! - Parameter values are percent-decoded; undecodable values are kept raw

pub mod parser;
pub mod path;
pub mod query;

use std::collections::BTreeMap;

use serde::Serialize;

pub use parser::{parse, Modifier, Param, ParamName, ParamPattern, TemplateError, Token};
pub use path::{strip_base_path, PathMatcher};
pub use query::{QueryParams, QuerySpec, QueryValue};

/// Result of matching one route template against a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Bound path parameters, keyed by the names in the original template.
    pub params: BTreeMap<String, String>,
    /// Query values extracted for this route.
    pub query: QueryParams,
    /// The portion of the request path consumed by the template.
    pub path: String,
    /// Whether the template consumed the entire path.
    pub is_exact: bool,
}

/// A route template compiled for repeated matching.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    tokens: Vec<Token>,
    path: PathMatcher,
    query: Vec<QuerySpec>,
}

impl CompiledTemplate {
    /// Parse and compile a template together with its query requirements.
    pub fn compile(template: &str, exact: bool, query: &[String]) -> Result<Self, TemplateError> {
        let tokens = parse(template)?;
        let path = PathMatcher::compile(&tokens, exact)?;
        let query = query
            .iter()
            .map(|spec| spec.parse())
            .collect::<Result<Vec<QuerySpec>, _>>()?;

        Ok(Self { tokens, path, query })
    }

    /// Parsed tokens of the template.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn query_specs(&self) -> &[QuerySpec] {
        &self.query
    }

    /// Match a request against this template.
    ///
    /// Returns `None` when the path does not fit the template or when a query
    /// requirement is not met.
    pub fn matches(
        &self,
        pathname: &str,
        query: Option<&QueryParams>,
        base_path: Option<&str>,
    ) -> Option<MatchResult> {
        let path_match = self.path.matches(pathname, base_path)?;
        let query = query::check(&self.query, query)?;

        Some(MatchResult {
            params: path_match.params,
            query,
            path: path_match.path,
            is_exact: path_match.is_exact,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_and_match() {
        let template = CompiledTemplate::compile("/browse/:issueKey", true, &[]).unwrap();
        let result = template.matches("/browse/JRA-1", None, None).unwrap();

        assert_eq!(result.params.get("issueKey").map(String::as_str), Some("JRA-1"));
        assert_eq!(result.path, "/browse/JRA-1");
        assert!(result.is_exact);
    }

    #[test]
    fn test_query_requirement_blocks_match() {
        let template =
            CompiledTemplate::compile("/search", true, &["jql".to_string()]).unwrap();

        assert!(template.matches("/search", None, None).is_none());

        let query = QueryParams::from_query_str("jql=project%3DJRA");
        let result = template.matches("/search", Some(&query), None).unwrap();
        assert_eq!(
            result.query.get("jql"),
            Some(&QueryValue::One("project=JRA".to_string()))
        );
    }

    #[test]
    fn test_invalid_query_spec_fails_compile() {
        let err = CompiledTemplate::compile("/search", true, &["=x".to_string()]).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidQuery(_)));
    }
}
