//! Token expansion for trie indexing.
//!
//! # Responsibilities
//! - Split multi-segment literals into one token per path segment
//! - Collapse single-segment parameters into the wildcard symbol
//! - Mark every other shape as unsupported
//!
//! # Design Decisions
//! - Pure and total: unusual shapes degrade into `Unsupported`, never an error
//! - A segment that shares text with a parameter (`foo-` in `/foo-:id`) is
//!   not a whole segment and so cannot be a trie key

use crate::template::{Modifier, Param, ParamPattern, Token};

/// A template token classified for indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandedToken {
    /// A whole literal path segment.
    Literal(String),
    /// A parameter matching exactly one segment.
    Wildcard,
    /// Anything the trie cannot index; ends the literal prefix.
    Unsupported,
}

/// Expand parsed tokens into a flat sequence of classified segments.
pub fn expand_tokens(tokens: &[Token]) -> Vec<ExpandedToken> {
    let mut expanded = Vec::with_capacity(tokens.len());

    for (index, token) in tokens.iter().enumerate() {
        let next = tokens.get(index + 1);
        match token {
            Token::Literal(text) => {
                let glued_to_prev = index > 0 && !text.starts_with('/');
                let glued_to_next = glued_param(next);
                expand_literal(text, glued_to_prev, glued_to_next, &mut expanded);
            }
            Token::Param(param) => expanded.push(classify_param(param, next)),
        }
    }

    expanded
}

fn expand_literal(text: &str, glued_to_prev: bool, glued_to_next: bool, out: &mut Vec<ExpandedToken>) {
    let segments: Vec<&str> = text.split('/').collect();
    let last = segments.len() - 1;

    for (index, segment) in segments.into_iter().enumerate() {
        if segment.is_empty() {
            continue;
        }
        let glued = (index == 0 && glued_to_prev) || (index == last && glued_to_next);
        out.push(if glued {
            ExpandedToken::Unsupported
        } else {
            ExpandedToken::Literal(segment.to_string())
        });
    }
}

fn classify_param(param: &Param, next: Option<&Token>) -> ExpandedToken {
    let single_segment = param.pattern == ParamPattern::Segment
        && param.modifier == Modifier::Single
        && param.prefix == "/";
    let glued_to_next = matches!(next, Some(Token::Literal(text)) if !text.starts_with('/'))
        || glued_param(next);

    if single_segment && !glued_to_next {
        ExpandedToken::Wildcard
    } else {
        ExpandedToken::Unsupported
    }
}

fn glued_param(token: Option<&Token>) -> bool {
    matches!(token, Some(Token::Param(param)) if param.prefix.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse;
    use ExpandedToken::*;

    fn expand(template: &str) -> Vec<ExpandedToken> {
        expand_tokens(&parse(template).unwrap())
    }

    fn lit(segment: &str) -> ExpandedToken {
        Literal(segment.to_string())
    }

    #[test]
    fn test_literals_split_per_segment() {
        assert_eq!(expand("/jira/software/projects"), vec![lit("jira"), lit("software"), lit("projects")]);
        assert_eq!(expand("/"), vec![]);
        assert_eq!(expand("/a//b/"), vec![lit("a"), lit("b")]);
    }

    #[test]
    fn test_single_segment_params_become_wildcards() {
        assert_eq!(
            expand("/projects/:key/board"),
            vec![lit("projects"), Wildcard, lit("board")]
        );
        assert_eq!(expand("/:first"), vec![Wildcard]);
    }

    #[test]
    fn test_other_param_shapes_are_unsupported() {
        assert_eq!(expand("/docs/:path*"), vec![lit("docs"), Unsupported]);
        assert_eq!(expand("/docs/:path+"), vec![lit("docs"), Unsupported]);
        assert_eq!(expand("/posts/:id?"), vec![lit("posts"), Unsupported]);
        assert_eq!(expand("/issues/:id(\\d+)"), vec![lit("issues"), Unsupported]);
        assert_eq!(expand("/files/*"), vec![lit("files"), Unsupported]);
    }

    #[test]
    fn test_glued_segments_are_unsupported() {
        assert_eq!(expand("/api/v:version"), vec![lit("api"), Unsupported, Unsupported]);
        assert_eq!(expand("/export/:id.json"), vec![lit("export"), Unsupported, Unsupported]);
        assert_eq!(
            expand("/export/:id.json/raw"),
            vec![lit("export"), Unsupported, Unsupported, lit("raw")]
        );
    }
}
