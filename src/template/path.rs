//! Compiled path matching for a single template.

use std::borrow::Cow;
use std::collections::BTreeMap;

use regex::Regex;

use crate::template::parser::{Modifier, ParamName, TemplateError, Token};

/// Strip `base_path` from `pathname` at a segment boundary.
///
/// An empty base path strips nothing. Returns `None` when `pathname` lies
/// outside the base path (`/apple` is not under `/app`).
pub fn strip_base_path<'a>(pathname: &'a str, base_path: &str) -> Option<&'a str> {
    let base_path = base_path.trim_end_matches('/');
    if base_path.is_empty() {
        return Some(pathname);
    }

    let rest = pathname.strip_prefix(base_path)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Path portion of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    pub params: BTreeMap<String, String>,
    pub path: String,
    pub is_exact: bool,
}

/// A template compiled into an anchored regular expression.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    regex: Regex,
    names: Vec<ParamName>,
    exact: bool,
}

impl PathMatcher {
    /// Compile parsed tokens.
    ///
    /// With `exact`, the whole path must be consumed (one trailing `/` is
    /// tolerated). Otherwise the match must stop at a segment boundary.
    pub fn compile(tokens: &[Token], exact: bool) -> Result<Self, TemplateError> {
        let mut source = String::from("^");
        let mut names = Vec::new();

        for token in tokens {
            match token {
                Token::Literal(text) => source.push_str(&regex::escape(text)),
                Token::Param(param) => {
                    let prefix = regex::escape(&param.prefix);
                    let pattern = param.pattern.as_regex();
                    let group = match param.modifier {
                        Modifier::Single => format!("{prefix}({pattern})"),
                        Modifier::Optional => format!("(?:{prefix}({pattern}))?"),
                        Modifier::OneOrMore => {
                            format!("{prefix}((?:{pattern})(?:{prefix}(?:{pattern}))*)")
                        }
                        Modifier::ZeroOrMore => {
                            format!("(?:{prefix}((?:{pattern})(?:{prefix}(?:{pattern}))*))?")
                        }
                    };
                    source.push_str(&group);
                    names.push(param.name.clone());
                }
            }
        }

        let ends_with_slash = matches!(tokens.last(), Some(Token::Literal(text)) if text.ends_with('/'));
        match (exact, ends_with_slash) {
            (true, true) => source.push('$'),
            (true, false) => source.push_str("/?$"),
            (false, true) => {}
            (false, false) => source.push_str("(?:/|$)"),
        }

        let regex = Regex::new(&source).map_err(|e| TemplateError::InvalidPattern(e.to_string()))?;
        Ok(Self { regex, names, exact })
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Match a request path, optionally below `base_path`.
    pub fn matches(&self, pathname: &str, base_path: Option<&str>) -> Option<PathMatch> {
        let base_path = base_path.unwrap_or("").trim_end_matches('/');
        let subject = match strip_base_path(pathname, base_path)? {
            "" => "/",
            rest => rest,
        };

        let captures = self.regex.captures(subject)?;
        let whole = captures.get(0)?;

        let mut params = BTreeMap::new();
        for (index, name) in self.names.iter().enumerate() {
            if let Some(value) = captures.get(index + 1) {
                params.insert(name.to_string(), decode(value.as_str()).into_owned());
            }
        }

        let consumed = whole.as_str();
        let consumed = if consumed.len() > 1 {
            consumed.trim_end_matches('/')
        } else {
            consumed
        };

        Some(PathMatch {
            params,
            path: format!("{}{}", base_path, consumed),
            is_exact: whole.end() == subject.len(),
        })
    }
}

fn decode(value: &str) -> Cow<'_, str> {
    urlencoding::decode(value).unwrap_or(Cow::Borrowed(value))
}
