//! Template string parsing.
//!
//! # Syntax
//! - `:name` named parameter matching one path segment
//! - `:name(pattern)` named parameter with a custom pattern
//! - `(pattern)` unnamed parameter, numbered from 0
//! - `*` unnamed parameter matching anything, separators included
//! - `?`, `*`, `+` after a parameter: optional, zero-or-more, one-or-more
//! - `\x` escapes `x` into literal text
//!
//! A `/` directly before a parameter becomes the parameter's prefix, so that
//! `/:id?` matches both `/` and `/42`.

use std::collections::HashSet;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

/// Errors raised while parsing or compiling a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// `:` not followed by a parameter name.
    #[error("missing parameter name at position {0}")]
    MissingName(usize),

    /// `(` without a matching `)`.
    #[error("unbalanced pattern starting at position {0}")]
    UnbalancedPattern(usize),

    #[error("empty pattern at position {0}")]
    EmptyPattern(usize),

    /// Capture groups would shift parameter numbering.
    #[error("capturing group not allowed in pattern at position {0}")]
    CapturingGroup(usize),

    #[error("trailing escape character")]
    TrailingEscape,

    #[error("duplicate parameter name `{0}`")]
    DuplicateParam(String),

    /// The assembled expression was rejected by the regex engine.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid query requirement `{0}`")]
    InvalidQuery(String),
}

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, possibly spanning several segments.
    Literal(String),
    Param(Param),
}

/// A parameter token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: ParamName,
    /// Either empty or `/`.
    pub prefix: String,
    pub pattern: ParamPattern,
    pub modifier: Modifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamName {
    Named(String),
    Index(usize),
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamName::Named(name) => f.write_str(name),
            ParamName::Index(index) => write!(f, "{}", index),
        }
    }
}

/// What a parameter accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamPattern {
    /// Any run of non-separator characters.
    Segment,
    /// Anything, separators included.
    Any,
    /// A user-supplied regular expression.
    Custom(String),
}

impl ParamPattern {
    pub fn as_regex(&self) -> &str {
        match self {
            ParamPattern::Segment => "[^/]+?",
            ParamPattern::Any => ".*",
            ParamPattern::Custom(pattern) => pattern,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Single,
    Optional,
    ZeroOrMore,
    OneOrMore,
}

/// Parse a template string into tokens.
pub fn parse(template: &str) -> Result<Vec<Token>, TemplateError> {
    Parser::new(template).run()
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
    tokens: Vec<Token>,
    literal: String,
    names: HashSet<String>,
    next_index: usize,
}

impl<'a> Parser<'a> {
    fn new(template: &'a str) -> Self {
        Self {
            chars: template.char_indices().peekable(),
            tokens: Vec::new(),
            literal: String::new(),
            names: HashSet::new(),
            next_index: 0,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, TemplateError> {
        while let Some((pos, ch)) = self.chars.next() {
            match ch {
                '\\' => {
                    let (_, escaped) = self.chars.next().ok_or(TemplateError::TrailingEscape)?;
                    self.literal.push(escaped);
                }
                ':' => {
                    let name = self.take_name();
                    if name.is_empty() {
                        return Err(TemplateError::MissingName(pos));
                    }
                    if !self.names.insert(name.clone()) {
                        return Err(TemplateError::DuplicateParam(name));
                    }
                    let pattern = match self.chars.peek() {
                        Some(&(open, '(')) => {
                            self.chars.next();
                            ParamPattern::Custom(self.take_pattern(open)?)
                        }
                        _ => ParamPattern::Segment,
                    };
                    self.push_param(ParamName::Named(name), pattern);
                }
                '(' => {
                    let pattern = ParamPattern::Custom(self.take_pattern(pos)?);
                    let name = self.next_name();
                    self.push_param(name, pattern);
                }
                '*' => {
                    let name = self.next_name();
                    self.push_param(name, ParamPattern::Any);
                }
                _ => self.literal.push(ch),
            }
        }

        self.flush_literal();
        Ok(self.tokens)
    }

    fn take_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                break;
            }
            name.push(ch);
            self.chars.next();
        }
        name
    }

    /// Consume a pattern body up to its closing `)`. The opening `(` is
    /// already consumed.
    fn take_pattern(&mut self, open: usize) -> Result<String, TemplateError> {
        let mut pattern = String::new();
        let mut depth = 1usize;

        while let Some((pos, ch)) = self.chars.next() {
            match ch {
                '\\' => {
                    let (_, escaped) = self.chars.next().ok_or(TemplateError::TrailingEscape)?;
                    pattern.push(ch);
                    pattern.push(escaped);
                    continue;
                }
                '(' => {
                    if !self.opens_non_capturing_group() {
                        return Err(TemplateError::CapturingGroup(pos));
                    }
                    depth += 1;
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        if pattern.is_empty() {
                            return Err(TemplateError::EmptyPattern(open));
                        }
                        return Ok(pattern);
                    }
                }
                _ => {}
            }
            pattern.push(ch);
        }

        Err(TemplateError::UnbalancedPattern(open))
    }

    /// `(?:`, `(?i)` and friends are fine; `(`, `(?P<..>` and `(?<..>` capture.
    fn opens_non_capturing_group(&mut self) -> bool {
        let mut ahead = self.chars.clone();
        match ahead.next() {
            Some((_, '?')) => !matches!(ahead.next(), Some((_, 'P')) | Some((_, '<'))),
            _ => false,
        }
    }

    fn next_name(&mut self) -> ParamName {
        let name = ParamName::Index(self.next_index);
        self.next_index += 1;
        name
    }

    fn push_param(&mut self, name: ParamName, pattern: ParamPattern) {
        let prefix = if self.literal.ends_with('/') {
            self.literal.pop();
            "/".to_string()
        } else {
            String::new()
        };
        self.flush_literal();

        let modifier = match self.chars.peek() {
            Some(&(_, '?')) => Modifier::Optional,
            Some(&(_, '*')) => Modifier::ZeroOrMore,
            Some(&(_, '+')) => Modifier::OneOrMore,
            _ => Modifier::Single,
        };
        if modifier != Modifier::Single {
            self.chars.next();
        }

        self.tokens.push(Token::Param(Param {
            name,
            prefix,
            pattern,
            modifier,
        }));
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            self.tokens.push(Token::Literal(std::mem::take(&mut self.literal)));
        }
    }
}
