//! Query parameters and per-route query requirements.
//!
//! # Requirement Forms
//! - `key` key must be present
//! - `key?` key is optional, extracted when present
//! - `key=value` key must be present with `value`
//! - `key!=value` key must be absent or differ from `value`

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::template::parser::TemplateError;

/// A query value: a single string or a repeated key's values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

impl QueryValue {
    pub fn values(&self) -> &[String] {
        match self {
            QueryValue::One(value) => std::slice::from_ref(value),
            QueryValue::Many(values) => values,
        }
    }

    /// True when any of the values equals `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.values().iter().any(|value| value == needle)
    }

    fn push(&mut self, value: String) {
        match self {
            QueryValue::One(first) => {
                let first = std::mem::take(first);
                *self = QueryValue::Many(vec![first, value]);
            }
            QueryValue::Many(values) => values.push(value),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::One(value.to_string())
    }
}

/// Query parameters of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, QueryValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string. A leading
    /// `?` is ignored; repeated keys collect into [`QueryValue::Many`].
    pub fn from_query_str(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.append(key.into_owned(), value.into_owned());
        }
        params
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Add a value, turning an existing single value into a list.
    pub fn append(&mut self, key: String, value: String) {
        match self.0.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                self.0.insert(key, QueryValue::One(value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &QueryValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Present,
    Optional,
    Equals(String),
    NotEquals(String),
}

/// One query requirement declared by a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub key: String,
    pub requirement: Requirement,
}

impl FromStr for QuerySpec {
    type Err = TemplateError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (key, requirement) = if let Some((key, value)) = spec.split_once("!=") {
            (key, Requirement::NotEquals(value.to_string()))
        } else if let Some((key, value)) = spec.split_once('=') {
            (key, Requirement::Equals(value.to_string()))
        } else if let Some(key) = spec.strip_suffix('?') {
            (key, Requirement::Optional)
        } else {
            (spec, Requirement::Present)
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(TemplateError::InvalidQuery(spec.to_string()));
        }

        Ok(Self {
            key: key.to_string(),
            requirement,
        })
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.requirement {
            Requirement::Present => write!(f, "{}", self.key),
            Requirement::Optional => write!(f, "{}?", self.key),
            Requirement::Equals(value) => write!(f, "{}={}", self.key, value),
            Requirement::NotEquals(value) => write!(f, "{}!={}", self.key, value),
        }
    }
}

/// Check `query` against a route's requirements.
///
/// Returns the extracted values on success: the declared keys that are
/// present, or every supplied parameter when nothing is declared.
pub(crate) fn check(specs: &[QuerySpec], query: Option<&QueryParams>) -> Option<QueryParams> {
    if specs.is_empty() {
        return Some(query.cloned().unwrap_or_default());
    }

    let mut extracted = QueryParams::new();
    for spec in specs {
        let value = query.and_then(|q| q.get(&spec.key));
        let satisfied = match (&spec.requirement, value) {
            (Requirement::Present, found) => found.is_some(),
            (Requirement::Optional, _) => true,
            (Requirement::Equals(expected), found) => found.is_some_and(|v| v.contains(expected)),
            (Requirement::NotEquals(rejected), found) => !found.is_some_and(|v| v.contains(rejected)),
        };
        if !satisfied {
            return None;
        }
        if let Some(value) = value {
            extracted.insert(spec.key.clone(), value.clone());
        }
    }
    Some(extracted)
}
