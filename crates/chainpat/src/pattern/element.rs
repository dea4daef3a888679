// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Leaf predicates evaluated against a single chain node.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::error::MatchError;
use crate::chain::Cause;
use crate::expr::{Expr, Value};
use crate::types::TypeRegistry;

/// Capture key written inside `[...]`.
///
/// Integer keys sort before named keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    /// Parses trimmed reference text: an integer if it is one, otherwise a
    /// name. Blank text has no key.
    pub fn parse(text: &str) -> Option<Key> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(match text.parse::<i64>() {
            Ok(n) => Key::Index(n),
            Err(_) => Key::Name(text.to_string()),
        })
    }
}

/// Same rules as [`Key::parse`], so `"0"` looks up the capture `[0]`.
impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Key::parse(text).unwrap_or_else(|| Key::Name(String::new()))
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Index(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Index(n.into())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(n) => write!(f, "{n}"),
            Key::Name(s) => f.write_str(s),
        }
    }
}

/// Nodes recorded by capture matchers.
pub type Captures<'c> = BTreeMap<Key, &'c dyn Cause>;

/// A predicate over one chain node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementMatcher {
    /// Type name equals the literal.
    TypeName(String),
    /// Type is the literal or one of its descendants.
    Subtype(String),
    /// Property block.
    Expression { source: String, expr: Expr },
    /// Matches any node; records it under the key.
    Capture(Key),
}

impl ElementMatcher {
    /// Tests `node`. Capture matchers always pass; the caller records them.
    pub fn matches(&self, node: &dyn Cause, registry: &TypeRegistry) -> Result<bool, MatchError> {
        match self {
            Self::TypeName(name) => Ok(node.type_name() == name),
            Self::Subtype(name) => Ok(registry.is_subtype(node.type_name(), name)),
            Self::Expression { source, expr } => match expr.evaluate(node) {
                Ok(value) => Ok(value == Value::Bool(true)),
                Err(e) => Err(MatchError::Expression {
                    block: source.clone(),
                    type_name: node.type_name().to_string(),
                    source: e,
                }),
            },
            Self::Capture(_) => Ok(true),
        }
    }

    /// Key of a capture matcher.
    pub fn key(&self) -> Option<&Key> {
        match self {
            Self::Capture(key) => Some(key),
            _ => None,
        }
    }

    /// The pattern text this matcher was compiled from.
    pub fn pattern(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ElementMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeName(name) => f.write_str(name),
            Self::Subtype(name) => write!(f, "{name}..."),
            Self::Expression { source, .. } => write!(f, "({source})"),
            Self::Capture(key) => write!(f, "[{key}]"),
        }
    }
}

#[cfg(test)]
#[path = "element_tests.rs"]
mod tests;
