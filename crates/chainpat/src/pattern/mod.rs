// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cause chain patterns.
//!
//! A pattern is a `/`-separated list of segments, head first:
//!
//! - `Name` matches a node whose type name equals `Name`.
//! - `Name...` (or `Name…`) matches `Name` and its subtypes.
//! - `*` matches any single node.
//! - `**` matches zero or more nodes; segments after it count from the tail.
//! - `(expr)` after a type test adds a property block.
//! - `[key]` captures the node under an integer or name key.
//! - `$` after the last segment requires it to be the last node.
//! - `#` starts a comment running to the end of the line.
//!
//! Patterns always match from the chain head; a leading `^` or `/` is
//! accepted and only recorded.

mod compiler;
pub mod conjunction;
pub mod element;
pub mod error;
pub mod matcher;
pub mod positional;

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

pub use conjunction::Conjunction;
pub use element::{Captures, ElementMatcher, Key};
pub use error::{CompileError, MatchError, PatternError};
pub use matcher::{ChainMatcher, MatchResult};
pub use positional::PositionalMatcher;

use crate::chain::Chain;
use crate::types::TypeRegistry;

fn default_registry() -> Arc<TypeRegistry> {
    static REGISTRY: OnceLock<Arc<TypeRegistry>> = OnceLock::new();
    Arc::clone(REGISTRY.get_or_init(|| Arc::new(TypeRegistry::default())))
}

/// A compiled pattern.
///
/// Immutable after compilation and cheap to share: bind it to chains with
/// [`matcher`](Self::matcher) or [`match_chain`](Self::match_chain) from any
/// number of threads.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    conjunction: Conjunction,
    registry: Arc<TypeRegistry>,
    left_anchored: bool,
}

impl Pattern {
    /// Compiles `text` against the JVM exception hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the text is malformed or a subtype test
    /// names an unknown type.
    pub fn new(text: &str) -> Result<Pattern, PatternError> {
        Self::compile(text, default_registry())
    }

    /// Compiles `text`, resolving subtype tests against `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the text is malformed or a subtype test
    /// names a type the registry does not know.
    pub fn compile(
        text: &str,
        registry: impl Into<Arc<TypeRegistry>>,
    ) -> Result<Pattern, PatternError> {
        let registry = registry.into();
        let compiled = compiler::compile(text, &registry)?;
        Ok(Pattern {
            source: text.to_string(),
            conjunction: compiled.conjunction,
            registry,
            left_anchored: compiled.left_anchored,
        })
    }

    /// Binds the pattern to `chain`. Each binding has its own captures.
    pub fn matcher<'p, 'c>(&'p self, chain: impl Into<Chain<'c>>) -> ChainMatcher<'p, 'c> {
        ChainMatcher::new(self, chain.into())
    }

    /// Matches `chain` once.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError`] if a property block fails to evaluate.
    pub fn match_chain<'c>(
        &self,
        chain: impl Into<Chain<'c>>,
    ) -> Result<MatchResult<'c>, MatchError> {
        let mut matcher = self.matcher(chain);
        matcher.matches()?;
        Ok(matcher.into_result())
    }

    /// True if `chain` matches. A property block error counts as no match.
    pub fn is_match<'c>(&self, chain: impl Into<Chain<'c>>) -> bool {
        self.matcher(chain).matches().unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Compiled matchers in evaluation order.
    pub fn matchers(&self) -> &[PositionalMatcher] {
        self.conjunction.matchers()
    }

    /// True if the pattern began with `^` or `/`.
    pub fn is_left_anchored(&self) -> bool {
        self.left_anchored
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::new(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
