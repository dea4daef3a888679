// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-chain bindings of a compiled pattern.

use std::ops::Range;

use super::Pattern;
use super::element::{Captures, Key};
use super::error::MatchError;
use crate::chain::{Cause, Chain};

/// A compiled pattern bound to one chain.
///
/// Holds the flattened chain and the capture table; the compiled matchers
/// are borrowed from the [`Pattern`] and never modified, so any number of
/// bindings can share one pattern.
#[derive(Debug, Clone)]
pub struct ChainMatcher<'p, 'c> {
    pattern: &'p Pattern,
    chain: Chain<'c>,
    captures: Captures<'c>,
    span: Option<Range<usize>>,
}

impl<'p, 'c> ChainMatcher<'p, 'c> {
    pub(crate) fn new(pattern: &'p Pattern, chain: Chain<'c>) -> Self {
        Self {
            pattern,
            chain,
            captures: Captures::new(),
            span: None,
        }
    }

    /// Evaluates the pattern against the bound chain.
    ///
    /// Captures and span are replaced by this call's outcome: empty after a
    /// failed match.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError`] if a property block fails to evaluate.
    pub fn matches(&mut self) -> Result<bool, MatchError> {
        self.captures.clear();
        self.span = None;
        let hit = self
            .pattern
            .conjunction
            .evaluate(&self.chain, &self.pattern.registry)?;
        let matched = hit.is_some();
        if let Some((span, captures)) = hit {
            self.span = Some(span);
            self.captures = captures;
        }
        tracing::debug!(
            "{:?} against {} nodes: {}",
            self.pattern.as_str(),
            self.chain.len(),
            if matched { "matched" } else { "no match" }
        );
        Ok(matched)
    }

    /// Binds a different chain and clears the previous outcome.
    pub fn rebind(&mut self, chain: impl Into<Chain<'c>>) {
        self.chain = chain.into();
        self.captures.clear();
        self.span = None;
    }

    /// Node captured under `key` by the last successful match.
    pub fn reference(&self, key: impl Into<Key>) -> Option<&'c dyn Cause> {
        self.captures.get(&key.into()).copied()
    }

    pub fn reference_keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.captures.keys()
    }

    /// Chain indexes touched by the last successful match.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }

    pub fn chain(&self) -> &Chain<'c> {
        &self.chain
    }

    pub fn pattern(&self) -> &'p Pattern {
        self.pattern
    }

    /// Consumes the binding into a [`MatchResult`] of its last outcome.
    pub fn into_result(self) -> MatchResult<'c> {
        MatchResult {
            matched: self.span.is_some(),
            captures: self.captures,
            span: self.span,
        }
    }
}

/// Outcome of [`Pattern::match_chain`].
#[derive(Debug, Clone, Default)]
pub struct MatchResult<'c> {
    pub matched: bool,
    pub captures: Captures<'c>,
    /// Half-open range of chain indexes the match touched.
    pub span: Option<Range<usize>>,
}

impl<'c> MatchResult<'c> {
    pub fn capture(&self, key: impl Into<Key>) -> Option<&'c dyn Cause> {
        self.captures.get(&key.into()).copied()
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
