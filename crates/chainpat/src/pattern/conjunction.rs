// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered positional matchers that must all pass against one chain.

use std::ops::Range;

use super::element::Captures;
use super::error::MatchError;
use super::positional::PositionalMatcher;
use crate::chain::Chain;
use crate::types::TypeRegistry;

/// A successful evaluation: the indexes touched and the nodes captured.
pub(crate) type Hit<'c> = (Range<usize>, Captures<'c>);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conjunction {
    matchers: Vec<PositionalMatcher>,
    first_tail: Option<usize>,
}

impl Conjunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a matcher. A tail-anchored matcher renumbers the trailing run
    /// so the last segment added sits at `-1`.
    pub fn add(&mut self, matcher: PositionalMatcher) {
        let tail = matcher.depth < 0;
        self.matchers.push(matcher);
        if tail {
            self.first_tail.get_or_insert(self.matchers.len() - 1);
            self.renumber();
        }
    }

    /// Removes the most recently added matcher.
    pub fn pop(&mut self) -> Option<PositionalMatcher> {
        let matcher = self.matchers.pop()?;
        if self.first_tail == Some(self.matchers.len()) {
            self.first_tail = None;
        }
        self.renumber();
        Some(matcher)
    }

    // Offsets are re-derived from compile-time depths: every matcher in the
    // run is placed relative to the deepest (last) segment.
    fn renumber(&mut self) {
        let Some(first) = self.first_tail else {
            return;
        };
        let Some(last_depth) = self.matchers.last().map(|m| m.depth) else {
            return;
        };
        for matcher in &mut self.matchers[first..] {
            matcher.offset = last_depth - matcher.depth - 1;
        }
    }

    pub fn matchers(&self) -> &[PositionalMatcher] {
        &self.matchers
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Evaluates every matcher against `chain`.
    ///
    /// Head-anchored matchers are tried in order at their fixed offsets. The
    /// tail-anchored run is then placed with its last segment on the last
    /// node and, failing that, slid one node at a time toward the head while
    /// it stays clear of the head-anchored positions. A terminal matcher pins
    /// the run to the end. The first placement that passes wins.
    ///
    /// An empty conjunction or an empty chain never matches.
    pub(crate) fn evaluate<'c>(
        &self,
        chain: &Chain<'c>,
        registry: &TypeRegistry,
    ) -> Result<Option<Hit<'c>>, MatchError> {
        if self.matchers.is_empty() || chain.is_empty() {
            return Ok(None);
        }
        let len = chain.len();
        let split = self.first_tail.unwrap_or(self.matchers.len());
        let (head, tail) = self.matchers.split_at(split);

        let mut captures = Captures::new();
        let mut span: Option<Range<usize>> = None;
        if !run(head, chain, 0, registry, &mut captures, &mut span)? {
            return Ok(None);
        }
        if tail.is_empty() {
            return Ok(span.map(|s| (s, captures)));
        }

        let head_extent = extent(head, |offset| offset + 1);
        let tail_extent = extent(tail, |offset| -offset);
        let Some(room) = len.checked_sub(head_extent + tail_extent) else {
            return Ok(None);
        };
        let max_shift = if tail.iter().any(|m| m.terminal) {
            0
        } else {
            room
        };

        for shift in 0..=max_shift {
            let mut attempt = captures.clone();
            let mut attempt_span = span.clone();
            if run(tail, chain, shift, registry, &mut attempt, &mut attempt_span)? {
                tracing::trace!("tail run matched at shift {}", shift);
                return Ok(attempt_span.map(|s| (s, attempt)));
            }
        }
        Ok(None)
    }
}

/// Largest `measure(offset)` across `matchers`, zero when empty.
fn extent(matchers: &[PositionalMatcher], measure: impl Fn(i64) -> i64) -> usize {
    matchers
        .iter()
        .map(|m| usize::try_from(measure(m.offset)).unwrap_or(0))
        .max()
        .unwrap_or(0)
}

fn run<'c>(
    matchers: &[PositionalMatcher],
    chain: &Chain<'c>,
    shift: usize,
    registry: &TypeRegistry,
    captures: &mut Captures<'c>,
    span: &mut Option<Range<usize>>,
) -> Result<bool, MatchError> {
    for matcher in matchers {
        let Some(index) = matcher.resolve(chain.len(), shift) else {
            return Ok(false);
        };
        let Some(node) = chain.get(index) else {
            return Ok(false);
        };
        if !matcher.element.matches(node, registry)? {
            return Ok(false);
        }
        if let Some(key) = matcher.element.key() {
            captures.insert(key.clone(), node);
        }
        *span = Some(match span.take() {
            Some(s) => s.start.min(index)..s.end.max(index + 1),
            None => index..index + 1,
        });
    }
    Ok(true)
}

#[cfg(test)]
#[path = "conjunction_tests.rs"]
mod tests;
