// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use super::element::ElementMatcher;

/// An element matcher pinned to a chain position.
///
/// Offsets `>= 0` count from the head. Negative offsets count from the tail
/// (`-1` is the last node) and are assigned by
/// [`Conjunction::add`](super::conjunction::Conjunction::add).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalMatcher {
    pub(crate) offset: i64,
    pub(crate) depth: i64,
    pub(crate) element: ElementMatcher,
    pub(crate) terminal: bool,
}

impl PositionalMatcher {
    /// A matcher at compile-time segment `depth`; negative depths are
    /// tail-anchored.
    pub fn new(depth: i64, element: ElementMatcher) -> Self {
        Self {
            offset: depth,
            depth,
            element,
            terminal: false,
        }
    }

    /// Requires the matched node to be the last one in the chain.
    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn element(&self) -> &ElementMatcher {
        &self.element
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn is_tail_anchored(&self) -> bool {
        self.offset < 0
    }

    /// Index of the node this matcher tests in a chain of `len` nodes, with
    /// tail offsets moved `shift` nodes toward the head.
    ///
    /// `None` when the position is out of range, or not last for a terminal
    /// matcher.
    pub fn resolve(&self, len: usize, shift: usize) -> Option<usize> {
        let len_i = i64::try_from(len).ok()?;
        let shift_i = i64::try_from(shift).ok()?;
        let index = if self.offset < 0 {
            len_i + self.offset - shift_i
        } else {
            self.offset
        };
        if index < 0 || index >= len_i {
            return None;
        }
        if self.terminal && index != len_i - 1 {
            return None;
        }
        usize::try_from(index).ok()
    }
}

impl fmt::Display for PositionalMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}  {}", self.offset, self.element)?;
        if self.terminal {
            f.write_str("$")?;
        }
        Ok(())
    }
}
