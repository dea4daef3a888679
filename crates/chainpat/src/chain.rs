// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The chain model: nodes with a type name and at most one cause.
//!
//! Matching never walks [`Cause::cause`] links directly. A [`Chain`] flattens
//! the links once, head first, and every positional lookup indexes into that.

use std::collections::HashSet;
use std::fmt;

use crate::expr::Value;

/// A node in a cause chain.
///
/// Implementations must form a finite, acyclic chain: a node is never its own
/// ancestor. [`Chain::new`] stops at the first revisited node instead of
/// looping, but the resulting chain is then truncated. A node is revisited
/// when both its address and its type name repeat, so a cause stored inline
/// at the start of its effect is still a distinct node.
pub trait Cause: fmt::Debug {
    /// Fully qualified type name, e.g. `java.io.IOException`.
    fn type_name(&self) -> &str;

    /// The predecessor of this node, `None` at the root cause.
    fn cause(&self) -> Option<&dyn Cause>;

    /// Looks up a named property for property blocks.
    ///
    /// Returns `None` when the node has no such property. The default
    /// implementation only knows `type`.
    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "type" => Some(Value::Str(self.type_name().to_string())),
            _ => None,
        }
    }
}

/// A chain flattened into a head-to-tail sequence.
#[derive(Debug, Clone, Default)]
pub struct Chain<'c> {
    nodes: Vec<&'c dyn Cause>,
}

impl<'c> Chain<'c> {
    /// Flattens the chain starting at `head`. An absent head is an empty chain.
    pub fn new(head: Option<&'c dyn Cause>) -> Self {
        let mut nodes = Vec::new();
        let mut seen = HashSet::new();
        let mut current = head;
        while let Some(node) = current {
            if !seen.insert(Identity::of(node)) {
                tracing::warn!(
                    "cause chain revisits {} after {} nodes; truncating",
                    node.type_name(),
                    nodes.len()
                );
                break;
            }
            nodes.push(node);
            current = node.cause();
        }
        Self { nodes }
    }

    /// The empty chain.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at `index` counted from the head.
    pub fn get(&self, index: usize) -> Option<&'c dyn Cause> {
        self.nodes.get(index).copied()
    }

    pub fn head(&self) -> Option<&'c dyn Cause> {
        self.nodes.first().copied()
    }

    /// The root cause.
    pub fn last(&self) -> Option<&'c dyn Cause> {
        self.nodes.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'c dyn Cause> + '_ {
        self.nodes.iter().copied()
    }

    /// Index of `node` in this chain, compared by identity.
    pub fn position_of(&self, node: &dyn Cause) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| Identity::of(*n) == Identity::of(node))
    }
}

impl<'c, C: Cause> From<&'c C> for Chain<'c> {
    fn from(head: &'c C) -> Self {
        Chain::new(Some(head))
    }
}

impl<'c, C: Cause> From<Option<&'c C>> for Chain<'c> {
    fn from(head: Option<&'c C>) -> Self {
        Chain::new(head.map(|h| h as &dyn Cause))
    }
}

impl<'c> From<&'c dyn Cause> for Chain<'c> {
    fn from(head: &'c dyn Cause) -> Self {
        Chain::new(Some(head))
    }
}

impl<'c> From<Option<&'c dyn Cause>> for Chain<'c> {
    fn from(head: Option<&'c dyn Cause>) -> Self {
        Chain::new(head)
    }
}

/// Node identity: data address plus type name.
///
/// Vtable pointers are not unique per type, so they are left out; the type
/// name separates an effect from a cause embedded at its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Identity<'a> {
    addr: *const (),
    type_name: &'a str,
}

impl<'a> Identity<'a> {
    fn of(node: &'a dyn Cause) -> Self {
        Self {
            addr: std::ptr::from_ref(node).cast::<()>(),
            type_name: node.type_name(),
        }
    }
}

/// True if `a` and `b` are the same node.
pub fn same_node(a: &dyn Cause, b: &dyn Cause) -> bool {
    Identity::of(a) == Identity::of(b)
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
