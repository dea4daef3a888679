// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while compiling or matching a pattern.

use crate::expr::EvalError;

/// Malformed pattern text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at position {position}")]
pub struct CompileError {
    /// Human-readable error message.
    pub message: String,
    /// Zero-based character position of the offending character.
    pub position: usize,
    /// The full pattern text.
    pub pattern: String,
}

impl CompileError {
    /// Renders the error with a caret under the offending character:
    ///
    /// ```text
    /// unexpected character '%' at position 2
    /// A/%
    ///   ^
    /// ```
    pub fn diagnostic(&self) -> String {
        format!("{self}\n{}", pointer(&self.pattern, self.position))
    }
}

/// Error returned by [`Pattern::compile`](super::Pattern::compile).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error(transparent)]
    Syntax(#[from] CompileError),

    /// A subtype test names a type the registry does not know.
    #[error("unknown type `{name}` at position {position}")]
    UnknownType {
        name: String,
        position: usize,
        pattern: String,
    },
}

impl PatternError {
    pub fn position(&self) -> usize {
        match self {
            Self::Syntax(e) => e.position,
            Self::UnknownType { position, .. } => *position,
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            Self::Syntax(e) => &e.pattern,
            Self::UnknownType { pattern, .. } => pattern,
        }
    }

    /// Caret diagnostic, see [`CompileError::diagnostic`].
    pub fn diagnostic(&self) -> String {
        format!("{self}\n{}", self.pointer())
    }

    /// The pattern line and the caret line, without the message.
    pub fn pointer(&self) -> String {
        pointer(self.pattern(), self.position())
    }
}

/// A property block failed to evaluate.
///
/// Fatal to the `matches()` call that raised it only; the compiled pattern
/// stays usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("property block `({block})` on {type_name}: {source}")]
    Expression {
        block: String,
        type_name: String,
        #[source]
        source: EvalError,
    },
}

fn pointer(pattern: &str, position: usize) -> String {
    format!("{pattern}\n{}^", " ".repeat(position))
}
