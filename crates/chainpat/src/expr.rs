// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Property-block expressions.
//!
//! The text between `(` and `)` in a pattern is a boolean expression over the
//! properties of the node it is attached to:
//!
//! ```text
//! message == "connection reset" && retryable
//! code >= 500 || !transient
//! ```
//!
//! Operators from lowest to highest precedence: `||`, `&&`, `!`, then one
//! optional comparison (`==`, `!=`, `<`, `<=`, `>`, `>=`). Operands are string
//! literals (`"..."` or `'...'`), integers, `true`, `false`, `null`, or a
//! property path such as `message` or `http.status`. Parentheses cannot
//! appear: the enclosing block ends at the first `)`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chain::Cause;

/// A property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    Null,
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Null => "null",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CmpOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Evaluates `left <op> right`.
    ///
    /// Equality accepts any two values; values of different kinds are
    /// unequal. Ordering needs two integers or two strings.
    pub fn evaluate(self, left: &Value, right: &Value) -> Result<bool, EvalError> {
        if let Self::Eq | Self::Ne = self {
            return Ok((left == right) == (self == Self::Eq));
        }
        let ordering = match (left, right) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            _ => {
                return Err(EvalError::Incomparable {
                    op: self.symbol(),
                    left: left.clone(),
                    right: right.clone(),
                });
            }
        };
        Ok(match self {
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            _ => ordering != Ordering::Less,
        })
    }
}

/// A compiled property expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(Value),
    Property(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare(CmpOp, Box<Expr>, Box<Expr>),
}

/// Error returned when an expression fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {position}")]
pub struct ExprError {
    /// Human-readable error message.
    pub message: String,
    /// Byte offset in the expression source.
    pub position: usize,
}

/// Error raised while evaluating an expression against a node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("unknown property `{0}`")]
    UnknownProperty(String),

    #[error("cannot compare {} {op} {}", .left.kind(), .right.kind())]
    Incomparable {
        op: &'static str,
        left: Value,
        right: Value,
    },

    #[error("`{op}` needs a boolean, got {}", .value.kind())]
    NotBoolean { op: &'static str, value: Value },
}

impl Expr {
    /// Parses expression source.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError`] if the source is empty or malformed.
    pub fn parse(source: &str) -> Result<Expr, ExprError> {
        let mut parser = Parser::new(source);
        parser.skip_whitespace();
        if parser.peek().is_none() {
            return Err(ExprError {
                message: "empty expression".to_string(),
                position: 0,
            });
        }
        let expr = parser.parse_or()?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(expr),
            Some(c) => Err(ExprError {
                message: format!("unexpected character '{}'", char::from(c)),
                position: parser.pos,
            }),
        }
    }

    /// Evaluates the expression with `node` as its context.
    pub fn evaluate(&self, node: &dyn Cause) -> Result<Value, EvalError> {
        match self {
            Expr::Literal(v) => Ok(v.clone()),
            Expr::Property(name) => node
                .property(name)
                .ok_or_else(|| EvalError::UnknownProperty(name.clone())),
            Expr::Not(inner) => Ok(Value::Bool(!as_bool("!", inner.evaluate(node)?)?)),
            Expr::And(left, right) => {
                if !as_bool("&&", left.evaluate(node)?)? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(as_bool("&&", right.evaluate(node)?)?))
            }
            Expr::Or(left, right) => {
                if as_bool("||", left.evaluate(node)?)? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(as_bool("||", right.evaluate(node)?)?))
            }
            Expr::Compare(op, left, right) => {
                let left = left.evaluate(node)?;
                let right = right.evaluate(node)?;
                Ok(Value::Bool(op.evaluate(&left, &right)?))
            }
        }
    }
}

fn as_bool(op: &'static str, value: Value) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(b),
        value => Err(EvalError::NotBoolean { op, value }),
    }
}

struct Parser<'a> {
    source: &'a str,
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(source: &'a str) -> Self {
        Self {
            source,
            input: source.as_bytes(),
            pos: 0,
        }
    }

    fn parse_or(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_and()?;
        while self.eat("||") {
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_unary()?;
        while self.eat("&&") {
            let right = self.parse_unary()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        self.skip_whitespace();
        if self.peek() == Some(b'!') && self.peek_at(1) != Some(b'=') {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ExprError> {
        let left = self.parse_atom()?;
        match self.parse_cmp_op() {
            Some(op) => {
                let right = self.parse_atom()?;
                Ok(Expr::Compare(op, Box::new(left), Box::new(right)))
            }
            None => Ok(left),
        }
    }

    fn parse_cmp_op(&mut self) -> Option<CmpOp> {
        self.skip_whitespace();
        let (op, width) = match (self.peek()?, self.peek_at(1)) {
            (b'=', Some(b'=')) => (CmpOp::Eq, 2),
            (b'!', Some(b'=')) => (CmpOp::Ne, 2),
            (b'<', Some(b'=')) => (CmpOp::Le, 2),
            (b'>', Some(b'=')) => (CmpOp::Ge, 2),
            (b'<', _) => (CmpOp::Lt, 1),
            (b'>', _) => (CmpOp::Gt, 1),
            _ => return None,
        };
        self.pos += width;
        Some(op)
    }

    fn parse_atom(&mut self) -> Result<Expr, ExprError> {
        self.skip_whitespace();
        match self.peek() {
            Some(q @ (b'"' | b'\'')) => self.parse_string(q),
            Some(c) if c.is_ascii_digit() || c == b'-' => self.parse_integer(),
            Some(c) if c.is_ascii_alphabetic() || c == b'_' => Ok(self.parse_word()),
            Some(c) => Err(self.error(format!("unexpected character '{}'", char::from(c)))),
            None => Err(self.error("unexpected end of expression".to_string())),
        }
    }

    fn parse_string(&mut self, quote: u8) -> Result<Expr, ExprError> {
        let start = self.pos;
        self.advance();
        let mut buf = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(ExprError {
                        message: "unterminated string".to_string(),
                        position: start,
                    });
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(b'\\') => {
                    self.advance();
                    let escaped = self.peek().ok_or_else(|| ExprError {
                        message: "unterminated string".to_string(),
                        position: start,
                    })?;
                    buf.push(match escaped {
                        b'n' => b'\n',
                        b't' => b'\t',
                        other => other,
                    });
                    self.advance();
                }
                Some(c) => {
                    buf.push(c);
                    self.advance();
                }
            }
        }
        Ok(Expr::Literal(Value::Str(
            String::from_utf8_lossy(&buf).into_owned(),
        )))
    }

    fn parse_integer(&mut self) -> Result<Expr, ExprError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.advance();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        let text = &self.source[start..self.pos];
        text.parse::<i64>()
            .map(|n| Expr::Literal(Value::Int(n)))
            .map_err(|_| ExprError {
                message: format!("invalid integer `{text}`"),
                position: start,
            })
    }

    fn parse_word(&mut self) -> Expr {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_' || c == b'.')
        {
            self.advance();
        }
        match &self.source[start..self.pos] {
            "true" => Expr::Literal(Value::Bool(true)),
            "false" => Expr::Literal(Value::Bool(false)),
            "null" => Expr::Literal(Value::Null),
            path => Expr::Property(path.to_string()),
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.input[self.pos..].starts_with(token.as_bytes()) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn error(&self, message: String) -> ExprError {
        ExprError {
            message,
            position: self.pos,
        }
    }
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod tests;
