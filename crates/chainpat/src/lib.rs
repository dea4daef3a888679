// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern matching over error cause chains.
//!
//! A pattern such as `java.io.IOException.../**/java.sql.SQLException[root]$`
//! is compiled once into a [`Pattern`] and then evaluated against any number
//! of chains. A chain is anything implementing [`Cause`]: a node with a type
//! name and at most one predecessor.
//!
//! ```
//! use chainpat::{Fault, Pattern};
//!
//! let chain = Fault::new("java.lang.IllegalStateException")
//!     .caused_by(Fault::new("java.io.FileNotFoundException"));
//!
//! let pattern = Pattern::new("java.lang.RuntimeException.../java.io.IOException...[io]").unwrap();
//! let result = pattern.match_chain(&chain).unwrap();
//! assert!(result.matched);
//! assert_eq!(result.capture("io").unwrap().type_name(), "java.io.FileNotFoundException");
//! ```

pub mod chain;
pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod expr;
pub mod fault;
pub mod pattern;
pub mod trace;
pub mod types;

pub use chain::{Cause, Chain};
pub use error::{Error, ExitCode, Result};
pub use expr::{EvalError, Expr, ExprError, Value};
pub use fault::{ChainFile, Fault};
pub use pattern::{
    Captures, ChainMatcher, CompileError, ElementMatcher, Key, MatchError, MatchResult, Pattern,
    PatternError, PositionalMatcher,
};
pub use types::TypeRegistry;
