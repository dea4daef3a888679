// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{Error, Result};

/// Match error cause chains against chain patterns
#[derive(Parser)]
#[command(name = "chainpat")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "CHAINPAT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match a pattern against a cause chain
    Match(MatchArgs),
    /// Show the positional matchers a pattern compiles to
    Explain(ExplainArgs),
}

#[derive(clap::Args)]
pub struct MatchArgs {
    /// Chain pattern, e.g. 'java.io.IOException.../**/java.sql.SQLException$'
    pub pattern: String,

    /// Chain file (.toml, .json) or stack trace; reads stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Read the input as a JVM stack trace regardless of extension
    #[arg(long)]
    pub trace: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(clap::Args)]
pub struct ExplainArgs {
    /// Chain pattern to compile
    pub pattern: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

/// How input is read by `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Toml,
    Json,
    Trace,
}

impl MatchArgs {
    /// Input format: `--trace` wins, then the file extension; stdin and
    /// unknown extensions are stack traces.
    pub fn input_kind(&self) -> InputKind {
        if self.trace {
            return InputKind::Trace;
        }
        let extension = self
            .file
            .as_deref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => InputKind::Toml,
            Some("json") => InputKind::Json,
            _ => InputKind::Trace,
        }
    }

    /// The input file, `None` for stdin.
    pub fn input_path(&self) -> Option<&std::path::Path> {
        self.file.as_deref().filter(|p| p.as_os_str() != "-")
    }

    /// Rejects reading the chain from an interactive terminal.
    pub fn check_input(&self, stdin_is_terminal: bool) -> Result<()> {
        if self.input_path().is_none() && stdin_is_terminal {
            return Err(Error::Argument(
                "no chain to match: pass FILE or pipe a stack trace on stdin".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
