// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Explain command implementation.

use std::io::Write;

use serde::Serialize;

use chainpat::Pattern;
use chainpat::cli::{Cli, ExplainArgs, OutputFormat};
use chainpat::error::{Error, ExitCode};

/// Run the explain command.
pub fn run(cli: &Cli, args: &ExplainArgs) -> anyhow::Result<ExitCode> {
    let registry = crate::load_registry(cli)?;
    let pattern = Pattern::compile(&args.pattern, registry).map_err(Error::from)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match args.output {
        OutputFormat::Text => {
            writeln!(handle, "pattern: {}", pattern.as_str())?;
            if pattern.is_left_anchored() {
                writeln!(handle, "anchored at head")?;
            }
            if pattern.matchers().is_empty() {
                writeln!(handle, "no matchers: matches nothing")?;
            }
            for matcher in pattern.matchers() {
                writeln!(handle, "{}", matcher)?;
            }
        }
        OutputFormat::Json => {
            let report = ExplainReport {
                pattern: pattern.as_str(),
                left_anchored: pattern.is_left_anchored(),
                matchers: pattern
                    .matchers()
                    .iter()
                    .map(|m| MatcherReport {
                        offset: m.offset(),
                        element: m.element().pattern(),
                        terminal: m.is_terminal(),
                    })
                    .collect(),
            };
            serde_json::to_writer_pretty(&mut handle, &report)?;
            writeln!(handle)?;
        }
    }
    Ok(ExitCode::Success)
}

#[derive(Serialize)]
struct ExplainReport<'a> {
    pattern: &'a str,
    left_anchored: bool,
    matchers: Vec<MatcherReport>,
}

#[derive(Serialize)]
struct MatcherReport {
    offset: i64,
    element: String,
    terminal: bool,
}
