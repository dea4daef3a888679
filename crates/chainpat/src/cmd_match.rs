// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Match command implementation.

use std::io::{IsTerminal, Read, Write};
use std::path::Path;

use serde::Serialize;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use chainpat::cli::{Cli, InputKind, MatchArgs, OutputFormat};
use chainpat::color::{resolve_color, scheme};
use chainpat::error::{Error, ExitCode};
use chainpat::{Chain, ChainFile, Fault, Key, MatchResult, Pattern, trace};

/// Run the match command.
pub fn run(cli: &Cli, args: &MatchArgs) -> anyhow::Result<ExitCode> {
    args.check_input(std::io::stdin().is_terminal())?;
    let registry = crate::load_registry(cli)?;
    let pattern = Pattern::compile(&args.pattern, registry).map_err(Error::from)?;

    let head = read_chain(args)?;
    let chain = Chain::from(head.as_ref());
    tracing::trace!("read chain of {} nodes", chain.len());

    let result = pattern.match_chain(chain.clone()).map_err(Error::from)?;

    match args.output {
        OutputFormat::Text => {
            let choice = if args.no_color {
                ColorChoice::Never
            } else if args.color {
                ColorChoice::Always
            } else {
                resolve_color()
            };
            let mut stdout = StandardStream::stdout(choice);
            write_text(&mut stdout, &chain, &result)?;
        }
        OutputFormat::Json => {
            let report = MatchReport::new(&pattern, &chain, &result);
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &report)?;
            writeln!(handle)?;
        }
    }

    Ok(if result.matched {
        ExitCode::Success
    } else {
        ExitCode::NoMatch
    })
}

fn read_chain(args: &MatchArgs) -> anyhow::Result<Option<Fault>> {
    let path = args.input_path();
    let content = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(|e| Error::Io {
                path: "<stdin>".into(),
                source: e,
            })?;
            buf
        }
    };
    let display_path = path.unwrap_or(Path::new("<stdin>"));

    let head = match args.input_kind() {
        InputKind::Toml | InputKind::Json => ChainFile::parse(&content, display_path)?.into_chain(),
        InputKind::Trace => trace::parse(&content).map_err(|e| Error::Chain {
            message: e.to_string(),
            path: path.map(Path::to_path_buf),
        })?,
    };
    Ok(head)
}

fn write_text(
    out: &mut impl WriteColor,
    chain: &Chain<'_>,
    result: &MatchResult<'_>,
) -> std::io::Result<()> {
    match &result.span {
        Some(span) => {
            out.set_color(&scheme::matched())?;
            write!(out, "MATCH")?;
            out.reset()?;
            writeln!(out, "  nodes {}..{} of {}", span.start, span.end, chain.len())?;
        }
        None => {
            out.set_color(&scheme::no_match())?;
            write!(out, "NO MATCH")?;
            out.reset()?;
            writeln!(out, "  {} nodes", chain.len())?;
        }
    }
    for (key, node) in &result.captures {
        write!(out, "  ")?;
        out.set_color(&scheme::key())?;
        write!(out, "[{}]", key)?;
        out.reset()?;
        write!(out, " ")?;
        if let Some(index) = chain.position_of(*node) {
            out.set_color(&scheme::index())?;
            write!(out, "#{}", index)?;
            out.reset()?;
            write!(out, " ")?;
        }
        out.set_color(&scheme::type_name())?;
        write!(out, "{}", node.type_name())?;
        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct MatchReport<'a> {
    pattern: &'a str,
    matched: bool,
    chain_length: usize,
    span: Option<[usize; 2]>,
    captures: Vec<CaptureReport<'a>>,
}

#[derive(Serialize)]
struct CaptureReport<'a> {
    key: &'a Key,
    index: Option<usize>,
    #[serde(rename = "type")]
    type_name: &'a str,
}

impl<'a> MatchReport<'a> {
    fn new(pattern: &'a Pattern, chain: &Chain<'a>, result: &'a MatchResult<'a>) -> Self {
        let captures = result
            .captures
            .iter()
            .map(|(key, node)| CaptureReport {
                key,
                index: chain.position_of(*node),
                type_name: node.type_name(),
            })
            .collect();
        Self {
            pattern: pattern.as_str(),
            matched: result.matched,
            chain_length: chain.len(),
            span: result.span.as_ref().map(|s| [s.start, s.end]),
            captures,
        }
    }
}
