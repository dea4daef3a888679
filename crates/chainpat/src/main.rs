// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Chainpat CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use chainpat::TypeRegistry;
use chainpat::cli::{Cli, Command};
use chainpat::config;
use chainpat::discovery;
use chainpat::error::ExitCode;

mod cmd_explain;
mod cmd_match;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("CHAINPAT_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("chainpat: {}", e);
            match e.downcast_ref::<chainpat::Error>() {
                Some(err) => {
                    if let chainpat::Error::Pattern(pattern_err) = err {
                        eprintln!("{}", pattern_err.pointer());
                    }
                    ExitCode::from(err)
                }
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Match(args)) => cmd_match::run(&cli, args),
        Some(Command::Explain(args)) => cmd_explain::run(&cli, args),
    }
}

/// Type registry from the explicit or discovered config, or the JVM
/// hierarchy when there is none.
fn load_registry(cli: &Cli) -> anyhow::Result<TypeRegistry> {
    let cwd = std::env::current_dir()?;
    match discovery::resolve_config(cli.config.as_deref(), &cwd)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            Ok(config::load(&path)?.types.registry())
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Ok(TypeRegistry::default())
        }
    }
}
