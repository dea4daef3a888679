use std::path::PathBuf;

use crate::pattern::{MatchError, PatternError};

/// Chainpat error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pattern failed to compile
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Property block failed while matching
    #[error("match error: {0}")]
    Match(#[from] MatchError),

    /// Chain description or stack trace could not be read
    #[error("chain error: {message}")]
    Chain {
        message: String,
        path: Option<PathBuf>,
    },
}

/// Result type using chainpat Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success (for `match`, the pattern matched)
    Success = 0,
    /// Pattern did not match the chain
    NoMatch = 1,
    /// Pattern, configuration or argument error
    ConfigError = 2,
    /// I/O failure or an error outside the crate
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::Pattern(_) | Error::Match(_) | Error::Chain { .. } => ExitCode::ConfigError,
            Error::Io { .. } => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
