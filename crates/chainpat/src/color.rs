// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and the output color scheme.
//!
//! Detection order:
//! 1. `NO_COLOR` set (any value) → no color
//! 2. `COLOR` set → color
//! 3. stdout is not a TTY, or `CI` is set → no color
//! 4. otherwise auto

use std::io::IsTerminal;

use termcolor::ColorChoice;

/// Resolve color choice from environment variables and the terminal.
pub fn resolve_color() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() || std::env::var_os("CI").is_some() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Colors for `match` and `explain` output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    /// Green "MATCH" indicator.
    pub fn matched() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    /// Red "NO MATCH" indicator.
    pub fn no_match() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// Bold capture key.
    pub fn key() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Cyan type name.
    pub fn type_name() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Yellow chain index or offset.
    pub fn index() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
