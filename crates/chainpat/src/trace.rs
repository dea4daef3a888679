// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reads JVM stack-trace text into a fault chain.
//!
//! ```text
//! Exception in thread "main" java.lang.IllegalStateException: request failed
//!     at com.example.Service.call(Service.java:42)
//! Caused by: java.io.IOException: connection reset
//!     at java.base/java.net.SocketInputStream.read(SocketInputStream.java:186)
//!     ... 3 more
//! ```
//!
//! Indented lines (frames, `... N more`, `Suppressed:` blocks) are skipped.
//! An unindented line that is not a header continues the previous message.

use crate::fault::Fault;

const CAUSED_BY: &str = "Caused by:";
const THREAD_PREFIX: &str = "Exception in thread \"";

/// Malformed stack trace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    #[error("line {line}: `Caused by:` without an exception type")]
    MissingType { line: usize },

    #[error("line {line}: `{text}` is not an exception type")]
    InvalidType { line: usize, text: String },
}

/// Parses `text` into a chain, head first.
///
/// Returns `Ok(None)` if the text contains no exception header.
pub fn parse(text: &str) -> Result<Option<Fault>, TraceError> {
    let mut faults: Vec<Fault> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        if raw.trim().is_empty() || raw.starts_with(char::is_whitespace) {
            continue;
        }
        let line = raw.trim_end();

        if let Some(rest) = line.strip_prefix(CAUSED_BY) {
            let rest = rest.trim();
            if rest.is_empty() {
                return Err(TraceError::MissingType { line: line_no });
            }
            let fault = header(rest).ok_or_else(|| TraceError::InvalidType {
                line: line_no,
                text: rest.to_string(),
            })?;
            if faults.is_empty() {
                tracing::debug!("line {}: cause before any exception header", line_no);
            }
            faults.push(fault);
            continue;
        }

        match faults.last_mut() {
            Some(last) => last.extend_message(line),
            None => match header(strip_thread(line)) {
                Some(fault) => faults.push(fault),
                None => tracing::trace!("line {}: skipping preamble", line_no),
            },
        }
    }

    Ok(Fault::from_links(faults))
}

fn strip_thread(line: &str) -> &str {
    line.strip_prefix(THREAD_PREFIX)
        .and_then(|rest| rest.find("\" ").map(|end| &rest[end + 2..]))
        .unwrap_or(line)
}

/// Parses `Type` or `Type: message`.
fn header(line: &str) -> Option<Fault> {
    let (type_name, message) = match line.split_once(": ") {
        Some((t, m)) => (t, Some(m)),
        None => (line.strip_suffix(':').unwrap_or(line), None),
    };
    let type_name = type_name.trim();
    if !is_type_name(type_name) {
        return None;
    }
    let fault = Fault::new(type_name);
    Some(match message {
        Some(m) => fault.with_message(m),
        None => fault,
    })
}

fn is_type_name(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.'))
}

#[cfg(test)]
#[path = "trace_tests.rs"]
mod tests;
