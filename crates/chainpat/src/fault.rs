// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! An owned chain node, and the chain description file format.
//!
//! Chain files list faults head first:
//!
//! ```toml
//! [[fault]]
//! type = "java.lang.IllegalStateException"
//! message = "request failed"
//!
//! [[fault]]
//! type = "java.io.IOException"
//! [fault.properties]
//! retryable = true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chain::Cause;
use crate::error::{Error, Result};
use crate::expr::Value;

/// A chain node that owns its cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    #[serde(rename = "type")]
    type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, Value>,

    #[serde(skip)]
    cause: Option<Box<Fault>>,
}

impl Fault {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: None,
            properties: BTreeMap::new(),
            cause: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Sets the cause, replacing any previous one.
    pub fn caused_by(mut self, cause: Fault) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Links a head-to-tail list into one chain.
    ///
    /// Any cause already set on a link is replaced by its successor in the
    /// list. Returns `None` for an empty list.
    pub fn from_links(links: Vec<Fault>) -> Option<Fault> {
        links.into_iter().rev().fold(None, |cause, mut link| {
            link.cause = cause.map(Box::new);
            Some(link)
        })
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    /// The cause as a concrete fault.
    pub fn source_fault(&self) -> Option<&Fault> {
        self.cause.as_deref()
    }

    /// Appends `text` to the message on a new line.
    pub(crate) fn extend_message(&mut self, text: &str) {
        match &mut self.message {
            Some(message) => {
                message.push('\n');
                message.push_str(text);
            }
            None => self.message = Some(text.to_string()),
        }
    }
}

impl Cause for Fault {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn cause(&self) -> Option<&dyn Cause> {
        self.cause.as_deref().map(|c| c as &dyn Cause)
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "type" => Some(Value::Str(self.type_name.clone())),
            "message" => Some(
                self.message
                    .as_ref()
                    .map_or(Value::Null, |m| Value::Str(m.clone())),
            ),
            _ => self.properties.get(name).cloned(),
        }
    }
}

/// A chain description file.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChainFile {
    /// Faults from head to root cause.
    #[serde(default)]
    pub fault: Vec<Fault>,
}

impl ChainFile {
    /// Parse a chain file, choosing the format from the path extension.
    ///
    /// `.json` is JSON, anything else TOML.
    pub fn parse(content: &str, path: &Path) -> Result<ChainFile> {
        let parsed: std::result::Result<ChainFile, String> =
            match path.extension().and_then(|e| e.to_str()) {
                Some("json") => serde_json::from_str(content).map_err(|e| e.to_string()),
                _ => toml::from_str(content).map_err(|e| e.to_string()),
            };
        parsed.map_err(|message| Error::Chain {
            message,
            path: Some(path.to_path_buf()),
        })
    }

    /// Read and parse a chain file.
    pub fn load(path: &Path) -> Result<ChainFile> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// The linked chain, `None` if the file lists no faults.
    pub fn into_chain(self) -> Option<Fault> {
        Fault::from_links(self.fault)
    }
}

#[cfg(test)]
#[path = "fault_tests.rs"]
mod tests;
