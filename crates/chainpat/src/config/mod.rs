// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles chainpat.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{DEFAULT_ROOT, TypeRegistry};

/// Supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "types"];

/// Known keys in `[types]`.
const KNOWN_TYPES_KEYS: &[&str] = &["root", "builtin", "parents"];

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    types: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Type hierarchy for subtype tests.
    pub types: TypesConfig,
}

/// `[types]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TypesConfig {
    /// Universal root type, matched by `*`.
    pub root: String,

    /// Include the JVM standard exception hierarchy.
    pub builtin: bool,

    /// Extra `type = parent` edges.
    pub parents: BTreeMap<String, String>,
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            builtin: true,
            parents: BTreeMap::new(),
        }
    }
}

impl TypesConfig {
    /// Builds the registry described by this section.
    pub fn registry(&self) -> TypeRegistry {
        let mut registry = TypeRegistry::new(&self.root);
        if self.builtin {
            registry = registry.with_jvm_types();
        }
        for (name, parent) in &self.parents {
            registry.declare(name, parent);
        }
        registry
    }
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    let version = flexible
        .version
        .ok_or_else(|| config_error("missing required field: version".to_string()))?;

    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})\n  Upgrade chainpat to use this config.",
            version, SUPPORTED_VERSION
        )));
    }

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    let types = match flexible.types {
        Some(toml::Value::Table(table)) => {
            for key in table.keys() {
                if !KNOWN_TYPES_KEYS.contains(&key.as_str()) {
                    warn_unknown_key(path, &format!("types.{}", key));
                }
            }
            toml::Value::Table(table)
                .try_into::<TypesConfig>()
                .map_err(|e| config_error(format!("invalid [types]: {}", e)))?
        }
        Some(_) => return Err(config_error("`types` must be a table".to_string())),
        None => TypesConfig::default(),
    };

    Ok(Config { version, types })
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "chainpat: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
