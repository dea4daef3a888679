// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Type hierarchy used by subtype tests (`Name...`) and the `*` glob.
//!
//! Every type descends from a single root. A type is known when it is the
//! root, has a declared parent, or is itself declared as someone's parent.

use std::collections::HashMap;

/// Root of the default hierarchy.
pub const DEFAULT_ROOT: &str = "java.lang.Throwable";

/// The JVM standard exception hierarchy as `(type, parent)` edges.
const JVM_TYPES: &[(&str, &str)] = &[
    ("java.lang.Exception", "java.lang.Throwable"),
    ("java.lang.Error", "java.lang.Throwable"),
    ("java.lang.RuntimeException", "java.lang.Exception"),
    ("java.lang.IllegalArgumentException", "java.lang.RuntimeException"),
    ("java.lang.IllegalStateException", "java.lang.RuntimeException"),
    ("java.lang.NullPointerException", "java.lang.RuntimeException"),
    ("java.lang.UnsupportedOperationException", "java.lang.RuntimeException"),
    ("java.lang.IndexOutOfBoundsException", "java.lang.RuntimeException"),
    (
        "java.lang.ArrayIndexOutOfBoundsException",
        "java.lang.IndexOutOfBoundsException",
    ),
    ("java.lang.ClassCastException", "java.lang.RuntimeException"),
    ("java.lang.NumberFormatException", "java.lang.IllegalArgumentException"),
    ("java.lang.ArithmeticException", "java.lang.RuntimeException"),
    ("java.lang.SecurityException", "java.lang.RuntimeException"),
    ("java.lang.InterruptedException", "java.lang.Exception"),
    ("java.lang.ReflectiveOperationException", "java.lang.Exception"),
    (
        "java.lang.ClassNotFoundException",
        "java.lang.ReflectiveOperationException",
    ),
    ("java.lang.VirtualMachineError", "java.lang.Error"),
    ("java.lang.OutOfMemoryError", "java.lang.VirtualMachineError"),
    ("java.lang.StackOverflowError", "java.lang.VirtualMachineError"),
    ("java.lang.AssertionError", "java.lang.Error"),
    ("java.io.IOException", "java.lang.Exception"),
    ("java.io.FileNotFoundException", "java.io.IOException"),
    ("java.io.EOFException", "java.io.IOException"),
    ("java.io.InterruptedIOException", "java.io.IOException"),
    ("java.io.UncheckedIOException", "java.lang.RuntimeException"),
    ("java.net.SocketException", "java.io.IOException"),
    ("java.net.ConnectException", "java.net.SocketException"),
    ("java.net.SocketTimeoutException", "java.io.InterruptedIOException"),
    ("java.sql.SQLException", "java.lang.Exception"),
    ("javax.naming.NamingException", "java.lang.Exception"),
    ("java.util.concurrent.ExecutionException", "java.lang.Exception"),
    ("java.util.concurrent.TimeoutException", "java.lang.Exception"),
    ("java.util.NoSuchElementException", "java.lang.RuntimeException"),
    (
        "java.util.ConcurrentModificationException",
        "java.lang.RuntimeException",
    ),
];

/// A single-rooted type hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    root: String,
    parents: HashMap<String, String>,
}

impl Default for TypeRegistry {
    /// The JVM standard exception hierarchy rooted at `java.lang.Throwable`.
    fn default() -> Self {
        Self::jvm()
    }
}

impl TypeRegistry {
    /// An empty hierarchy containing only `root`.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            parents: HashMap::new(),
        }
    }

    /// The JVM standard exception hierarchy.
    pub fn jvm() -> Self {
        Self::new(DEFAULT_ROOT).with_jvm_types()
    }

    /// Adds the JVM standard exception edges.
    pub fn with_jvm_types(mut self) -> Self {
        for (name, parent) in JVM_TYPES {
            self.declare(*name, *parent);
        }
        self
    }

    /// Builder form of [`declare`](Self::declare).
    pub fn with_type(mut self, name: impl Into<String>, parent: impl Into<String>) -> Self {
        self.declare(name, parent);
        self
    }

    /// Declares `parent` as the direct supertype of `name`, replacing any
    /// previous declaration. Declaring the root has no effect.
    pub fn declare(&mut self, name: impl Into<String>, parent: impl Into<String>) {
        let name = name.into();
        if name == self.root {
            return;
        }
        self.parents.insert(name, parent.into());
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Number of declared edges.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_known(&self, name: &str) -> bool {
        name == self.root
            || self.parents.contains_key(name)
            || self.parents.values().any(|p| p == name)
    }

    /// Direct supertype of `name`, `None` for the root or unknown types.
    pub fn parent(&self, name: &str) -> Option<&str> {
        self.parents.get(name).map(String::as_str)
    }

    /// True if `name` is `ancestor` or descends from it.
    ///
    /// Every type, known or not, is a subtype of the root. A cycle in the
    /// declared edges ends the walk with `false`.
    pub fn is_subtype(&self, name: &str, ancestor: &str) -> bool {
        if ancestor == self.root || name == ancestor {
            return true;
        }
        let mut current = name;
        for _ in 0..=self.parents.len() {
            match self.parents.get(current) {
                Some(parent) if parent == ancestor => return true,
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
