// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the plugin registry.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Scope;

/// A single problem found while validating a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Plugin key the problem belongs to. Empty for source-level problems
    /// (e.g. the document could not be parsed at all).
    pub key: String,
    /// Human-readable description of what is wrong.
    pub problem: String,
}

impl SchemaViolation {
    pub fn new(key: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}", self.problem)
        } else {
            write!(f, "`{}`: {}", self.key, self.problem)
        }
    }
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The error type returned by every registry operation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The catalog failed validation. Carries every violation found, not just the first.
    #[error("catalog schema error ({} violation(s)): {}", violations.len(), join_violations(violations))]
    Schema { violations: Vec<SchemaViolation> },

    /// No plugin is registered under the requested key.
    #[error("plugin not found: {key}")]
    NotFound { key: String },

    /// The scope argument is not one of `space` / `proposal`.
    #[error("invalid scope `{scope}`: expected one of space, proposal")]
    InvalidScope { scope: String },

    /// The required version or range could not be parsed.
    #[error("invalid version range `{range}`: {reason}")]
    InvalidVersionRange { range: String, reason: String },

    /// The caller-supplied overrides are not a mapping.
    #[error("invalid overrides: {reason}")]
    InvalidOverrides { reason: String },

    /// Strict merge refused to replace a structurally fixed value with a mapping.
    #[error("merge conflict in plugin `{key}` ({scope}) at `{path}`: value is structurally fixed")]
    MergeConflict {
        key: String,
        scope: Scope,
        path: String,
    },

    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RegistryError {
    /// Returns the schema violations if this is a `Schema` error.
    pub fn violations(&self) -> Option<&[SchemaViolation]> {
        match self {
            RegistryError::Schema { violations } => Some(violations),
            _ => None,
        }
    }

    /// Load-time errors abort startup; every other error is the caller's to handle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RegistryError::Schema { .. } | RegistryError::Io { .. })
    }
}
