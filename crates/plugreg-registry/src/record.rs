// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validated plugin records.
//!
//! A `PluginRecord` is only ever produced by `RegistryStore::load`, after the
//! raw catalog entry has passed every schema check. Fields are therefore
//! trustworthy: the version is a parsed release version, URIs are well-formed,
//! and scope defaults are mappings.

use plugreg_core::Scope;
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A plugin-defined configuration object.
pub type ConfigMap = Map<String, Value>;

/// Metadata and default configuration templates for one registered plugin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginRecord {
    /// Unique, stable identifier (e.g., "SafeSnap").
    pub key: String,
    /// Human-readable display name.
    pub name: String,
    /// Optional attribution.
    pub author: Option<String>,
    /// Release version of the plugin.
    pub version: Version,
    /// Optional homepage URI.
    pub website: Option<String>,
    /// Optional icon URI.
    pub icon: Option<String>,
    /// Default configuration per scope.
    pub defaults: ScopeDefaults,
    /// Paths whose structure must not be replaced by a mapping in strict mode.
    #[serde(skip_serializing_if = "FixedPaths::is_empty")]
    pub fixed: FixedPaths,
}

impl PluginRecord {
    /// Default configuration for `scope`, or `None` if the plugin declares none.
    pub fn defaults_for(&self, scope: Scope) -> Option<&ConfigMap> {
        self.defaults.get(scope)
    }

    /// Scopes for which the plugin declares defaults (possibly empty ones).
    pub fn scopes(&self) -> Vec<Scope> {
        Scope::all().filter(|s| self.defaults.get(*s).is_some()).collect()
    }
}

/// Default configuration templates keyed by scope.
///
/// `None` means the plugin declares no defaults for that scope; `Some` of an
/// empty map means the defaults exist but are trivial. Both merge the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<ConfigMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal: Option<ConfigMap>,
}

impl ScopeDefaults {
    pub fn get(&self, scope: Scope) -> Option<&ConfigMap> {
        match scope {
            Scope::Space => self.space.as_ref(),
            Scope::Proposal => self.proposal.as_ref(),
        }
    }
}

/// Dotted paths (e.g., "tx" or "oracle.address") per scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPaths {
    #[serde(default)]
    pub space: Vec<String>,
    #[serde(default)]
    pub proposal: Vec<String>,
}

impl FixedPaths {
    pub fn for_scope(&self, scope: Scope) -> &[String] {
        match scope {
            Scope::Space => &self.space,
            Scope::Proposal => &self.proposal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.space.is_empty() && self.proposal.is_empty()
    }
}
