// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable registry store.
//!
//! `RegistryStore` holds validated `PluginRecord`s keyed by plugin key, in
//! catalog order. It is built once by `load` and exposes no mutation entry
//! point afterwards, so a store can be shared freely across threads.

use std::collections::HashSet;

use indexmap::IndexMap;
use plugreg_core::{RegistryError, SchemaViolation};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::record::{ConfigMap, FixedPaths, PluginRecord, ScopeDefaults};
use crate::source::{CatalogSource, RawRecord};
use crate::version::parse_release_version;

/// Read-only catalog of registered plugins.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryStore {
    records: IndexMap<String, PluginRecord>,
}

impl RegistryStore {
    /// Validate every entry of `source` and build a store.
    ///
    /// All-or-nothing: if any entry is invalid, returns `RegistryError::Schema`
    /// with every violation found across the whole catalog.
    pub fn load(source: &CatalogSource) -> Result<Self, RegistryError> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();
        let mut records = IndexMap::with_capacity(source.len());

        for (key, body) in source.entries() {
            if key.trim().is_empty() {
                violations.push(SchemaViolation::new(key.as_str(), "plugin key must not be empty"));
                continue;
            }
            if !seen.insert(key.as_str()) {
                violations.push(SchemaViolation::new(key.as_str(), "duplicate plugin key"));
                continue;
            }

            match validate_record(key, body) {
                Ok(record) => {
                    debug!(key = %key, version = %record.version, "validated plugin record");
                    records.insert(key.clone(), record);
                }
                Err(problems) => {
                    violations.extend(problems.into_iter().map(|p| SchemaViolation::new(key.as_str(), p)));
                }
            }
        }

        if !violations.is_empty() {
            warn!(count = violations.len(), "rejecting plugin catalog");
            return Err(RegistryError::Schema { violations });
        }

        info!(plugins = records.len(), "plugin registry loaded");
        Ok(Self { records })
    }

    /// Get a plugin record by key.
    pub fn get(&self, key: &str) -> Result<&PluginRecord, RegistryError> {
        self.records.get(key).ok_or_else(|| RegistryError::NotFound {
            key: key.to_string(),
        })
    }

    /// Returns true if a plugin is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// All records in catalog order.
    ///
    /// The iterator is lazy and `Clone`; calling `list` again (or cloning the
    /// iterator) restarts from the first record.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &PluginRecord> + Clone + '_ {
        self.records.values()
    }

    /// Plugin keys in catalog order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + Clone + '_ {
        self.records.keys().map(String::as_str)
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Check one record body, collecting every problem rather than stopping at the first.
fn validate_record(key: &str, body: &Value) -> Result<PluginRecord, Vec<String>> {
    let raw: RawRecord = serde_json::from_value(body.clone())
        .map_err(|e| vec![format!("malformed record: {e}")])?;

    let mut problems = Vec::new();

    if let Some(declared) = &raw.key
        && declared != key
    {
        problems.push(format!("declared key `{declared}` does not match catalog key"));
    }

    if raw.name.trim().is_empty() {
        problems.push("name must not be empty".to_string());
    }

    let version = match parse_release_version(&raw.version) {
        Ok(version) => Some(version),
        Err(problem) => {
            problems.push(problem);
            None
        }
    };

    for (field, uri) in [("website", &raw.website), ("icon", &raw.icon)] {
        if let Some(uri) = uri
            && let Err(e) = url::Url::parse(uri)
        {
            problems.push(format!("{field} `{uri}` is not a well-formed URI: {e}"));
        }
    }

    let space = scope_defaults("space", raw.defaults.space, &mut problems);
    let proposal = scope_defaults("proposal", raw.defaults.proposal, &mut problems);

    check_fixed_paths(&raw.fixed, &mut problems);
    check_dotted_keys("space", space.as_ref(), &raw.fixed.space, &mut problems);
    check_dotted_keys("proposal", proposal.as_ref(), &raw.fixed.proposal, &mut problems);

    match version {
        Some(version) if problems.is_empty() => Ok(PluginRecord {
            key: key.to_string(),
            name: raw.name,
            author: raw.author,
            version,
            website: raw.website,
            icon: raw.icon,
            defaults: ScopeDefaults { space, proposal },
            fixed: raw.fixed,
        }),
        _ => Err(problems),
    }
}

fn scope_defaults(
    scope: &str,
    value: Option<Value>,
    problems: &mut Vec<String>,
) -> Option<ConfigMap> {
    match value? {
        Value::Object(map) => Some(map),
        other => {
            problems.push(format!(
                "defaults.{scope} must be a mapping, found {}",
                value_kind(&other)
            ));
            None
        }
    }
}

fn check_fixed_paths(fixed: &FixedPaths, problems: &mut Vec<String>) {
    let scoped = [("space", &fixed.space), ("proposal", &fixed.proposal)];
    for (scope, paths) in scoped {
        for path in paths {
            if path.split('.').any(|segment| segment.trim().is_empty()) {
                problems.push(format!("fixed.{scope} path `{path}` has an empty segment"));
            }
        }
    }
}

/// Fixed paths are dotted, so a scope that declares any cannot also use
/// keys containing `.` in its defaults.
fn check_dotted_keys(
    scope: &str,
    defaults: Option<&ConfigMap>,
    fixed: &[String],
    problems: &mut Vec<String>,
) {
    fn walk(map: &ConfigMap, prefix: &str, scope: &str, problems: &mut Vec<String>) {
        for (key, value) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}/{key}")
            };
            if key.contains('.') {
                problems.push(format!(
                    "defaults.{scope} key `{path}` contains `.` and is ambiguous with fixed paths"
                ));
            }
            if let Value::Object(nested) = value {
                walk(nested, &path, scope, problems);
            }
        }
    }

    if let Some(defaults) = defaults
        && !fixed.is_empty()
    {
        walk(defaults, "", scope, problems);
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
