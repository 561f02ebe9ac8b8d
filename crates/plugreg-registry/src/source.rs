// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog source documents.
//!
//! A catalog is a mapping of plugin key to record, written either as TOML
//! (one top-level table per plugin) or as a JSON object. Parsing keeps every
//! entry in document order, including repeated keys, so that validation can
//! report duplicates instead of silently keeping the last one.

use std::fmt;
use std::path::{Path, PathBuf};

use plugreg_core::{RegistryError, SchemaViolation};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::record::FixedPaths;

/// Document format of a catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(CatalogFormat::Toml),
            "json" => Some(CatalogFormat::Json),
            _ => None,
        }
    }
}

/// An unvalidated catalog: plugin keys paired with their raw record bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSource {
    entries: Vec<(String, Value)>,
}

impl CatalogSource {
    /// Build a source from already-structured entries.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Parse a TOML catalog document.
    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let OrderedEntries(entries) = toml::from_str(content)
            .map_err(|e| parse_error(format!("invalid TOML catalog: {e}")))?;
        Ok(Self { entries })
    }

    /// Parse a JSON catalog document. The top level must be an object.
    pub fn from_json_str(content: &str) -> Result<Self, RegistryError> {
        let OrderedEntries(entries) = serde_json::from_str(content)
            .map_err(|e| parse_error(format!("invalid JSON catalog: {e}")))?;
        Ok(Self { entries })
    }

    /// Read and parse a catalog file. When `format` is `None` it is inferred
    /// from the file extension.
    pub fn from_path(path: &Path, format: Option<CatalogFormat>) -> Result<Self, RegistryError> {
        let format = match format.or_else(|| CatalogFormat::from_path(path)) {
            Some(f) => f,
            None => {
                return Err(parse_error(format!(
                    "cannot infer catalog format of {}: expected a .toml or .json file",
                    path.display()
                )));
            }
        };

        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        debug!(path = %path.display(), ?format, "read catalog file");

        match format {
            CatalogFormat::Toml => Self::from_toml_str(&content),
            CatalogFormat::Json => Self::from_json_str(&content),
        }
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_error(problem: String) -> RegistryError {
    RegistryError::Schema {
        violations: vec![SchemaViolation::new("", problem)],
    }
}

/// Top-level map that keeps order and duplicate keys.
struct OrderedEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of plugin key to plugin record")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// A catalog record body as written in the source, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawRecord {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub defaults: RawDefaults,
    #[serde(default)]
    pub fixed: FixedPaths,
}

/// The `defaults` section. Values stay untyped until validation checks they
/// are mappings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawDefaults {
    #[serde(default)]
    pub space: Option<Value>,
    #[serde(default)]
    pub proposal: Option<Value>,
}
