// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugin catalog.
//!
//! The reference catalog ships embedded in the binary as TOML and goes
//! through the same validation as any external catalog. No network calls are
//! made.

use plugreg_core::RegistryError;

use crate::record::PluginRecord;
use crate::registry::RegistryStore;
use crate::source::CatalogSource;

const BUILTIN_CATALOG: &str = include_str!("../catalog/plugins.toml");

/// Parse the embedded catalog document.
pub fn builtin_source() -> Result<CatalogSource, RegistryError> {
    CatalogSource::from_toml_str(BUILTIN_CATALOG)
}

/// Load a store from the embedded catalog.
pub fn builtin_store() -> Result<RegistryStore, RegistryError> {
    RegistryStore::load(&builtin_source()?)
}

/// Search a store by query string.
///
/// Matches records whose key, name, or author contains the query
/// (case-insensitive). An empty query returns every record. Results keep
/// catalog order.
pub fn search<'a>(store: &'a RegistryStore, query: &str) -> Vec<&'a PluginRecord> {
    let query = query.trim().to_lowercase();
    store
        .list()
        .filter(|r| {
            query.is_empty()
                || r.key.to_lowercase().contains(&query)
                || r.name.to_lowercase().contains(&query)
                || r.author
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase().contains(&query))
        })
        .collect()
}
