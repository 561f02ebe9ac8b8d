// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry store, resolution engine, and built-in catalog.
//!
//! A catalog source is validated once into an immutable `RegistryStore`.
//! Consumers list records, resolve a plugin's effective configuration for a
//! scope (defaults deep-merged with overrides), and gate features on plugin
//! versions with `is_compatible`.

pub mod catalog;
pub mod cell;
pub mod merge;
pub mod record;
pub mod registry;
pub mod resolve;
pub mod source;
pub mod version;

pub use catalog::{builtin_source, builtin_store, search};
pub use cell::RegistryCell;
pub use merge::{deep_merge, deep_merge_strict};
pub use record::{ConfigMap, FixedPaths, PluginRecord, ScopeDefaults};
pub use registry::RegistryStore;
pub use resolve::{resolve, resolve_named, resolve_with_mode, EffectiveConfig};
pub use source::{CatalogFormat, CatalogSource};
pub use version::{is_compatible, parse_release_version, satisfies};

pub use plugreg_core::{MergeMode, RegistryError, Scope, SchemaViolation};
