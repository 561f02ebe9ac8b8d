// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./plugreg.toml` > `~/.config/plugreg/plugreg.toml` > `/etc/plugreg/plugreg.toml`
//! with environment variable overrides via `PLUGREG_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PlugregConfig;

pub(crate) const SYSTEM_CONFIG: &str = "/etc/plugreg/plugreg.toml";
pub(crate) const LOCAL_CONFIG: &str = "plugreg.toml";

/// Path of the per-user config file, if the platform has a config directory.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("plugreg/plugreg.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plugreg/plugreg.toml` (system-wide)
/// 3. `~/.config/plugreg/plugreg.toml` (user XDG config)
/// 4. `./plugreg.toml` (local directory)
/// 5. `PLUGREG_*` environment variables
pub fn load_config() -> Result<PlugregConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PlugregConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugregConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Unlike the XDG hierarchy, the file must exist.
pub fn load_config_from_path(path: &Path) -> Result<PlugregConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugregConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PlugregConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that only the section
/// prefix is split: `PLUGREG_CATALOG_PATH` maps to `catalog.path`.
/// Keys arrive with their original case, so they are lowercased first.
fn env_provider() -> Env {
    Env::prefixed("PLUGREG_").map(|key| {
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("catalog_", "catalog.", 1)
            .replacen("resolve_", "resolve.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
