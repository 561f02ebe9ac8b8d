// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for plugreg.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level plugreg configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlugregConfig {
    /// Where the plugin catalog comes from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Resolution behavior.
    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Catalog source configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Path to a TOML or JSON catalog. `None` uses the built-in catalog.
    #[serde(default)]
    pub path: Option<String>,

    /// Document format of `path`.
    #[serde(default)]
    pub format: CatalogFormatSetting,
}

/// Catalog document format. `Auto` infers it from the file extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormatSetting {
    #[default]
    Auto,
    Toml,
    Json,
}

impl CatalogFormatSetting {
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogFormatSetting::Auto => "auto",
            CatalogFormatSetting::Toml => "toml",
            CatalogFormatSetting::Json => "json",
        }
    }
}

/// Resolution configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveConfig {
    /// Reject overrides that put a mapping over a structurally fixed value.
    #[serde(default)]
    pub strict: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
