// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::path::Path;

use crate::diagnostic::ConfigError;
use crate::model::{CatalogFormatSetting, PlugregConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Err(Vec<ConfigError>)` with all collected validation errors
/// (does not fail fast).
pub fn validate_config(config: &PlugregConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if let Some(path) = &config.catalog.path {
        if path.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "catalog.path must not be empty when set".to_string(),
            });
        } else if let Some(message) = format_mismatch(path, config.catalog.format) {
            errors.push(ConfigError::Validation { message });
        }
    } else if config.catalog.format != CatalogFormatSetting::Auto {
        errors.push(ConfigError::Validation {
            message: "catalog.format has no effect without catalog.path".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Reports an explicit format that contradicts a recognized file extension.
fn format_mismatch(path: &str, format: CatalogFormatSetting) -> Option<String> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)?;
    let conflicting = matches!(
        (format, ext.as_str()),
        (CatalogFormatSetting::Toml, "json") | (CatalogFormatSetting::Json, "toml")
    );
    conflicting.then(|| {
        format!(
            "catalog.format `{}` contradicts the extension of catalog.path `{path}`",
            format.as_str()
        )
    })
}
