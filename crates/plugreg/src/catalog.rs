// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog selection for the CLI: a command-line path wins over the
//! configured path, and with neither the built-in catalog is used.

use std::path::Path;

use plugreg_config::{CatalogFormatSetting, PlugregConfig};
use plugreg_registry::{CatalogFormat, CatalogSource, RegistryError, RegistryStore};
use tracing::info;

/// Map the configured format onto the registry's format, `Auto` meaning "infer".
pub fn configured_format(setting: CatalogFormatSetting) -> Option<CatalogFormat> {
    match setting {
        CatalogFormatSetting::Auto => None,
        CatalogFormatSetting::Toml => Some(CatalogFormat::Toml),
        CatalogFormatSetting::Json => Some(CatalogFormat::Json),
    }
}

/// Read the catalog source selected by the CLI flag or the configuration.
pub fn open_source(
    config: &PlugregConfig,
    override_path: Option<&Path>,
) -> Result<CatalogSource, RegistryError> {
    let configured = config.catalog.path.as_deref().map(Path::new);
    match override_path.or(configured) {
        Some(path) => {
            info!(path = %path.display(), "loading plugin catalog");
            // An explicit format only applies to the configured path.
            let format = if override_path.is_some() {
                None
            } else {
                configured_format(config.catalog.format)
            };
            CatalogSource::from_path(path, format)
        }
        None => {
            info!("loading built-in plugin catalog");
            plugreg_registry::builtin_source()
        }
    }
}

/// Load and validate the selected catalog.
pub fn open_store(
    config: &PlugregConfig,
    override_path: Option<&Path>,
) -> Result<RegistryStore, RegistryError> {
    RegistryStore::load(&open_source(config, override_path)?)
}
