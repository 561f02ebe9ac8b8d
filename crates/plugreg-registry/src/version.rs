// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin version parsing and compatibility checks.
//!
//! Catalog versions must be plain `MAJOR.MINOR.PATCH` releases. A required
//! version is satisfied by any installed version with the same major and an
//! equal or greater `(minor, patch)`. Major 0 gets no special treatment.

use plugreg_core::RegistryError;
use semver::{Version, VersionReq};

use crate::record::PluginRecord;

/// Parse a catalog version, rejecting pre-release and build suffixes.
///
/// Components follow semver: leading zeros (`01.2.3`) are rejected.
pub fn parse_release_version(raw: &str) -> Result<Version, String> {
    if raw.trim().is_empty() {
        return Err("version must not be empty".to_string());
    }
    let version =
        Version::parse(raw).map_err(|e| format!("version `{raw}` is not MAJOR.MINOR.PATCH: {e}"))?;
    if !version.pre.is_empty() || !version.build.is_empty() {
        return Err(format!(
            "version `{raw}` must be a plain MAJOR.MINOR.PATCH release"
        ));
    }
    Ok(version)
}

/// Returns true if `record`'s version satisfies `required`.
///
/// `required` is either a plain version (`1.2.0`, minimum within the same
/// major) or a semver requirement expression (`>=1.2, <3`).
pub fn is_compatible(record: &PluginRecord, required: &str) -> Result<bool, RegistryError> {
    satisfies(&record.version, required)
}

/// Version-level form of [`is_compatible`].
pub fn satisfies(installed: &Version, required: &str) -> Result<bool, RegistryError> {
    let required = required.trim();
    if let Ok(minimum) = Version::parse(required) {
        return Ok(installed.major == minimum.major && *installed >= minimum);
    }

    let req = VersionReq::parse(required).map_err(|e| RegistryError::InvalidVersionRange {
        range: required.to_string(),
        reason: e.to_string(),
    })?;
    Ok(req.matches(installed))
}
