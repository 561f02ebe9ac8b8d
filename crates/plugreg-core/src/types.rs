// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry crates.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::RegistryError;

/// Configuration context a plugin may customize.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Community-wide settings for a voting space.
    Space,
    /// Per-vote settings for a single proposal.
    Proposal,
}

impl Scope {
    /// All scopes, in declaration order.
    pub fn all() -> impl Iterator<Item = Scope> {
        Scope::iter()
    }

    /// Parse a scope name, mapping failures to `RegistryError::InvalidScope`.
    pub fn parse(s: &str) -> Result<Scope, RegistryError> {
        Scope::from_str(s).map_err(|_| RegistryError::InvalidScope {
            scope: s.to_string(),
        })
    }
}

/// Selects how overrides that change the shape of a value are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// The override always wins.
    #[default]
    Lenient,
    /// Replacing a structurally fixed leaf with a mapping is a `MergeConflict`.
    Strict,
}

impl MergeMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            MergeMode::Strict
        } else {
            MergeMode::Lenient
        }
    }
}
