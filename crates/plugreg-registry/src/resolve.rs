// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of a plugin's effective configuration.
//!
//! `resolve` looks the plugin up, takes its defaults for the requested scope
//! (an empty mapping when the plugin declares none) and deep-merges the
//! caller's overrides on top. Every function here is pure: identical inputs
//! always produce identical output.

use plugreg_core::{MergeMode, RegistryError, Scope};
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::merge::{deep_merge, deep_merge_strict};
use crate::record::ConfigMap;
use crate::registry::RegistryStore;

/// The merged configuration of one plugin for one scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveConfig {
    pub key: String,
    pub scope: Scope,
    pub config: ConfigMap,
}

impl EffectiveConfig {
    /// The merged configuration as a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.config)
    }
}

/// Resolve with the default (lenient) merge mode.
pub fn resolve(
    store: &RegistryStore,
    key: &str,
    scope: Scope,
    overrides: Option<&Value>,
) -> Result<EffectiveConfig, RegistryError> {
    resolve_with_mode(store, key, scope, overrides, MergeMode::Lenient)
}

/// Resolve with a scope given by name; unknown names fail with `InvalidScope`.
pub fn resolve_named(
    store: &RegistryStore,
    key: &str,
    scope: &str,
    overrides: Option<&Value>,
    mode: MergeMode,
) -> Result<EffectiveConfig, RegistryError> {
    let scope = Scope::parse(scope)?;
    resolve_with_mode(store, key, scope, overrides, mode)
}

/// Compute the effective configuration of `key` for `scope`.
///
/// `overrides` may be `None` or `null` (use defaults unchanged) or a mapping;
/// anything else is `InvalidOverrides`.
pub fn resolve_with_mode(
    store: &RegistryStore,
    key: &str,
    scope: Scope,
    overrides: Option<&Value>,
    mode: MergeMode,
) -> Result<EffectiveConfig, RegistryError> {
    let record = store.get(key)?;

    let empty = ConfigMap::new();
    let base = record.defaults_for(scope).unwrap_or(&empty);
    let overrides = overrides_map(overrides)?.unwrap_or(&empty);

    let config = match mode {
        MergeMode::Lenient => deep_merge(base, overrides),
        MergeMode::Strict => deep_merge_strict(base, overrides, record.fixed.for_scope(scope))
            .map_err(|path| RegistryError::MergeConflict {
                key: key.to_string(),
                scope,
                path,
            })?,
    };

    trace!(key, %scope, %mode, keys = config.len(), "resolved effective config");
    Ok(EffectiveConfig {
        key: record.key.clone(),
        scope,
        config,
    })
}

fn overrides_map(overrides: Option<&Value>) -> Result<Option<&ConfigMap>, RegistryError> {
    match overrides {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(RegistryError::InvalidOverrides {
            reason: format!("expected a mapping, found `{other}`"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CatalogSource;
    use serde_json::json;

    fn store() -> RegistryStore {
        RegistryStore::load(&CatalogSource::from_entries(vec![
            (
                "Quorum",
                json!({
                    "name": "Quorum",
                    "version": "0.1.0",
                    "defaults": { "space": { "threshold": 50 } }
                }),
            ),
            (
                "SafeSnap",
                json!({
                    "name": "Gnosis SafeSnap",
                    "version": "1.0.0",
                    "defaults": {
                        "space": { "safes": ["0x123"], "oracles": ["0x456"] },
                        "proposal": { "safe": "0xAbc", "oracle": "0x456", "tx": {} }
                    },
                    "fixed": { "proposal": ["oracle"] }
                }),
            ),
        ]))
        .unwrap()
    }

    #[test]
    fn override_replaces_space_default() {
        let resolved = resolve(&store(), "Quorum", Scope::Space, Some(&json!({ "threshold": 75 })))
            .unwrap();
        assert_eq!(resolved.into_value(), json!({ "threshold": 75 }));
    }

    #[test]
    fn missing_scope_defaults_resolve_to_empty() {
        let resolved = resolve(&store(), "Quorum", Scope::Proposal, Some(&json!({}))).unwrap();
        assert_eq!(resolved.into_value(), json!({}));
    }

    #[test]
    fn absent_overrides_return_defaults() {
        let store = store();
        let none = resolve(&store, "SafeSnap", Scope::Proposal, None).unwrap();
        let null = resolve(&store, "SafeSnap", Scope::Proposal, Some(&Value::Null)).unwrap();
        let empty = resolve(&store, "SafeSnap", Scope::Proposal, Some(&json!({}))).unwrap();
        let expected = json!({ "safe": "0xAbc", "oracle": "0x456", "tx": {} });
        assert_eq!(none.clone().into_value(), expected);
        assert_eq!(none, null);
        assert_eq!(none, empty);
    }

    #[test]
    fn nested_override_keeps_sibling_defaults() {
        let resolved = resolve(
            &store(),
            "SafeSnap",
            Scope::Proposal,
            Some(&json!({ "tx": { "to": "0xdead" } })),
        )
        .unwrap();
        assert_eq!(
            resolved.into_value(),
            json!({ "safe": "0xAbc", "oracle": "0x456", "tx": { "to": "0xdead" } })
        );
    }

    #[test]
    fn unknown_key_is_not_found() {
        let err = resolve(&store(), "doesNotExist", Scope::Space, Some(&json!({}))).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { ref key } if key == "doesNotExist"));
    }

    #[test]
    fn unknown_scope_name_is_invalid_scope() {
        let err = resolve_named(&store(), "Quorum", "network", None, MergeMode::Lenient)
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidScope { ref scope } if scope == "network"));
    }

    #[test]
    fn non_mapping_overrides_are_rejected() {
        let err = resolve(&store(), "Quorum", Scope::Space, Some(&json!([75]))).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidOverrides { .. }));
    }

    #[test]
    fn strict_mode_reports_conflict_on_fixed_path() {
        let err = resolve_with_mode(
            &store(),
            "SafeSnap",
            Scope::Proposal,
            Some(&json!({ "oracle": { "address": "0x1" } })),
            MergeMode::Strict,
        )
        .unwrap_err();
        match err {
            RegistryError::MergeConflict { key, scope, path } => {
                assert_eq!(key, "SafeSnap");
                assert_eq!(scope, Scope::Proposal);
                assert_eq!(path, "oracle");
            }
            other => panic!("expected MergeConflict, got {other:?}"),
        }
    }

    #[test]
    fn lenient_mode_lets_override_win_on_fixed_path() {
        let resolved = resolve(
            &store(),
            "SafeSnap",
            Scope::Proposal,
            Some(&json!({ "oracle": { "address": "0x1" } })),
        )
        .unwrap();
        assert_eq!(resolved.config["oracle"], json!({ "address": "0x1" }));
    }

    #[test]
    fn resolution_is_repeatable() {
        let store = store();
        let overrides = json!({ "safes": ["0x999"] });
        let a = resolve(&store, "SafeSnap", Scope::Space, Some(&overrides)).unwrap();
        let b = resolve(&store, "SafeSnap", Scope::Space, Some(&overrides)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.config["oracles"], json!(["0x456"]));
        assert_eq!(a.config["safes"], json!(["0x999"]));
    }
}
