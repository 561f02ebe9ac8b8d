// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core types for the plugreg plugin registry.
//!
//! This crate provides the error taxonomy and the small closed enumerations
//! (scope, merge mode) shared by the store, the resolution engine and the CLI.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{RegistryError, SchemaViolation};
pub use types::{MergeMode, Scope};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn scope_display_and_parse_roundtrip() {
        for scope in Scope::all() {
            let s = scope.to_string();
            assert_eq!(Scope::from_str(&s).expect("should parse back"), scope);
        }
        assert_eq!(Scope::Space.to_string(), "space");
        assert_eq!(Scope::Proposal.to_string(), "proposal");
    }

    #[test]
    fn unknown_scope_is_invalid_scope_error() {
        let err = Scope::parse("network").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidScope { ref scope } if scope == "network"));
        assert!(err.to_string().contains("network"));
    }

    #[test]
    fn scope_parse_is_case_sensitive() {
        assert!(Scope::parse("Space").is_err());
    }

    #[test]
    fn scope_serializes_lowercase() {
        let json = serde_json::to_string(&Scope::Proposal).unwrap();
        assert_eq!(json, "\"proposal\"");
        let parsed: Scope = serde_json::from_str("\"space\"").unwrap();
        assert_eq!(parsed, Scope::Space);
    }

    #[test]
    fn schema_error_lists_every_violation() {
        let err = RegistryError::Schema {
            violations: vec![
                SchemaViolation::new("Quorum", "version `1.0` is not MAJOR.MINOR.PATCH"),
                SchemaViolation::new("HAL", "name must not be empty"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 violation(s)"));
        assert!(msg.contains("`Quorum`"));
        assert!(msg.contains("`HAL`"));
        assert!(err.is_fatal());
        assert_eq!(err.violations().map(|v| v.len()), Some(2));
    }

    #[test]
    fn query_errors_are_not_fatal() {
        let err = RegistryError::NotFound {
            key: "doesNotExist".into(),
        };
        assert!(!err.is_fatal());
        assert!(err.violations().is_none());
        assert_eq!(err.to_string(), "plugin not found: doesNotExist");
    }

    #[test]
    fn merge_mode_defaults_to_lenient() {
        assert_eq!(MergeMode::default(), MergeMode::Lenient);
        assert_eq!(MergeMode::from_strict(true), MergeMode::Strict);
        assert_eq!(MergeMode::Strict.to_string(), "strict");
    }
}
