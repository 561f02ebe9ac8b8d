// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query commands: `list`, `show`, `search`, `resolve`, `check`.
//!
//! Human-readable output goes to stdout; JSON output is pretty-printed so it
//! can be piped into other tools.

use std::io::IsTerminal;
use std::process::ExitCode;

use plugreg_registry::{
    is_compatible, resolve_named, search, MergeMode, PluginRecord, RegistryError, RegistryStore,
};
use serde::Serialize;
use serde_json::Value;

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    // Records and configs are plain data; serialization cannot fail.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// One table row per plugin: key, version, name, author, scopes with defaults.
fn format_row(record: &PluginRecord, use_color: bool) -> String {
    let scopes = record
        .scopes()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let author = record.author.as_deref().unwrap_or("-");
    let key = format!("{:<14}", record.key);
    let key = if use_color {
        use colored::Colorize;
        key.bold().to_string()
    } else {
        key
    };
    format!(
        "  {key} {:<8} {:<24} {:<12} {}",
        record.version.to_string(),
        record.name,
        author,
        if scopes.is_empty() { "-" } else { &scopes }
    )
}

fn print_table<'a>(records: impl Iterator<Item = &'a PluginRecord>, plain: bool) {
    let use_color = !plain && std::io::stdout().is_terminal();
    println!(
        "  {:<14} {:<8} {:<24} {:<12} SCOPES",
        "KEY", "VERSION", "NAME", "AUTHOR"
    );
    for record in records {
        println!("{}", format_row(record, use_color));
    }
}

/// Run `plugreg list`.
pub fn run_list(store: &RegistryStore, json: bool, plain: bool) -> Result<ExitCode, RegistryError> {
    if json {
        let records: Vec<&PluginRecord> = store.list().collect();
        println!("{}", to_json(&records));
    } else {
        print_table(store.list(), plain);
    }
    Ok(ExitCode::SUCCESS)
}

/// Run `plugreg show <key>`.
pub fn run_show(store: &RegistryStore, key: &str) -> Result<ExitCode, RegistryError> {
    println!("{}", to_json(store.get(key)?));
    Ok(ExitCode::SUCCESS)
}

/// Run `plugreg search <query>`.
pub fn run_search(store: &RegistryStore, query: &str, plain: bool) -> Result<ExitCode, RegistryError> {
    let results = search(store, query);
    if results.is_empty() {
        println!("no plugins match `{query}`");
        return Ok(ExitCode::from(1));
    }
    print_table(results.into_iter(), plain);
    Ok(ExitCode::SUCCESS)
}

/// Parse `--overrides` JSON text.
pub fn parse_overrides(raw: Option<&str>) -> Result<Option<Value>, RegistryError> {
    raw.map(|text| {
        serde_json::from_str(text).map_err(|e| RegistryError::InvalidOverrides {
            reason: format!("overrides are not valid JSON: {e}"),
        })
    })
    .transpose()
}

/// Run `plugreg resolve <key> <scope>`.
pub fn run_resolve(
    store: &RegistryStore,
    key: &str,
    scope: &str,
    overrides: Option<&str>,
    strict: bool,
) -> Result<ExitCode, RegistryError> {
    let overrides = parse_overrides(overrides)?;
    let resolved = resolve_named(
        store,
        key,
        scope,
        overrides.as_ref(),
        MergeMode::from_strict(strict),
    )?;
    println!("{}", to_json(&resolved.into_value()));
    Ok(ExitCode::SUCCESS)
}

/// Run `plugreg check <key> <required>`. Exits 1 when incompatible.
pub fn run_check(store: &RegistryStore, key: &str, required: &str) -> Result<ExitCode, RegistryError> {
    let record = store.get(key)?;
    if is_compatible(record, required)? {
        println!("compatible: {key} {} satisfies {required}", record.version);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("incompatible: {key} {} does not satisfy {required}", record.version);
        Ok(ExitCode::from(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> RegistryStore {
        plugreg_registry::builtin_store().unwrap()
    }

    #[test]
    fn parse_overrides_accepts_objects_and_absence() {
        assert_eq!(parse_overrides(None).unwrap(), None);
        assert_eq!(
            parse_overrides(Some(r#"{"threshold": 75}"#)).unwrap(),
            Some(json!({ "threshold": 75 }))
        );
    }

    #[test]
    fn parse_overrides_rejects_bad_json() {
        let err = parse_overrides(Some("{threshold")).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidOverrides { .. }));
    }

    #[test]
    fn resolve_surfaces_invalid_scope() {
        let err = run_resolve(&store(), "Quorum", "vote", None, false).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidScope { .. }));
    }

    #[test]
    fn resolve_surfaces_not_found() {
        let err = run_resolve(&store(), "Nope", "space", None, false).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { .. }));
    }

    #[test]
    fn strict_resolve_surfaces_merge_conflict() {
        let err = run_resolve(
            &store(),
            "SafeSnap",
            "proposal",
            Some(r#"{"safe": {"address": "0x1"}}"#),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::MergeConflict { .. }));
    }

    #[test]
    fn check_reports_exit_codes() {
        let store = store();
        assert_eq!(run_check(&store, "HAL", "1.0.0").unwrap(), ExitCode::SUCCESS);
        assert_eq!(run_check(&store, "HAL", "2.0.0").unwrap(), ExitCode::from(1));
        assert!(matches!(
            run_check(&store, "HAL", "???"),
            Err(RegistryError::InvalidVersionRange { .. })
        ));
    }

    #[test]
    fn row_lists_declared_scopes() {
        let store = store();
        let row = format_row(store.get("SafeSnap").unwrap(), false);
        assert!(row.contains("Gnosis SafeSnap"));
        assert!(row.trim_end().ends_with("space,proposal"));

        let charts = format_row(store.get("Charts").unwrap(), false);
        assert!(charts.trim_end().ends_with("space"));
    }
}
