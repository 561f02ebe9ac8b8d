// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deep merge of plugin defaults with caller overrides.
//!
//! Mappings merge key by key, recursively. Every other value (scalars,
//! arrays, null) is replaced outright by the override; arrays are never
//! merged element-wise.

use serde_json::Value;

use crate::record::ConfigMap;

/// Merge `overrides` onto a copy of `base`. The override wins at every leaf.
pub fn deep_merge(base: &ConfigMap, overrides: &ConfigMap) -> ConfigMap {
    let mut merged = base.clone();
    merge_lenient(&mut merged, overrides);
    merged
}

/// Like [`deep_merge`], but refuses to put a mapping where `base` holds a
/// non-mapping value at one of the `fixed` dotted paths.
///
/// On conflict returns the dotted path of the offending value. Keys that
/// themselves contain `.` cannot be addressed by a fixed path; catalog loading
/// rejects them in any scope that declares fixed paths.
pub fn deep_merge_strict(
    base: &ConfigMap,
    overrides: &ConfigMap,
    fixed: &[String],
) -> Result<ConfigMap, String> {
    let mut merged = base.clone();
    let mut path = Vec::new();
    merge_checked(&mut merged, overrides, fixed, &mut path)?;
    Ok(merged)
}

fn merge_lenient(target: &mut ConfigMap, overrides: &ConfigMap) {
    for (key, value) in overrides {
        if let (Some(Value::Object(existing)), Value::Object(nested)) = (target.get_mut(key), value)
        {
            merge_lenient(existing, nested);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
}

fn merge_checked<'a>(
    target: &mut ConfigMap,
    overrides: &'a ConfigMap,
    fixed: &[String],
    path: &mut Vec<&'a str>,
) -> Result<(), String> {
    for (key, value) in overrides {
        path.push(key);
        if let (Some(Value::Object(existing)), Value::Object(nested)) = (target.get_mut(key), value)
        {
            merge_checked(existing, nested, fixed, path)?;
        } else {
            let base_is_leaf = target.get(key).is_some_and(|v| !v.is_object());
            if base_is_leaf && value.is_object() {
                let dotted = path.join(".");
                if fixed.iter().any(|p| *p == dotted) {
                    return Err(dotted);
                }
            }
            target.insert(key.clone(), value.clone());
        }
        path.pop();
    }
    Ok(())
}
