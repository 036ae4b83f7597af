//! Detects config keys missing from the on-disk file (older versions wrote
//! fewer fields) and optionally writes them back with their defaults.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)?;
    match yaml {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: top level is not a mapping",
            path.display()
        ))),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Other("default config is not a mapping".into())),
    }
}

/// Keys that a current config has but the file at `path` lacks.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let on_disk = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !on_disk.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Adds every missing key with its default value, keeping the rest of the
/// file untouched.
///   Returns:
///   Ok(true)  → file updated
///   Ok(false) → nothing was missing
pub fn fill_missing(path: &Path) -> AppResult<bool> {
    let mut on_disk = read_mapping(path)?;
    let defaults = default_mapping()?;
    let mut changed = false;

    for (k, v) in defaults {
        if !on_disk.contains_key(&k) {
            on_disk.insert(k, v);
            changed = true;
        }
    }

    if changed {
        let serialized = serde_yaml::to_string(&Value::Mapping(on_disk))?;
        fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;
    }

    Ok(changed)
}
