//! Versioned settings and their migration
//!
//! A migration table lists the default settings for every version that
//! changed them. Migrating walks the table in version order and applies each
//! step newer than the stored version, either by merging with the step's
//! defaults or through a custom function.

use crate::error::{FieldPathError, Result};
use log::debug;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::str::FromStr;

/// A `major.minor.patch` version, ordered component by component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for Version {
    type Err = FieldPathError;

    /// Parse `x.y.z`, optionally prefixed with `v`.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(FieldPathError::invalid_version(
                s,
                "version string may not be empty, expected 'x.y.z'",
            ));
        }
        let trimmed = s.strip_prefix('v').unwrap_or(s);

        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(FieldPathError::invalid_version(s, "expected 'x.y.z'"));
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                FieldPathError::invalid_version(
                    s,
                    "expected 'x.y.z', where x, y and z are integers",
                )
            })?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Settings data tagged with the version that wrote it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub version: Version,
    pub data: Value,
}

/// Receives the old data and the step's defaults, returns the new data.
pub type CustomMigration = Box<dyn Fn(&Value, &Value) -> Result<Value> + Send + Sync>;

/// One entry of a migration table
pub struct MigrationStep {
    pub version: Version,
    pub default_settings: Value,
    pub migration: Option<CustomMigration>,
}

impl MigrationStep {
    pub fn new(version: Version, default_settings: Value) -> Self {
        Self {
            version,
            default_settings,
            migration: None,
        }
    }

    pub fn with_migration<F>(mut self, migration: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.migration = Some(Box::new(migration));
        self
    }

    /// Move `settings` to this step's version.
    pub fn apply(&self, settings: &Settings) -> Result<Settings> {
        let data = match &self.migration {
            Some(migrate) => migrate(&settings.data, &self.default_settings)?,
            None => apply_default_migration(&settings.data, &self.default_settings),
        };
        Ok(Settings {
            version: self.version,
            data,
        })
    }
}

impl fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationStep")
            .field("version", &self.version)
            .field("default_settings", &self.default_settings)
            .field("custom", &self.migration.is_some())
            .finish()
    }
}

/// Keep every old value whose key the new defaults still have, fill the rest
/// from the defaults and drop keys the defaults no longer name.
///
/// Only top-level keys are merged. Defaults that are not a mapping replace the
/// old data outright.
pub fn apply_default_migration(old: &Value, defaults: &Value) -> Value {
    let Value::Mapping(default_map) = defaults else {
        return defaults.clone();
    };
    let old_map = old.as_mapping();

    let migrated: Mapping = default_map
        .iter()
        .map(|(key, default)| {
            let value = old_map
                .and_then(|old| old.get(key))
                .unwrap_or(default)
                .clone();
            (key.clone(), value)
        })
        .collect();
    Value::Mapping(migrated)
}

/// Apply every step of `table` newer than `settings.version`, oldest first.
pub fn migrate_settings(settings: Settings, table: &[MigrationStep]) -> Result<Settings> {
    let mut steps: Vec<&MigrationStep> = table.iter().collect();
    steps.sort_by_key(|step| step.version);

    let mut settings = settings;
    for step in steps {
        if step.version > settings.version {
            debug!("Migrating settings {} -> {}", settings.version, step.version);
            settings = step.apply(&settings)?;
        }
    }
    Ok(settings)
}
