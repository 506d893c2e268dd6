//! # Configuration Loading
//!
//! **One bad entry never rejects the document.**
//!
//! The source text is parsed into a [`toml::Table`] once; only a read or
//! syntax failure is fatal ([`LoadError`]). The tree is then walked by
//! hand, each entry deserialized and validated on its own, and every
//! rejection collected as a [`ConfigValidationError`].
//!
//! ```toml
//! debug-mode = false
//!
//! [drop-mechanics]
//! method = "HYBRID"
//!
//! [block-drops.diamond_ore.ruby]
//! oraxen-item = "ruby"
//! chance = 2.5
//! min-amount = 1
//! max-amount = 3
//! ```
//!
//! Entry fields are checked in order: item (present, then known to the
//! catalog), chance, amounts. The first failure is the one reported.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use oredrops_core::{DropMethod, ScalingReport};
use serde::Deserialize;

use crate::catalog::{ItemCatalog, MaterialCatalog};
use crate::diagnostics::Diagnostics;
use crate::entry::{DropEntry, MaterialKey};
use crate::error::{ConfigValidationError, EntryError, LoadError, LoadResult};

/// Top-level key of the debug switch.
pub const DEBUG_MODE_KEY: &str = "debug-mode";
/// Section holding the drop method.
pub const MECHANICS_SECTION: &str = "drop-mechanics";
/// Section holding the per-material drop tables.
pub const BLOCK_DROPS_SECTION: &str = "block-drops";

/// Where configuration text comes from.
pub trait ConfigSource {
    /// Human-readable origin, for diagnostics.
    fn describe(&self) -> String;

    /// Reads the whole configuration text.
    ///
    /// # Errors
    ///
    /// [`LoadError::Io`] if the text cannot be read.
    fn read(&self) -> LoadResult<String>;
}

/// A configuration file on disk, re-read on every load.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> LoadResult<String> {
        fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Configuration text held in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    /// Source returning `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ConfigSource for StaticSource {
    fn describe(&self) -> String {
        "<inline configuration>".to_owned()
    }

    fn read(&self) -> LoadResult<String> {
        Ok(self.text.clone())
    }
}

/// A syntactically valid configuration document.
#[derive(Clone, Debug, Default)]
pub struct ConfigDocument {
    table: toml::Table,
}

impl ConfigDocument {
    /// Parses `text`.
    ///
    /// # Errors
    ///
    /// [`LoadError::Syntax`] if `text` is not valid TOML.
    pub fn parse(text: &str) -> LoadResult<Self> {
        Ok(Self {
            table: toml::from_str(text)?,
        })
    }

    /// Reads and parses `source`.
    ///
    /// # Errors
    ///
    /// Whatever reading or parsing the source fails with.
    pub fn read(source: &dyn ConfigSource) -> LoadResult<Self> {
        Self::parse(&source.read()?)
    }

    /// The raw table.
    #[must_use]
    pub fn table(&self) -> &toml::Table {
        &self.table
    }

    /// Plugin-wide settings, plus anything rejected while reading them.
    #[must_use]
    pub fn settings(&self) -> (PluginSettings, Vec<ConfigValidationError>) {
        let mut rejected = Vec::new();
        let mut settings = PluginSettings::default();

        match self.table.get(DEBUG_MODE_KEY) {
            None => {}
            Some(toml::Value::Boolean(flag)) => settings.debug_mode = *flag,
            Some(other) => rejected.push(malformed(
                DEBUG_MODE_KEY,
                format!("expected a boolean, found {}", other.type_str()),
            )),
        }

        match self.table.get(MECHANICS_SECTION) {
            None => {}
            Some(toml::Value::Table(section)) => match section.get("method") {
                None => {}
                Some(toml::Value::String(name)) => match name.parse::<DropMethod>() {
                    Ok(method) => settings.method = method,
                    Err(_) => rejected.push(ConfigValidationError::UnknownMethod(name.clone())),
                },
                Some(other) => rejected.push(ConfigValidationError::UnknownMethod(other.to_string())),
            },
            Some(other) => rejected.push(malformed(
                MECHANICS_SECTION,
                format!("expected a table, found {}", other.type_str()),
            )),
        }

        (settings, rejected)
    }
}

/// Plugin-wide settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PluginSettings {
    /// Verbose drop diagnostics.
    pub debug_mode: bool,
    /// Active drop method.
    pub method: DropMethod,
}

impl fmt::Display for PluginSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "method={}, debug={}", self.method, self.debug_mode)
    }
}

/// One entry as written, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawEntry {
    #[serde(default)]
    oraxen_item: Option<String>,
    #[serde(default)]
    chance: f64,
    #[serde(default = "default_amount")]
    min_amount: i64,
    #[serde(default = "default_amount")]
    max_amount: i64,
}

const fn default_amount() -> i64 {
    1
}

/// Everything a load produced.
#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    /// Plugin-wide settings.
    pub settings: PluginSettings,
    /// Accepted entries per material, in document order (`toml` is built with
    /// `preserve_order`). No bucket is empty.
    pub buckets: HashMap<MaterialKey, Vec<DropEntry>>,
    /// Everything that was skipped, and why.
    pub rejected: Vec<ConfigValidationError>,
}

impl LoadReport {
    /// Total accepted entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Walks a [`ConfigDocument`] into validated drop tables.
pub struct ConfigLoader<'a, C: ?Sized, M: ?Sized> {
    items: &'a C,
    materials: &'a M,
    diagnostics: &'a Diagnostics,
}

impl<'a, C, M> ConfigLoader<'a, C, M>
where
    C: ItemCatalog + ?Sized,
    M: MaterialCatalog + ?Sized,
{
    /// Loader checking ids against `items` and keys against `materials`.
    pub fn new(items: &'a C, materials: &'a M, diagnostics: &'a Diagnostics) -> Self {
        Self {
            items,
            materials,
            diagnostics,
        }
    }

    /// Loads settings and drop tables. Every rejection is logged at `warn`.
    #[must_use]
    pub fn load(&self, document: &ConfigDocument) -> LoadReport {
        let (settings, mut rejected) = document.settings();
        let mut buckets: HashMap<MaterialKey, Vec<DropEntry>> = HashMap::new();

        match document.table().get(BLOCK_DROPS_SECTION) {
            None => self
                .diagnostics
                .warn(format_args!("no '{BLOCK_DROPS_SECTION}' section found in config")),
            Some(toml::Value::Table(materials)) => {
                for (raw_key, value) in materials {
                    self.load_material(raw_key, value, settings.method, &mut buckets, &mut rejected);
                }
            }
            Some(other) => rejected.push(malformed(
                BLOCK_DROPS_SECTION,
                format!("expected a table, found {}", other.type_str()),
            )),
        }

        buckets.retain(|_, entries| !entries.is_empty());
        for error in &rejected {
            self.diagnostics.warn(error);
        }

        LoadReport {
            settings,
            buckets,
            rejected,
        }
    }

    fn load_material(
        &self,
        raw_key: &str,
        value: &toml::Value,
        method: DropMethod,
        buckets: &mut HashMap<MaterialKey, Vec<DropEntry>>,
        rejected: &mut Vec<ConfigValidationError>,
    ) {
        let path = format!("{BLOCK_DROPS_SECTION}.{raw_key}");
        let Some(key) = MaterialKey::parse(raw_key).filter(|key| self.materials.is_known(key)) else {
            rejected.push(ConfigValidationError::UnknownMaterial {
                path,
                material: raw_key.to_owned(),
            });
            return;
        };
        let toml::Value::Table(entries) = value else {
            rejected.push(malformed(
                &path,
                format!("expected a table, found {}", value.type_str()),
            ));
            return;
        };

        let bucket = buckets.entry(key.clone()).or_default();
        for (entry_key, entry_value) in entries {
            let entry_path = format!("{path}.{entry_key}");
            match self.load_entry(&entry_path, entry_value) {
                Ok(entry) => {
                    self.trace_entry(&key, &entry, method);
                    bucket.push(entry);
                }
                Err(error) => rejected.push(error),
            }
        }
    }

    fn load_entry(&self, path: &str, value: &toml::Value) -> Result<DropEntry, ConfigValidationError> {
        let raw: RawEntry = value
            .clone()
            .try_into()
            .map_err(|error: toml::de::Error| malformed(path, error.message().to_owned()))?;
        let entry_error = |source| ConfigValidationError::Entry {
            path: path.to_owned(),
            source,
        };

        let item_id = match raw.oraxen_item.as_deref().map(str::trim) {
            None | Some("") => return Err(entry_error(EntryError::MissingItem)),
            Some(id) => id,
        };
        if !self.items.exists(item_id) {
            return Err(ConfigValidationError::UnknownItem {
                path: path.to_owned(),
                item_id: item_id.to_owned(),
            });
        }
        if !(raw.chance > 0.0 && raw.chance <= 100.0) {
            return Err(entry_error(EntryError::InvalidChance(raw.chance)));
        }
        let invalid_amounts = || {
            entry_error(EntryError::InvalidAmounts {
                min: raw.min_amount,
                max: raw.max_amount,
            })
        };
        let min = u32::try_from(raw.min_amount).map_err(|_| invalid_amounts())?;
        let max = u32::try_from(raw.max_amount).map_err(|_| invalid_amounts())?;

        DropEntry::new(item_id, raw.chance, min, max).map_err(entry_error)
    }

    fn trace_entry(&self, key: &MaterialKey, entry: &DropEntry, method: DropMethod) {
        if !self.diagnostics.debug_enabled() {
            return;
        }
        self.diagnostics.debug(format_args!(
            "registered {} for {key}: {}% ({}), amount {}-{}",
            entry.item_id(),
            entry.chance(),
            entry.tier(),
            entry.min_amount(),
            entry.max_amount()
        ));
        for line in ScalingReport::standard(entry.chance(), method).lines {
            self.diagnostics.debug(format_args!("  {line}"));
        }
    }
}

fn malformed(path: &str, reason: String) -> ConfigValidationError {
    ConfigValidationError::Malformed {
        path: path.to_owned(),
        reason,
    }
}
