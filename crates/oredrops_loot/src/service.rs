//! # Drop Service
//!
//! The one object a host holds: catalogs, registry and diagnostics wired
//! together behind `install` / `reload` / `get_drops`.
//!
//! ## Reload
//!
//! ```text
//! source ──read──> ConfigDocument ──load──> LoadReport ──replace_all──> new snapshot
//!    └─ LoadError: nothing published, active snapshot unchanged
//! ```

use std::fmt;
use std::sync::Arc;

use oredrops_core::{DropMethod, DropRng};

use crate::catalog::{AnyMaterial, ItemCatalog, ItemResult, MaterialCatalog};
use crate::config::{ConfigDocument, ConfigLoader, ConfigSource, PluginSettings};
use crate::diagnostics::Diagnostics;
use crate::entry::GrantedDrop;
use crate::error::{ConfigValidationError, LoadResult, ResolveError};
use crate::registry::{DropRegistry, RegistrySnapshot};
use crate::resolver::DropResolver;

/// What an install or reload published.
#[derive(Clone, Debug, PartialEq)]
pub struct ReloadSummary {
    /// Version of the published snapshot.
    pub version: u64,
    /// Settings read from the document.
    pub settings: PluginSettings,
    /// Materials with at least one entry.
    pub materials: usize,
    /// Entries across all materials.
    pub entries: usize,
    /// Everything skipped while loading.
    pub rejected: Vec<ConfigValidationError>,
}

impl fmt::Display for ReloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "loaded {} drop entries for {} block types ({}, {} skipped, v{})",
            self.entries,
            self.materials,
            self.settings,
            self.rejected.len(),
            self.version
        )
    }
}

/// Drop tables for one host.
pub struct DropService<C: ItemCatalog, M: MaterialCatalog = AnyMaterial> {
    items: C,
    materials: M,
    registry: DropRegistry,
    diagnostics: Diagnostics,
}

impl<C: ItemCatalog> DropService<C> {
    /// Service accepting every material key.
    pub fn new(items: C, diagnostics: Diagnostics) -> Self {
        Self::with_materials(items, AnyMaterial, diagnostics)
    }
}

impl<C: ItemCatalog, M: MaterialCatalog> DropService<C, M> {
    /// Service validating material keys against `materials`.
    pub fn with_materials(items: C, materials: M, diagnostics: Diagnostics) -> Self {
        Self {
            items,
            materials,
            registry: DropRegistry::default(),
            diagnostics,
        }
    }

    /// Validates `document` and publishes it as the next generation.
    pub fn install(&self, document: &ConfigDocument) -> ReloadSummary {
        let report = ConfigLoader::new(&self.items, &self.materials, &self.diagnostics).load(document);
        let entries = report.entry_count();
        let version = self.registry.replace_all(report.buckets, report.settings.method);
        let snapshot = self.registry.snapshot();
        let summary = ReloadSummary {
            version,
            settings: report.settings,
            materials: snapshot.material_count(),
            entries,
            rejected: report.rejected,
        };
        self.diagnostics.info(&summary);
        summary
    }

    /// Re-reads `source` and installs it.
    ///
    /// # Errors
    ///
    /// Read and syntax failures. The active snapshot is then left as it was.
    pub fn reload(&self, source: &dyn ConfigSource) -> LoadResult<ReloadSummary> {
        self.reload_with(source, |_| {})
    }

    /// [`reload`](Self::reload), handing the parsed settings to
    /// `before_install` ahead of publication. Not called when the read or
    /// parse fails.
    ///
    /// # Errors
    ///
    /// Read and syntax failures. The active snapshot is then left as it was.
    pub fn reload_with<F>(&self, source: &dyn ConfigSource, before_install: F) -> LoadResult<ReloadSummary>
    where
        F: FnOnce(&PluginSettings),
    {
        match ConfigDocument::read(source) {
            Ok(document) => {
                let (settings, _) = document.settings();
                before_install(&settings);
                Ok(self.install(&document))
            }
            Err(error) => {
                self.diagnostics.severe(format_args!(
                    "reload of {} failed, keeping previous drop tables: {error}",
                    source.describe()
                ));
                Err(error)
            }
        }
    }

    /// Drops for breaking `material` at `level`, using the thread's generator.
    pub fn get_drops(&self, material: &str, level: u32) -> Vec<ItemResult<C::Item>> {
        self.get_drops_with(material, level, &mut rand::thread_rng())
    }

    /// [`get_drops`](Self::get_drops) with a caller-supplied generator.
    ///
    /// Items the catalog fails to build are skipped with a warning.
    pub fn get_drops_with<R: DropRng>(
        &self,
        material: &str,
        level: u32,
        rng: &mut R,
    ) -> Vec<ItemResult<C::Item>> {
        self.resolve_ids_with(material, level, rng)
            .into_iter()
            .filter_map(|drop| match self.build(&drop) {
                Ok(result) => Some(result),
                Err(error) => {
                    self.diagnostics.warn(error);
                    None
                }
            })
            .collect()
    }

    /// Granted item ids, before the catalog builds anything.
    pub fn resolve_ids_with<R: DropRng>(&self, material: &str, level: u32, rng: &mut R) -> Vec<GrantedDrop> {
        let snapshot = self.registry.snapshot();
        let entries = snapshot.entries(material);
        if entries.is_empty() {
            return Vec::new();
        }
        self.diagnostics.debug(format_args!(
            "processing {} drops for {material} with {} at level {level}",
            entries.len(),
            snapshot.method().label()
        ));
        DropResolver::new(snapshot.method(), &self.diagnostics).resolve(entries, level, rng)
    }

    fn build(&self, drop: &GrantedDrop) -> Result<ItemResult<C::Item>, ResolveError> {
        let item = self
            .items
            .build(drop.item_id.as_str())
            .ok_or_else(|| ResolveError::ItemBuildFailed {
                item_id: drop.item_id.clone(),
            })?;
        self.diagnostics
            .debug(format_args!("granted {} x{}", drop.item_id, drop.quantity));
        Ok(ItemResult {
            item,
            quantity: drop.quantity,
        })
    }

    /// Active method.
    #[must_use]
    pub fn method(&self) -> DropMethod {
        self.registry.method()
    }

    /// Switches the method without reloading entries.
    pub fn set_method(&self, method: DropMethod) -> u64 {
        let version = self.registry.set_method(method);
        self.diagnostics
            .info(format_args!("drop method set to {}", method.label()));
        version
    }

    /// The current registry generation.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.registry.snapshot()
    }

    /// The live registry.
    #[must_use]
    pub fn registry(&self) -> &DropRegistry {
        &self.registry
    }

    /// The diagnostics sink.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// The item catalog.
    #[must_use]
    pub fn items(&self) -> &C {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::KnownItems;
    use crate::config::StaticSource;
    use oredrops_core::rng::seeded;

    const CONFIG: &str = r#"
        [drop-mechanics]
        method = "DIMINISHING"

        [block-drops.stone.pebble]
        oraxen-item = "pebble"
        chance = 100

        [block-drops.stone.ruby]
        oraxen-item = "ruby"
        chance = 2.5
    "#;

    fn service() -> DropService<KnownItems> {
        DropService::new(KnownItems::new(["pebble", "ruby"]), Diagnostics::default())
    }

    #[test]
    fn test_install_publishes() {
        let service = service();
        let summary = service.install(&ConfigDocument::parse(CONFIG).unwrap());
        assert_eq!(summary.version, 1);
        assert_eq!(summary.materials, 1);
        assert_eq!(summary.entries, 2);
        assert!(summary.rejected.is_empty());
        assert_eq!(service.method(), DropMethod::Diminishing);
    }

    #[test]
    fn test_unknown_material_yields_nothing() {
        let service = service();
        service.install(&ConfigDocument::parse(CONFIG).unwrap());
        assert!(service.get_drops("dirt", 3).is_empty());
    }

    #[test]
    fn test_get_drops_builds_items() {
        let service = service();
        service.install(&ConfigDocument::parse(CONFIG).unwrap());
        let drops = service.get_drops_with("stone", 0, &mut seeded(5));
        assert!(drops
            .iter()
            .any(|d| d.item.as_str() == "pebble" && d.quantity == 1));
    }

    #[test]
    fn test_failed_reload_is_noop() {
        let service = service();
        service.install(&ConfigDocument::parse(CONFIG).unwrap());
        let before = service.snapshot();
        let result = service.reload(&StaticSource::new("[block-drops"));
        assert!(result.is_err());
        let after = service.snapshot();
        assert_eq!(before.version(), after.version());
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_reload_with_sees_settings_before_publication() {
        let service = service();
        let seen = std::cell::Cell::new(None);
        let summary = service
            .reload_with(&StaticSource::new(format!("debug-mode = true\n{CONFIG}")), |settings| {
                // the new tables are not yet visible
                assert_eq!(service.snapshot().version(), 0);
                seen.set(Some(settings.debug_mode));
            })
            .unwrap();
        assert_eq!(seen.get(), Some(true));
        assert_eq!(summary.version, 1);

        let called = std::cell::Cell::new(false);
        assert!(service
            .reload_with(&StaticSource::new("[block-drops"), |_| called.set(true))
            .is_err());
        assert!(!called.get());
        assert_eq!(service.snapshot().version(), 1);
    }

    #[test]
    fn test_set_method() {
        let service = service();
        service.install(&ConfigDocument::parse(CONFIG).unwrap());
        service.set_method(DropMethod::BonusRolls);
        assert_eq!(service.method(), DropMethod::BonusRolls);
        assert_eq!(service.snapshot().entry_count(), 2);
    }

    #[test]
    fn test_summary_display() {
        let service = service();
        let summary = service.install(&ConfigDocument::parse(CONFIG).unwrap());
        assert_eq!(
            summary.to_string(),
            "loaded 2 drop entries for 1 block types (method=DIMINISHING, debug=false, 0 skipped, v1)"
        );
    }
}
