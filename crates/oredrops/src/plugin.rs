//! # Plugin Lifecycle
//!
//! [`OreDrops`] is what a host instantiates: it owns the drop service, the
//! custom enchant capability, the configuration source and the debug flag.
//!
//! ```text
//! enable ──> probe custom enchants ──> load config ──> ready
//!                                                       │
//!            block break ──> silk touch? ──yes──> no drops
//!                                 │no
//!                                 └──> fortune level ──> get_drops
//!
//! reload ──> read + parse ──ok──> set debug flag ──> stage-then-swap
//!                        └─err──> keep current tables
//! ```

use std::fs;
use std::io;
use std::path::Path;

use oredrops_core::{DropMethod, DropRng};
use oredrops_loot::{
    AnyMaterial, ConfigSource, DebugFlag, Diagnostics, DropService, ItemCatalog, ItemResult,
    LoadResult, MaterialCatalog, ReloadSummary,
};

use crate::enchant::{fortune_level, has_silk_touch, CustomEnchantApi, CustomEnchants, EnchantedTool};

/// Crate version reported by the `info` command.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration written on first start.
pub const DEFAULT_CONFIG: &str = include_str!("../config/oredrops.toml");

/// Writes [`DEFAULT_CONFIG`] to `path` unless a file is already there.
///
/// Returns whether a file was written.
///
/// # Errors
///
/// Any I/O error creating the parent directory or the file.
pub fn save_default_config(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

/// Snapshot of plugin state for the `info` command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginInfo {
    /// Crate version.
    pub version: &'static str,
    /// Active drop method.
    pub method: DropMethod,
    /// Debug diagnostics on or off.
    pub debug: bool,
    /// Current registry generation.
    pub registry_version: u64,
    /// Configured materials.
    pub materials: usize,
    /// Whether a custom enchant plugin is in use.
    pub custom_enchants: bool,
}

/// The running plugin.
pub struct OreDrops<C: ItemCatalog, A, M: MaterialCatalog = AnyMaterial> {
    service: DropService<C, M>,
    enchants: CustomEnchants<A>,
    source: Box<dyn ConfigSource + Send + Sync>,
    debug: DebugFlag,
}

impl<C: ItemCatalog, A> OreDrops<C, A> {
    /// Enables the plugin accepting every material key.
    pub fn enable<S>(items: C, custom_enchant_api: Option<A>, source: S) -> Self
    where
        S: ConfigSource + Send + Sync + 'static,
    {
        Self::enable_with_materials(items, AnyMaterial, custom_enchant_api, source)
    }
}

impl<C: ItemCatalog, A, M: MaterialCatalog> OreDrops<C, A, M> {
    /// Enables the plugin: probes custom enchants and loads the drop tables.
    ///
    /// A configuration that cannot be read or parsed is logged; the plugin
    /// then starts with no drop tables and can be reloaded later.
    pub fn enable_with_materials<S>(items: C, materials: M, custom_enchant_api: Option<A>, source: S) -> Self
    where
        S: ConfigSource + Send + Sync + 'static,
    {
        let debug = DebugFlag::default();
        let plugin = Self {
            service: DropService::with_materials(items, materials, Diagnostics::new(debug.clone())),
            enchants: CustomEnchants::probe(custom_enchant_api),
            source: Box::new(source),
            debug,
        };
        if let Err(error) = plugin.reload() {
            plugin
                .diagnostics()
                .severe(format_args!("starting without drop tables: {error}"));
        }
        plugin.diagnostics().info("OreDrops enabled");
        plugin
    }

    /// Re-reads the configuration source and swaps in the new tables.
    ///
    /// # Errors
    ///
    /// Read and syntax failures; the active tables are then kept.
    pub fn reload(&self) -> LoadResult<ReloadSummary> {
        self.service
            .reload_with(self.source.as_ref(), |settings| self.debug.set(settings.debug_mode))
    }

    /// Shuts the plugin down.
    pub fn disable(self) {
        self.diagnostics().info("OreDrops disabled");
    }

    /// Drops for breaking `material` with `tool`, on the thread's generator.
    pub fn on_block_break<T>(&self, material: &str, tool: &T) -> Vec<ItemResult<C::Item>>
    where
        T: EnchantedTool + ?Sized,
        A: CustomEnchantApi<T>,
    {
        self.on_block_break_with(material, tool, &mut rand::thread_rng())
    }

    /// [`on_block_break`](Self::on_block_break) with a caller-supplied generator.
    pub fn on_block_break_with<T, R>(&self, material: &str, tool: &T, rng: &mut R) -> Vec<ItemResult<C::Item>>
    where
        T: EnchantedTool + ?Sized,
        A: CustomEnchantApi<T>,
        R: DropRng,
    {
        if has_silk_touch(tool, &self.enchants) {
            self.diagnostics()
                .debug(format_args!("silk touch on {material}, no custom drops"));
            return Vec::new();
        }
        let level = fortune_level(tool, &self.enchants);
        self.service.get_drops_with(material, level, rng)
    }

    /// Whether debug diagnostics are on.
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug.get()
    }

    /// Switches debug diagnostics until the next reload.
    pub fn set_debug(&self, enabled: bool) {
        self.debug.set(enabled);
        self.diagnostics().info(format_args!(
            "debug mode {}",
            if enabled { "enabled" } else { "disabled" }
        ));
    }

    /// Current plugin state.
    #[must_use]
    pub fn info(&self) -> PluginInfo {
        let snapshot = self.service.snapshot();
        PluginInfo {
            version: VERSION,
            method: snapshot.method(),
            debug: self.debug_enabled(),
            registry_version: snapshot.version(),
            materials: snapshot.material_count(),
            custom_enchants: self.enchants.is_available(),
        }
    }

    /// The drop service.
    #[must_use]
    pub fn service(&self) -> &DropService<C, M> {
        &self.service
    }

    /// The custom enchant capability decided at startup.
    #[must_use]
    pub fn enchants(&self) -> &CustomEnchants<A> {
        &self.enchants
    }

    /// The diagnostics sink.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        self.service.diagnostics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enchant::testing::{MapApi, Tool};
    use crate::enchant::VanillaEnchant;
    use oredrops_core::rng::seeded;
    use oredrops_loot::{ConfigDocument, KnownItems, StaticSource};

    const CONFIG: &str = r#"
        debug-mode = true
        [drop-mechanics]
        method = "BONUS_ROLLS"
        [block-drops.diamond_ore.ruby]
        oraxen-item = "ruby"
        chance = 100
    "#;

    fn plugin(text: &str) -> OreDrops<KnownItems, MapApi> {
        OreDrops::enable(KnownItems::new(["ruby"]), Some(MapApi), StaticSource::new(text))
    }

    #[test]
    fn test_enable_loads_config() {
        let plugin = plugin(CONFIG);
        let info = plugin.info();
        assert_eq!(info.method, DropMethod::BonusRolls);
        assert!(info.debug);
        assert_eq!(info.materials, 1);
        assert_eq!(info.registry_version, 1);
        assert!(info.custom_enchants);
        assert_eq!(info.version, VERSION);
    }

    #[test]
    fn test_enable_survives_broken_config() {
        let plugin = plugin("[[[");
        assert_eq!(plugin.info().registry_version, 0);
        assert!(plugin.reload().is_err());
        assert!(plugin.on_block_break("diamond_ore", &Tool::plain()).is_empty());
    }

    #[test]
    fn test_silk_touch_suppresses_drops() {
        let plugin = plugin(CONFIG);
        let silk = Tool::plain().with_vanilla(VanillaEnchant::SilkTouch, 1);
        assert!(plugin
            .on_block_break_with("diamond_ore", &silk, &mut seeded(1))
            .is_empty());
        let custom_silk = Tool::plain().with_custom("Silk Touch", 1);
        assert!(plugin
            .on_block_break_with("diamond_ore", &custom_silk, &mut seeded(1))
            .is_empty());
    }

    #[test]
    fn test_fortune_adds_rolls() {
        // 100% Common entry under BonusRolls: one roll per Fortune level on top
        let plugin = plugin(CONFIG);
        let tool = Tool::plain()
            .with_vanilla(VanillaEnchant::Fortune, 2)
            .with_custom("Luck", 4);
        let drops = plugin.on_block_break_with("diamond_ore", &tool, &mut seeded(3));
        assert_eq!(drops.len(), 1);
        assert_eq!(drops[0].quantity, 5);
    }

    #[test]
    fn test_set_debug_lasts_until_reload() {
        let plugin = plugin(CONFIG);
        plugin.set_debug(false);
        assert!(!plugin.debug_enabled());
        plugin.reload().unwrap();
        assert!(plugin.debug_enabled());
    }

    #[test]
    fn test_failed_reload_keeps_debug_flag() {
        let plugin = plugin("[[[");
        plugin.set_debug(true);
        assert!(plugin.reload().is_err());
        assert!(plugin.debug_enabled());
    }

    #[test]
    fn test_save_default_config() {
        let dir = std::env::temp_dir().join(format!("oredrops_default_{}", std::process::id()));
        let path = dir.join("oredrops.toml");
        assert!(save_default_config(&path).unwrap());
        assert!(!save_default_config(&path).unwrap());
        let written = fs::read_to_string(&path).unwrap();
        assert!(ConfigDocument::parse(&written).is_ok());
        fs::remove_dir_all(&dir).ok();
    }
}
