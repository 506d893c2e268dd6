//! # OREDROPS
//!
//! Custom ore drops whose odds scale with Fortune. This crate is the
//! host-facing side: plugin lifecycle, enchant lookup and admin commands.
//! The mechanics live in `oredrops_core`, the drop tables in
//! `oredrops_loot`.
//!
//! ## Quick Start
//!
//! ```rust
//! use oredrops::{OreDrops, StaticSource, KnownItems, NoCustomEnchants};
//!
//! let plugin: OreDrops<KnownItems, NoCustomEnchants> = OreDrops::enable(
//!     KnownItems::new(["ruby"]),
//!     None,
//!     StaticSource::new("[block-drops.stone.ruby]\noraxen-item = \"ruby\"\nchance = 5\n"),
//! );
//! assert_eq!(plugin.info().materials, 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod command;
pub mod enchant;
pub mod plugin;

pub use command::{complete, Command, CommandOutcome, CommandSender};
pub use enchant::{
    fortune_level, has_silk_touch, looting_level, CustomEnchantApi, CustomEnchants, EnchantedTool,
    NoCustomEnchants, VanillaEnchant,
};
pub use plugin::{save_default_config, OreDrops, PluginInfo, DEFAULT_CONFIG, VERSION};

pub use oredrops_core::{DropMethod, RarityTier};
pub use oredrops_loot::{
    ConfigSource, DropService, FileSource, ItemCatalog, ItemResult, KnownItems, MaterialCatalog,
    ReloadSummary, StaticSource,
};
