//! # OREDROPS Loot
//!
//! Configured drop tables on top of the `oredrops_core` mechanics.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ ConfigSource │──>│ ConfigLoader │──>│ DropRegistry │  Arc<RegistrySnapshot>
//! └──────────────┘   └──────┬───────┘   └──────┬───────┘
//!                           │ exists()         │ entries + method
//!                    ┌──────┴───────┐   ┌──────┴───────┐
//!                    │ ItemCatalog  │<──│ DropResolver │──> Vec<ItemResult>
//!                    └──────────────┘   └──────────────┘
//!                          build()
//! ```
//!
//! ## Guarantees
//!
//! 1. **Per-entry validation** - a bad entry is skipped, never the document
//! 2. **Stage then swap** - a reload is published whole or not at all
//! 3. **No lock across a roll** - readers clone a snapshot and release
//! 4. **Isolated failures** - an item that fails to build costs only itself

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod entry;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod service;

pub use catalog::{AnyMaterial, ItemCatalog, ItemResult, KnownItems, MaterialCatalog};
pub use config::{
    ConfigDocument, ConfigLoader, ConfigSource, FileSource, LoadReport, PluginSettings, StaticSource,
};
pub use diagnostics::{DebugFlag, Diagnostics};
pub use entry::{DropEntry, GrantedDrop, ItemId, MaterialKey};
pub use error::{ConfigValidationError, EntryError, LoadError, LoadResult, ResolveError};
pub use registry::{Buckets, DropRegistry, RegistrySnapshot};
pub use resolver::DropResolver;
pub use service::{DropService, ReloadSummary};

pub use oredrops_core::{DropMethod, RarityTier};
