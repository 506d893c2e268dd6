//! # Loot Error Types
//!
//! Nothing here is fatal to the host:
//!
//! - [`ConfigValidationError`] - one rejected entry or section; loading continues.
//! - [`LoadError`] - the whole source could not be read or parsed; the
//!   active registry stays as it was.
//! - [`ResolveError`] - a drop could not be turned into an item; that one
//!   drop is skipped.

use std::path::PathBuf;
use thiserror::Error;

use crate::entry::ItemId;

/// Why a single drop entry failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    /// No item id, or an empty one.
    #[error("missing item id")]
    MissingItem,

    /// Chance outside `(0, 100]`.
    #[error("invalid chance {0}%")]
    InvalidChance(f64),

    /// Negative minimum or `max < min`.
    #[error("invalid amounts (min={min}, max={max})")]
    InvalidAmounts {
        /// Configured minimum.
        min: i64,
        /// Configured maximum.
        max: i64,
    },
}

/// A rejected entry or section. Logged and skipped, never fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// The entry's own values are invalid.
    #[error("{path}: {source}")]
    Entry {
        /// Config path of the entry (`block-drops.<material>.<entry>`).
        path: String,
        /// What was wrong.
        #[source]
        source: EntryError,
    },

    /// The item catalog does not know the id.
    #[error("{path}: item '{item_id}' is unknown")]
    UnknownItem {
        /// Config path of the entry.
        path: String,
        /// The unresolvable id.
        item_id: String,
    },

    /// The material key is malformed or unknown to the host.
    #[error("{path}: invalid block type '{material}'")]
    UnknownMaterial {
        /// Config path of the material section.
        path: String,
        /// The key as written.
        material: String,
    },

    /// `drop-mechanics.method` names no known method.
    #[error("drop-mechanics.method: unknown method '{0}', using HYBRID")]
    UnknownMethod(String),

    /// A value has the wrong shape (not a table, wrong field type, ...).
    #[error("{path}: {reason}")]
    Malformed {
        /// Config path of the value.
        path: String,
        /// Parser message.
        reason: String,
    },
}

/// The configuration source as a whole is unusable.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source is not valid TOML.
    #[error("malformed configuration: {0}")]
    Syntax(#[from] toml::de::Error),
}

/// A granted drop could not be delivered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The item catalog failed to build the item.
    #[error("item '{item_id}' could not be built")]
    ItemBuildFailed {
        /// The id that failed.
        item_id: ItemId,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;
