//! # Drop Entries
//!
//! A [`DropEntry`] is one configured `(item, chance, amount range)` attached
//! to a material. Entries are validated once, on construction, and are
//! immutable afterwards.

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::sync::Arc;

use oredrops_core::RarityTier;

use crate::error::EntryError;

/// Item identifier as understood by the host item catalog.
///
/// Cheap to clone: resolving a drop shares the text, never copies it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Arc<str>);

impl ItemId {
    /// The id text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Hash, Eq and Ord all follow the text, so sets keyed by id accept `&str`.
impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case-normalized material (block type) key: trimmed, ASCII upper case,
/// `[A-Z0-9_:]` only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialKey(Box<str>);

impl MaterialKey {
    /// Normalizes `raw`; `None` if it is empty or has other characters.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = Self::normalize(raw)?;
        Some(Self(normalized.into_owned().into_boxed_str()))
    }

    /// Normalized form of `raw`, borrowed when `raw` already is normalized.
    #[must_use]
    pub fn normalize(raw: &str) -> Option<Cow<'_, str>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(Self::is_key_byte) {
            return None;
        }
        if trimmed.bytes().any(|b| b.is_ascii_lowercase()) {
            Some(Cow::Owned(trimmed.to_ascii_uppercase()))
        } else {
            Some(Cow::Borrowed(trimmed))
        }
    }

    /// The normalized key.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_key_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'_' || b == b':'
    }
}

impl Borrow<str> for MaterialKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated drop entry.
#[derive(Clone, Debug, PartialEq)]
pub struct DropEntry {
    item_id: ItemId,
    chance: f64,
    min_amount: u32,
    max_amount: u32,
}

impl DropEntry {
    /// Validates and builds an entry.
    ///
    /// # Errors
    ///
    /// - [`EntryError::MissingItem`] for an empty item id
    /// - [`EntryError::InvalidChance`] unless `0 < chance <= 100`
    /// - [`EntryError::InvalidAmounts`] if `max_amount < min_amount`
    pub fn new(
        item_id: impl Into<ItemId>,
        chance: f64,
        min_amount: u32,
        max_amount: u32,
    ) -> Result<Self, EntryError> {
        let item_id = item_id.into();
        if item_id.as_str().trim().is_empty() {
            return Err(EntryError::MissingItem);
        }
        if !(chance > 0.0 && chance <= 100.0) {
            return Err(EntryError::InvalidChance(chance));
        }
        if max_amount < min_amount {
            return Err(EntryError::InvalidAmounts {
                min: i64::from(min_amount),
                max: i64::from(max_amount),
            });
        }
        Ok(Self {
            item_id,
            chance,
            min_amount,
            max_amount,
        })
    }

    /// Item granted by this entry.
    #[inline]
    #[must_use]
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Base chance in percent, `(0, 100]`.
    #[inline]
    #[must_use]
    pub fn chance(&self) -> f64 {
        self.chance
    }

    /// Minimum amount per successful roll.
    #[inline]
    #[must_use]
    pub fn min_amount(&self) -> u32 {
        self.min_amount
    }

    /// Maximum amount per successful roll.
    #[inline]
    #[must_use]
    pub fn max_amount(&self) -> u32 {
        self.max_amount
    }

    /// Rarity tier of the base chance.
    #[must_use]
    pub fn tier(&self) -> RarityTier {
        RarityTier::classify(self.chance)
    }
}

/// One granted result: an item id and a positive quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrantedDrop {
    /// Item to grant.
    pub item_id: ItemId,
    /// Quantity, always > 0.
    pub quantity: u32,
}
