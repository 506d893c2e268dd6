//! # Host Catalogs
//!
//! The loot crate never knows what an item or a block *is*. It asks the
//! host through two narrow traits:
//!
//! - [`ItemCatalog`] - does an item id exist, and build it on demand
//! - [`MaterialCatalog`] - is a material key a real block type
//!
//! [`KnownItems`] and [`AnyMaterial`] are ready-made implementations for
//! tools and tests that have no host behind them.

use std::collections::HashSet;

use crate::entry::{ItemId, MaterialKey};

/// Item lookup and construction, owned by the host.
pub trait ItemCatalog {
    /// Concrete item the host hands to the player.
    type Item;

    /// Whether `id` names a registered item. Checked at load time.
    fn exists(&self, id: &str) -> bool;

    /// Builds one item for `id`; `None` if the host cannot.
    fn build(&self, id: &str) -> Option<Self::Item>;
}

/// Block-type lookup, owned by the host.
pub trait MaterialCatalog {
    /// Whether `key` is a block type the host recognizes.
    fn is_known(&self, key: &MaterialKey) -> bool;
}

/// Accepts every syntactically valid material key.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyMaterial;

impl MaterialCatalog for AnyMaterial {
    #[inline]
    fn is_known(&self, _key: &MaterialKey) -> bool {
        true
    }
}

/// A fixed set of item ids; building an item yields its id.
#[derive(Clone, Debug, Default)]
pub struct KnownItems {
    ids: HashSet<ItemId>,
}

impl KnownItems {
    /// Catalog containing `ids`.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of known ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl ItemCatalog for KnownItems {
    type Item = ItemId;

    fn exists(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn build(&self, id: &str) -> Option<ItemId> {
        self.ids.get(id).cloned()
    }
}

/// A drop after the host built the concrete item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemResult<I> {
    /// The built item.
    pub item: I,
    /// How many to grant (> 0).
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_items() {
        let catalog = KnownItems::new(["ruby", "sapphire"]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.exists("ruby"));
        assert!(!catalog.exists("Ruby"));
        assert_eq!(catalog.build("sapphire"), Some(ItemId::from("sapphire")));
        assert_eq!(catalog.build("opal"), None);
    }

    #[test]
    fn test_build_shares_the_stored_id() {
        let catalog = KnownItems::new(["ruby"]);
        let first = catalog.build("ruby").unwrap();
        let second = catalog.build(&String::from("ruby")).unwrap();
        // both point at the catalog's own text; the lookup key is never copied
        assert!(std::ptr::eq(first.as_str(), second.as_str()));
    }

    #[test]
    fn test_any_material() {
        let key = MaterialKey::parse("stone").unwrap();
        assert!(AnyMaterial.is_known(&key));
    }
}
