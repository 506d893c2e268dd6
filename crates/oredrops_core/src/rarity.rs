//! # Rarity Tiers
//!
//! Every drop entry is classified by its base chance. The tier decides how
//! aggressively an enchant level scales the entry.
//!
//! ```text
//! chance:  0 ─── 0.1 ─── 1 ─── 10 ─── 50 ─── 100
//! tier:    Legendary │ VeryRare │ Rare │ Uncommon │ Common
//! ```
//!
//! Intervals are `(min, max]`: a boundary value belongs to the tier below it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rarity tier derived from a base drop chance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RarityTier {
    /// (50, 100] - full enchant bonus.
    Common = 0,
    /// (10, 50] - reduced bonus.
    Uncommon = 1,
    /// (1, 10] - heavily reduced.
    Rare = 2,
    /// (0.1, 1] - minimal.
    VeryRare = 3,
    /// Everything else, including <= 0.1 - symbolic bonus only.
    Legendary = 4,
}

/// Number of rarity tiers. Lookup tables are indexed by `RarityTier::index`.
pub const TIER_COUNT: usize = 5;

/// `(tier, min exclusive, max inclusive)` in classification order.
///
/// Legendary has no row; it is the fallback.
const TIER_BOUNDS: [(RarityTier, f64, f64); 4] = [
    (RarityTier::Common, 50.0, 100.0),
    (RarityTier::Uncommon, 10.0, 50.0),
    (RarityTier::Rare, 1.0, 10.0),
    (RarityTier::VeryRare, 0.1, 1.0),
];

impl RarityTier {
    /// All tiers, most common first.
    pub const ALL: [Self; TIER_COUNT] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::VeryRare,
        Self::Legendary,
    ];

    /// Classifies a base chance (in percent).
    ///
    /// Total: any input, including NaN or out-of-range values, yields a tier.
    #[must_use]
    pub fn classify(chance: f64) -> Self {
        TIER_BOUNDS
            .iter()
            .find(|(_, min, max)| chance > *min && chance <= *max)
            .map_or(Self::Legendary, |(tier, _, _)| *tier)
    }

    /// Position of this tier in per-tier lookup tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Configuration-style name (`VERY_RARE`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Uncommon => "UNCOMMON",
            Self::Rare => "RARE",
            Self::VeryRare => "VERY_RARE",
            Self::Legendary => "LEGENDARY",
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_bounds_are_inclusive() {
        assert_eq!(RarityTier::classify(100.0), RarityTier::Common);
        assert_eq!(RarityTier::classify(50.0), RarityTier::Uncommon);
        assert_eq!(RarityTier::classify(10.0), RarityTier::Rare);
        assert_eq!(RarityTier::classify(1.0), RarityTier::VeryRare);
        assert_eq!(RarityTier::classify(0.1), RarityTier::Legendary);
    }

    #[test]
    fn test_interior_values() {
        assert_eq!(RarityTier::classify(75.0), RarityTier::Common);
        assert_eq!(RarityTier::classify(50.000_1), RarityTier::Common);
        assert_eq!(RarityTier::classify(25.0), RarityTier::Uncommon);
        assert_eq!(RarityTier::classify(5.0), RarityTier::Rare);
        assert_eq!(RarityTier::classify(0.5), RarityTier::VeryRare);
        assert_eq!(RarityTier::classify(0.05), RarityTier::Legendary);
    }

    #[test]
    fn test_out_of_range_falls_back_to_legendary() {
        assert_eq!(RarityTier::classify(0.0), RarityTier::Legendary);
        assert_eq!(RarityTier::classify(-3.0), RarityTier::Legendary);
        assert_eq!(RarityTier::classify(150.0), RarityTier::Legendary);
        assert_eq!(RarityTier::classify(f64::NAN), RarityTier::Legendary);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, tier) in RarityTier::ALL.iter().enumerate() {
            assert_eq!(tier.index(), i);
        }
    }
}
