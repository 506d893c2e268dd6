//! Bonus rolls: the chance never moves, the enchant buys extra rolls.
//!
//! With a 0.1% entry, Fortune III gives 1 roll (~0.1%), Fortune X gives 2
//! rolls (~0.2%): far below the 3%+ a flat chance boost would hand out.

use super::RollPlan;
use crate::rarity::{RarityTier, TIER_COUNT};

/// Enchant levels needed per bonus roll, indexed by `RarityTier::index`.
const LEVELS_PER_BONUS_ROLL: [u32; TIER_COUNT] = [1, 2, 3, 5, 10];

/// The Bonus-Rolls strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct RollScaler;

impl RollScaler {
    /// Extra rolls granted to a `tier` entry at `level` (truncating division).
    #[inline]
    #[must_use]
    pub const fn bonus_rolls(tier: RarityTier, level: u32) -> u32 {
        level / LEVELS_PER_BONUS_ROLL[tier.index()]
    }

    /// `1 + bonus_rolls` rolls at the unchanged base chance. Resolution
    /// cost grows with the roll count, see [`HybridScaler::plan`](super::HybridScaler::plan).
    #[must_use]
    pub fn plan(base: f64, level: u32) -> RollPlan {
        if level == 0 {
            return RollPlan::single(base);
        }
        let tier = RarityTier::classify(base);
        RollPlan::new(1u32.saturating_add(Self::bonus_rolls(tier, level)), base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn test_uncommon_worked_example() {
        let plan = RollScaler::plan(50.0, 3);
        assert_eq!(plan.rolls, 2);
        assert!((plan.chance_per_roll - 50.0).abs() < 1e-12);
        assert!((plan.cumulative_chance - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_roll_counts_per_tier() {
        assert_eq!(RollScaler::plan(80.0, 7).rolls, 8);
        assert_eq!(RollScaler::plan(30.0, 7).rolls, 4);
        assert_eq!(RollScaler::plan(5.0, 7).rolls, 3);
        assert_eq!(RollScaler::plan(0.5, 7).rolls, 2);
        assert_eq!(RollScaler::plan(0.05, 7).rolls, 1);
        assert_eq!(RollScaler::plan(0.05, 10).rolls, 2);
    }

    #[test]
    fn test_chance_is_never_scaled() {
        for level in [0, 1, 3, 10, 100] {
            assert!((RollScaler::plan(100.0, level).chance_per_roll - 100.0).abs() < 1e-12);
            assert!((RollScaler::plan(0.3, level).chance_per_roll - 0.3).abs() < 1e-12);
        }
    }

    #[test]
    fn test_huge_level_does_not_overflow() {
        assert_eq!(RollScaler::plan(75.0, u32::MAX).rolls, u32::MAX);
    }

    #[test]
    fn test_each_success_adds_an_amount() {
        let mut rng = seeded(21);
        // 100% chance, 4 rolls, amount exactly 3 per hit
        let outcome = RollScaler::plan(100.0, 3).resolve(3, 3, &mut rng);
        assert_eq!(outcome.successes, 4);
        assert_eq!(outcome.quantity, 12);
    }
}
