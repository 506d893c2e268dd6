//! Hybrid: common entries mostly get a chance boost, rare entries mostly
//! get extra rolls.

use super::{BonusCurve, RollPlan, SOFT_CAP};
use crate::rarity::{RarityTier, TIER_COUNT};

/// One tier's share of chance boost versus extra rolls.
#[derive(Clone, Copy, Debug)]
struct HybridRow {
    boost: BonusCurve,
    levels_per_roll: u32,
}

/// Indexed by `RarityTier::index`. VeryRare and Legendary share a row.
const HYBRID_TABLE: [HybridRow; TIER_COUNT] = [
    HybridRow { boost: BonusCurve::Linear(0.8), levels_per_roll: 5 },
    HybridRow { boost: BonusCurve::Linear(0.4), levels_per_roll: 3 },
    HybridRow { boost: BonusCurve::Log(0.1), levels_per_roll: 2 },
    HybridRow { boost: BonusCurve::Sqrt(0.05), levels_per_roll: 1 },
    HybridRow { boost: BonusCurve::Sqrt(0.05), levels_per_roll: 1 },
];

/// The Hybrid strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct HybridScaler;

impl HybridScaler {
    /// Boosted chance (capped at [`SOFT_CAP`]) and roll count for `(base, level)`.
    ///
    /// Planning is constant-time, but resolving the plan draws once per
    /// roll. VeryRare and Legendary entries get `1 + level` rolls, so a
    /// level of `n` costs `n + 1` draws per such entry on every break.
    /// Hosts that accept arbitrary custom enchant levels should bound the
    /// level before calling in.
    #[must_use]
    pub fn plan(base: f64, level: u32) -> RollPlan {
        if level == 0 {
            return RollPlan::single(base);
        }
        let row = HYBRID_TABLE[RarityTier::classify(base).index()];
        let chance = (base + row.boost.bonus(base, level)).min(SOFT_CAP);
        let rolls = 1u32.saturating_add(level / row.levels_per_roll);
        RollPlan::new(rolls, chance)
    }
}
