//! Diminishing returns: the enchant raises the chance, less so for rarer tiers.

use super::{BonusCurve, RollEvent, RollOutcome, SOFT_CAP};
use crate::amount::AmountSampler;
use crate::rarity::{RarityTier, TIER_COUNT};
use crate::rng::DropRng;

/// Chance bonus per tier, indexed by `RarityTier::index`.
///
/// Common +1%/level, Uncommon +0.5%/level, then proportional to the base
/// chance with log / sqrt growth.
const DIMINISHING_BONUS: [BonusCurve; TIER_COUNT] = [
    BonusCurve::Linear(1.0),
    BonusCurve::Linear(0.5),
    BonusCurve::Log(0.15),
    BonusCurve::Sqrt(0.1),
    BonusCurve::Log(0.02),
];

/// The Diminishing-Returns strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChanceScaler;

impl ChanceScaler {
    /// Final chance for `base` at `level`, capped at [`SOFT_CAP`].
    ///
    /// Level 0 returns `base` untouched.
    #[must_use]
    pub fn scale(base: f64, level: u32) -> f64 {
        if level == 0 {
            return base;
        }
        let tier = RarityTier::classify(base);
        let bonus = DIMINISHING_BONUS[tier.index()].bonus(base, level);
        (base + bonus).min(SOFT_CAP)
    }

    /// One draw against the scaled chance; a hit samples an amount with
    /// bonus-item trials.
    pub fn resolve<R: DropRng>(
        base: f64,
        level: u32,
        min: u32,
        max: u32,
        rng: &mut R,
    ) -> RollOutcome {
        Self::resolve_with(base, level, min, max, rng, |_| {})
    }

    /// [`resolve`](Self::resolve), reporting the single roll to `on_roll`.
    pub fn resolve_with<R, F>(
        base: f64,
        level: u32,
        min: u32,
        max: u32,
        rng: &mut R,
        mut on_roll: F,
    ) -> RollOutcome
    where
        R: DropRng,
        F: FnMut(RollEvent),
    {
        let chance = Self::scale(base, level);
        let draw = rng.roll_percent();
        let amount = (draw < chance).then(|| AmountSampler::sample_with_bonus(min, max, level, rng));
        on_roll(RollEvent {
            index: 0,
            draw,
            chance,
            amount,
        });
        amount.map_or_else(RollOutcome::default, |quantity| RollOutcome {
            successes: 1,
            quantity,
        })
    }
}
