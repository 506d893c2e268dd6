//! # Enchant Scaling
//!
//! Three strategies turn `(base chance, enchant level)` into something to
//! roll against:
//!
//! | Method | Chance | Rolls | Amount |
//! |---|---|---|---|
//! | Diminishing | raised by a tier curve | 1 | bonus-item trials |
//! | Bonus Rolls | unchanged | raised by tier | plain per roll |
//! | Hybrid | raised by a tier curve | raised by tier | plain per roll |
//!
//! All tier-dependent numbers are `const` tables indexed by
//! [`RarityTier::index`](crate::rarity::RarityTier::index). Every raised
//! chance is capped at [`SOFT_CAP`].

mod bonus_rolls;
mod diminishing;
mod hybrid;

pub use bonus_rolls::RollScaler;
pub use diminishing::ChanceScaler;
pub use hybrid::HybridScaler;

use crate::amount::AmountSampler;
use crate::method::DropMethod;
use crate::rng::DropRng;

/// Ceiling for any scaled chance, in percent.
pub const SOFT_CAP: f64 = 95.0;

/// How an enchant level turns into a chance bonus for one tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BonusCurve {
    /// `level * per_level`
    Linear(f64),
    /// `ln(level + 1) * base * factor`
    Log(f64),
    /// `sqrt(level) * base * factor`
    Sqrt(f64),
}

impl BonusCurve {
    /// Chance bonus (percentage points) for `base` at `level`.
    #[inline]
    #[must_use]
    pub fn bonus(self, base: f64, level: u32) -> f64 {
        let level = f64::from(level);
        match self {
            Self::Linear(per_level) => level * per_level,
            Self::Log(factor) => (level + 1.0).ln() * base * factor,
            Self::Sqrt(factor) => level.sqrt() * base * factor,
        }
    }
}

/// Probability that at least one of `rolls` independent rolls at
/// `chance_per_roll` percent succeeds, capped at [`SOFT_CAP`].
///
/// Informational only; outcomes are always rolled individually.
#[must_use]
pub fn cumulative_chance(chance_per_roll: f64, rolls: u32) -> f64 {
    let miss = 1.0 - chance_per_roll / 100.0;
    let rolls = i32::try_from(rolls).unwrap_or(i32::MAX);
    (100.0 * (1.0 - miss.powi(rolls))).min(SOFT_CAP)
}

/// A derived plan: how many rolls, and at what chance each.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollPlan {
    /// Number of independent rolls (always >= 1).
    pub rolls: u32,
    /// Chance per roll, in percent.
    pub chance_per_roll: f64,
    /// Chance that at least one roll succeeds (reporting only).
    pub cumulative_chance: f64,
}

impl RollPlan {
    /// Builds a plan and derives its cumulative chance.
    #[must_use]
    pub fn new(rolls: u32, chance_per_roll: f64) -> Self {
        let rolls = rolls.max(1);
        Self {
            rolls,
            chance_per_roll,
            cumulative_chance: cumulative_chance(chance_per_roll, rolls),
        }
    }

    /// One roll at `chance`.
    #[must_use]
    pub fn single(chance: f64) -> Self {
        Self::new(1, chance)
    }

    /// Rolls every planned roll; each success adds a plain amount in `[min, max]`.
    pub fn resolve<R: DropRng>(&self, min: u32, max: u32, rng: &mut R) -> RollOutcome {
        self.resolve_with(min, max, rng, |_| {})
    }

    /// [`resolve`](Self::resolve), reporting every roll to `on_roll`.
    pub fn resolve_with<R, F>(&self, min: u32, max: u32, rng: &mut R, mut on_roll: F) -> RollOutcome
    where
        R: DropRng,
        F: FnMut(RollEvent),
    {
        let mut outcome = RollOutcome::default();
        for index in 0..self.rolls {
            let draw = rng.roll_percent();
            let amount = (draw < self.chance_per_roll).then(|| AmountSampler::sample(min, max, rng));
            if let Some(amount) = amount {
                outcome.successes += 1;
                outcome.quantity = outcome.quantity.saturating_add(amount);
            }
            on_roll(RollEvent {
                index,
                draw,
                chance: self.chance_per_roll,
                amount,
            });
        }
        outcome
    }
}

/// One roll as it happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollEvent {
    /// Zero-based roll number.
    pub index: u32,
    /// The uniform draw in `[0, 100)`.
    pub draw: f64,
    /// Chance the draw was compared against.
    pub chance: f64,
    /// Amount granted by this roll, `None` on a miss.
    pub amount: Option<u32>,
}

/// Result of rolling one entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RollOutcome {
    /// Rolls that hit.
    pub successes: u32,
    /// Total quantity granted. An entry is granted iff this is > 0.
    pub quantity: u32,
}

impl RollOutcome {
    /// Whether the entry yields anything.
    #[inline]
    #[must_use]
    pub const fn granted(&self) -> bool {
        self.quantity > 0
    }
}

/// The roll plan `method` derives for `(base, level)`.
///
/// Diminishing is reported as a single roll at its scaled chance.
#[must_use]
pub fn plan_for(method: DropMethod, base: f64, level: u32) -> RollPlan {
    match method {
        DropMethod::Diminishing => RollPlan::single(ChanceScaler::scale(base, level)),
        DropMethod::BonusRolls => RollScaler::plan(base, level),
        DropMethod::Hybrid => HybridScaler::plan(base, level),
    }
}

/// Rolls one entry `(base, [min, max])` under `method` at `level`.
pub fn roll_entry<R: DropRng>(
    method: DropMethod,
    base: f64,
    min: u32,
    max: u32,
    level: u32,
    rng: &mut R,
) -> RollOutcome {
    roll_entry_with(method, base, min, max, level, rng, |_| {})
}

/// [`roll_entry`], reporting every roll to `on_roll`.
pub fn roll_entry_with<R, F>(
    method: DropMethod,
    base: f64,
    min: u32,
    max: u32,
    level: u32,
    rng: &mut R,
    on_roll: F,
) -> RollOutcome
where
    R: DropRng,
    F: FnMut(RollEvent),
{
    match method {
        DropMethod::Diminishing => ChanceScaler::resolve_with(base, level, min, max, rng, on_roll),
        DropMethod::BonusRolls | DropMethod::Hybrid => {
            plan_for(method, base, level).resolve_with(min, max, rng, on_roll)
        }
    }
}
