//! # Amount Sampling
//!
//! Two contracts:
//!
//! - [`AmountSampler::sample`] - plain uniform amount, drawn once per
//!   successful roll (Bonus Rolls, Hybrid).
//! - [`AmountSampler::sample_with_bonus`] - uniform amount plus a stream of
//!   bonus items whose chance falls off as `1 / (i + 1)` (Diminishing).
//!
//! Bonus-item odds by trial index:
//!
//! ```text
//! i:       0     1     2     3    ...
//! chance: 100%  50%   33%   25%   ...
//! ```

use crate::rng::DropRng;

/// Draws quantities for successful rolls.
#[derive(Clone, Copy, Debug, Default)]
pub struct AmountSampler;

impl AmountSampler {
    /// Uniform integer in `[min, max]`.
    #[inline]
    pub fn sample<R: DropRng>(min: u32, max: u32, rng: &mut R) -> u32 {
        rng.amount_between(min, max)
    }

    /// Uniform base amount plus one Bernoulli trial per enchant level.
    ///
    /// Always within `[min, max + level]`.
    pub fn sample_with_bonus<R: DropRng>(min: u32, max: u32, level: u32, rng: &mut R) -> u32 {
        let base = Self::sample(min, max, rng);
        let bonus = (0..level)
            .filter(|i| rng.trial(1.0 / (f64::from(*i) + 1.0)))
            .count();
        base.saturating_add(u32::try_from(bonus).unwrap_or(u32::MAX))
    }
}
