//! # Random Source
//!
//! Every draw made while resolving drops goes through [`DropRng`]. Any
//! `rand::Rng` is a `DropRng`, so callers pick the generator:
//!
//! - `rand::thread_rng()` on the host's event thread (no shared state, no contention)
//! - [`seeded`] for reproducible simulations and tests
//! - a scripted implementation when a test needs exact outcomes

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random draws needed by the drop mechanics.
pub trait DropRng {
    /// Uniform value in `[0, 100)`.
    fn roll_percent(&mut self) -> f64;

    /// Uniform integer in `[min, max]`; `min` when the range is empty or a single value.
    fn amount_between(&mut self, min: u32, max: u32) -> u32;

    /// Bernoulli trial succeeding with `probability` (clamped to `[0, 1]`).
    fn trial(&mut self, probability: f64) -> bool;
}

impl<R: Rng> DropRng for R {
    #[inline]
    fn roll_percent(&mut self) -> f64 {
        self.gen_range(0.0..100.0)
    }

    #[inline]
    fn amount_between(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.gen_range(min..=max)
    }

    #[inline]
    fn trial(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Deterministic generator for simulations and tests.
#[must_use]
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
