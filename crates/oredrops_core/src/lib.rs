//! # OREDROPS Core
//!
//! The drop-probability engine: given a base chance, an amount range and a
//! Fortune/Looting level, decide whether an entry drops and how many.
//!
//! ## Pipeline
//!
//! ```text
//! base chance ──> RarityTier::classify ──> DropMethod
//!                                           ├─ Diminishing: ChanceScaler  -> 1 roll, bonus-item amount
//!                                           ├─ BonusRolls:  RollScaler    -> N rolls, plain amounts
//!                                           └─ Hybrid:      HybridScaler  -> N rolls, plain amounts
//! ```
//!
//! ## Rules
//!
//! 1. **Pure** - no I/O, no logging, no shared state
//! 2. **Injected randomness** - every draw goes through [`DropRng`]
//! 3. **Soft cap** - a scaled chance never exceeds [`SOFT_CAP`]
//!
//! ## Example
//!
//! ```rust
//! use oredrops_core::{rng, roll_entry, DropMethod};
//!
//! let mut rng = rng::seeded(7);
//! let outcome = roll_entry(DropMethod::Hybrid, 2.5, 1, 3, 3, &mut rng);
//! assert!(outcome.quantity == 0 || outcome.successes > 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod amount;
pub mod method;
pub mod rarity;
pub mod report;
pub mod rng;
pub mod scaling;

pub use amount::AmountSampler;
pub use method::{DropMethod, ParseMethodError};
pub use rarity::RarityTier;
pub use report::{MethodComparison, ScalingLine, ScalingReport};
pub use rng::DropRng;
pub use scaling::{
    cumulative_chance, plan_for, roll_entry, roll_entry_with, BonusCurve, ChanceScaler,
    HybridScaler, RollEvent, RollOutcome, RollPlan, RollScaler, SOFT_CAP,
};
