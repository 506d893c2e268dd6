//! # Drop Method
//!
//! Selects the enchant scaling strategy applied to every entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Enchant scaling strategy. One method is active for the whole registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropMethod {
    /// Raise the chance with diminishing returns, roll once.
    Diminishing,
    /// Keep the chance, grant extra rolls.
    BonusRolls,
    /// Chance boost for common drops, extra rolls for rare ones.
    #[default]
    Hybrid,
}

/// A method name that is none of `DIMINISHING`, `BONUS_ROLLS`, `HYBRID`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown drop method: {0}")]
pub struct ParseMethodError(pub String);

impl DropMethod {
    /// All methods in declaration order.
    pub const ALL: [Self; 3] = [Self::Diminishing, Self::BonusRolls, Self::Hybrid];

    /// Configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Diminishing => "DIMINISHING",
            Self::BonusRolls => "BONUS_ROLLS",
            Self::Hybrid => "HYBRID",
        }
    }

    /// Human-readable label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Diminishing => "Diminishing",
            Self::BonusRolls => "Bonus Rolls",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl FromStr for DropMethod {
    type Err = ParseMethodError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseMethodError(s.to_string()))
    }
}

impl fmt::Display for DropMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
