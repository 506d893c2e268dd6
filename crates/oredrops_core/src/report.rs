//! # Scaling Reports
//!
//! Read-only views of what the strategies would do for a base chance. Used
//! for debug logging at load time and by the drop simulator.

use std::fmt;

use crate::method::DropMethod;
use crate::rarity::RarityTier;
use crate::scaling::{plan_for, RollPlan};

/// Levels sampled by [`ScalingReport::standard`].
pub const REPORT_LEVELS: [u32; 4] = [0, 3, 6, 9];

/// One method's plan at one level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalingLine {
    /// Enchant level.
    pub level: u32,
    /// Method that produced the plan.
    pub method: DropMethod,
    /// Base chance the plan was derived from.
    pub base: f64,
    /// The derived plan.
    pub plan: RollPlan,
}

impl fmt::Display for ScalingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.method {
            DropMethod::Diminishing => write!(
                f,
                "level {}: {:.3}% (+{:.3}%)",
                self.level,
                self.plan.chance_per_roll,
                self.plan.chance_per_roll - self.base
            ),
            DropMethod::BonusRolls | DropMethod::Hybrid => write!(
                f,
                "level {}: {} rolls @ {:.3}% = {:.3}% total",
                self.level, self.plan.rolls, self.plan.chance_per_roll, self.plan.cumulative_chance
            ),
        }
    }
}

/// How one method scales a base chance across several levels.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalingReport {
    /// Base chance in percent.
    pub base: f64,
    /// Tier of the base chance.
    pub tier: RarityTier,
    /// One line per level.
    pub lines: Vec<ScalingLine>,
}

impl ScalingReport {
    /// Report for `method` at each of `levels`.
    #[must_use]
    pub fn new(base: f64, method: DropMethod, levels: &[u32]) -> Self {
        Self {
            base,
            tier: RarityTier::classify(base),
            lines: levels
                .iter()
                .map(|&level| ScalingLine {
                    level,
                    method,
                    base,
                    plan: plan_for(method, base, level),
                })
                .collect(),
        }
    }

    /// Report at [`REPORT_LEVELS`].
    #[must_use]
    pub fn standard(base: f64, method: DropMethod) -> Self {
        Self::new(base, method, &REPORT_LEVELS)
    }
}

/// All three methods side by side for one `(base, level)`.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodComparison {
    /// Base chance in percent.
    pub base: f64,
    /// Tier of the base chance.
    pub tier: RarityTier,
    /// Enchant level.
    pub level: u32,
    /// One line per method, in `DropMethod::ALL` order.
    pub lines: [ScalingLine; 3],
}

impl MethodComparison {
    /// Compares every method at `(base, level)`.
    #[must_use]
    pub fn new(base: f64, level: u32) -> Self {
        Self {
            base,
            tier: RarityTier::classify(base),
            level,
            lines: DropMethod::ALL.map(|method| ScalingLine {
                level,
                method,
                base,
                plan: plan_for(method, base, level),
            }),
        }
    }
}

impl fmt::Display for MethodComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Base: {:.2}% ({})", self.base, self.tier)?;
        for line in &self.lines {
            writeln!(f, "  {}: {line}", line.method.label())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_report_levels() {
        let report = ScalingReport::standard(0.5, DropMethod::BonusRolls);
        assert_eq!(report.tier, RarityTier::VeryRare);
        let rolls: Vec<u32> = report.lines.iter().map(|l| l.plan.rolls).collect();
        assert_eq!(rolls, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_comparison_covers_every_method() {
        let cmp = MethodComparison::new(50.0, 3);
        assert_eq!(cmp.tier, RarityTier::Uncommon);
        assert_eq!(cmp.lines[0].method, DropMethod::Diminishing);
        assert!((cmp.lines[0].plan.chance_per_roll - 51.5).abs() < 1e-12);
        assert_eq!(cmp.lines[1].plan.rolls, 2);
        assert!((cmp.lines[1].plan.cumulative_chance - 75.0).abs() < 1e-9);
        assert_eq!(cmp.lines[2].plan.rolls, 2);
    }

    #[test]
    fn test_display_lines() {
        let line = ScalingReport::new(50.0, DropMethod::BonusRolls, &[3]).lines[0];
        assert_eq!(line.to_string(), "level 3: 2 rolls @ 50.000% = 75.000% total");

        let line = ScalingReport::new(20.0, DropMethod::Diminishing, &[2]).lines[0];
        assert_eq!(line.to_string(), "level 2: 21.000% (+1.000%)");

        let text = MethodComparison::new(5.0, 0).to_string();
        assert!(text.starts_with("Base: 5.00% (RARE)"));
        assert_eq!(text.lines().count(), 4);
    }
}
