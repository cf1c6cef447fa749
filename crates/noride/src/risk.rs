use serde::{Deserialize, Serialize};
use std::fmt;

pub const SCORE_FLOOR: i32 = 0;
pub const SCORE_CEILING: i32 = 100;

/// Risk tier derived from a score through fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exclusive upper bounds for the high and medium tiers.
///
/// A score below `high_below` is high risk, a score below `medium_below` is
/// medium risk, anything else is low risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskThresholds {
    pub high_below: i32,
    pub medium_below: i32,
}

impl RiskThresholds {
    pub const fn classify(&self, score: i32) -> RiskLevel {
        if score < self.high_below {
            RiskLevel::High
        } else if score < self.medium_below {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

pub fn clamp_score(value: i32) -> i32 {
    value.clamp(SCORE_FLOOR, SCORE_CEILING)
}

/// Rounds to the nearest integer, sending exact halves toward positive infinity.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
