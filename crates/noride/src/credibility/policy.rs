use super::ScoringInput;
use crate::risk::{RiskLevel, RiskThresholds};

pub const BASE_SCORE: i32 = 50;

pub const CREDIBILITY_THRESHOLDS: RiskThresholds = RiskThresholds {
    high_below: 30,
    medium_below: 70,
};

/// Scores strictly above this verify automatically when images are attached.
pub const AUTO_VERIFY_ABOVE: i32 = 80;
/// Scores strictly below this are hidden from public view.
pub const AUTO_HIDE_BELOW: i32 = 30;

pub(crate) struct Recommendation {
    pub risk_level: RiskLevel,
    pub should_auto_verify: bool,
    pub should_auto_hide: bool,
}

pub(crate) fn recommend(final_score: i32, input: &ScoringInput) -> Recommendation {
    Recommendation {
        risk_level: CREDIBILITY_THRESHOLDS.classify(final_score),
        should_auto_verify: final_score > AUTO_VERIFY_ABOVE && input.has_images,
        should_auto_hide: final_score < AUTO_HIDE_BELOW,
    }
}
