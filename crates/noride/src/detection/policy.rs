use super::AnalysisDetails;
use crate::risk::{clamp_score, round_half_up, RiskLevel, RiskThresholds};

pub const CONFIDENCE_THRESHOLDS: RiskThresholds = RiskThresholds {
    high_below: 50,
    medium_below: 70,
};

const DESCRIPTION_WEIGHT: f64 = 0.25;
const LOCATION_WEIGHT: f64 = 0.20;
const ISSUE_WEIGHT: f64 = 0.20;
const TIMING_WEIGHT: f64 = 0.15;
const REPORTER_WEIGHT: f64 = 0.20;

pub(crate) fn confidence(details: &AnalysisDetails) -> i32 {
    let weighted = f64::from(details.description_quality) * DESCRIPTION_WEIGHT
        + f64::from(details.location_validity) * LOCATION_WEIGHT
        + f64::from(details.issue_relevance) * ISSUE_WEIGHT
        + f64::from(details.timing_pattern) * TIMING_WEIGHT
        + f64::from(details.reporter_behavior) * REPORTER_WEIGHT;
    clamp_score(round_half_up(weighted))
}

pub(crate) fn summary(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "High risk: Multiple concerns detected. Requires careful review.",
        RiskLevel::Medium => {
            "Medium risk: Some concerns detected. Recommend additional verification."
        }
        RiskLevel::Low => "Low risk: Report appears legitimate. Standard verification recommended.",
    }
}
