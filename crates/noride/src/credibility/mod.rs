//! Submission-metadata credibility scoring.

mod policy;
mod rules;

pub use policy::{AUTO_HIDE_BELOW, AUTO_VERIFY_ABOVE, BASE_SCORE, CREDIBILITY_THRESHOLDS};
pub use rules::{
    FLAG_DUPLICATE_IMAGE, FLAG_GEOLOCATION_ANOMALY, FLAG_ODD_HOURS, FLAG_REPEAT_SOURCE,
    FLAG_STOCK_IMAGE, FLAG_VELOCITY_SPIKE,
};

use crate::risk::{clamp_score, RiskLevel};
use serde::{Deserialize, Serialize};

/// Structured signals describing how a report was submitted.
///
/// Missing fields deserialize to their falsy/zero value and contribute no points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringInput {
    pub vehicle_number_provided: bool,
    pub has_images: bool,
    pub image_count: u32,
    pub has_gps: bool,
    pub is_anonymous: bool,
    pub description_length: u32,
    pub is_duplicate_image: bool,
    pub is_stock_image: bool,
    pub same_source_reported_recently: bool,
    pub geolocation_anomaly: bool,
    /// Reports for the same vehicle inside the recent window.
    pub report_velocity: u32,
    /// Local hour of submission, expected in `0..=23`.
    pub submitted_hour: u8,
}

/// Point breakdown and recommendations for a single submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredibilityResult {
    pub base_score: i32,
    pub added_points: i32,
    pub subtracted_points: i32,
    pub final_score: i32,
    pub flags: Vec<String>,
    pub risk_level: RiskLevel,
    pub should_auto_verify: bool,
    pub should_auto_hide: bool,
}

/// Stateless scorer applying the fixed credibility rubric.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredibilityScorer;

impl CredibilityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, input: &ScoringInput) -> CredibilityResult {
        let tally = rules::tally(input);
        let final_score = clamp_score(BASE_SCORE + tally.added_points - tally.subtracted_points);
        let recommendation = policy::recommend(final_score, input);

        CredibilityResult {
            base_score: BASE_SCORE,
            added_points: tally.added_points,
            subtracted_points: tally.subtracted_points,
            final_score,
            flags: tally.flags,
            risk_level: recommendation.risk_level,
            should_auto_verify: recommendation.should_auto_verify,
            should_auto_hide: recommendation.should_auto_hide,
        }
    }
}
