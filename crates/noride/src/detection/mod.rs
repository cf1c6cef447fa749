//! Content-based confidence analysis of a report's free-text fields.

mod matcher;
mod policy;
mod rules;

pub use matcher::{AllowList, TermMatcher};
pub use policy::CONFIDENCE_THRESHOLDS;
pub use rules::{
    FLAG_DESCRIPTION_TOO_SHORT, FLAG_EXCESSIVE_CAPS, FLAG_INVALID_VEHICLE_NUMBER,
    FLAG_MINIMAL_DESCRIPTION, FLAG_NON_STANDARD_ISSUE, FLAG_REPEATED_CHARACTERS,
    FLAG_STALE_REPORT, FLAG_UNKNOWN_LOCATION,
};

use crate::config::RegionProfile;
use crate::risk::RiskLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-text fields of a report as entered by the citizen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportContent {
    pub vehicle_number: String,
    pub location: String,
    pub issue: String,
    pub description: String,
    pub reporter_name: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Per-signal scores before weighting. Values are not clamped individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub description_quality: i32,
    pub location_validity: i32,
    pub issue_relevance: i32,
    pub timing_pattern: i32,
    pub reporter_behavior: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub confidence: i32,
    pub flags: Vec<String>,
    pub risk_level: RiskLevel,
    pub details: AnalysisDetails,
}

impl AnalysisResult {
    /// Reviewer-facing sentence for the risk tier.
    pub fn summary(&self) -> &'static str {
        policy::summary(self.risk_level)
    }
}

/// Scores report text against injected location and issue matchers.
#[derive(Debug, Clone)]
pub struct ContentAnalyzer<M = AllowList> {
    locations: M,
    issues: M,
}

impl<M: TermMatcher> ContentAnalyzer<M> {
    pub fn new(locations: M, issues: M) -> Self {
        Self { locations, issues }
    }

    pub fn analyze(&self, content: &ReportContent, now: DateTime<Utc>) -> AnalysisResult {
        let mut flags = Vec::new();

        let description_quality = rules::description_quality(&content.description, &mut flags);
        let location_validity =
            rules::location_validity(&content.location, &self.locations, &mut flags);
        let issue_relevance = rules::issue_relevance(
            &content.issue,
            &content.vehicle_number,
            &self.issues,
            &mut flags,
        );
        let timing_pattern = rules::timing_pattern(content.submitted_at, now, &mut flags);
        let reporter_behavior = rules::reporter_behavior(
            content.reporter_name.as_deref(),
            &content.description,
            &mut flags,
        );

        let details = AnalysisDetails {
            description_quality,
            location_validity,
            issue_relevance,
            timing_pattern,
            reporter_behavior,
        };
        let confidence = policy::confidence(&details);

        AnalysisResult {
            confidence,
            flags,
            risk_level: CONFIDENCE_THRESHOLDS.classify(confidence),
            details,
        }
    }
}

impl ContentAnalyzer<AllowList> {
    pub fn from_profile(profile: &RegionProfile) -> Self {
        Self::new(profile.location_matcher(), profile.issue_matcher())
    }
}

impl Default for ContentAnalyzer<AllowList> {
    fn default() -> Self {
        Self::from_profile(&RegionProfile::mumbai())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn credible_content() -> ReportContent {
        ReportContent {
            vehicle_number: "MH 02 AB 1234".to_string(),
            location: "Andheri East station".to_string(),
            issue: "Refusal to Use Meter".to_string(),
            description: "Driver refused to use the meter at 8:15 and demanded 300 rupees \
                          for a ride that normally costs about 90."
                .to_string(),
            reporter_name: None,
            submitted_at: Some(now() - Duration::hours(2)),
        }
    }

    #[test]
    fn credible_report_scores_low_risk() {
        let result = ContentAnalyzer::default().analyze(&credible_content(), now());

        assert!(result.flags.is_empty(), "unexpected flags {:?}", result.flags);
        assert_eq!(result.details.location_validity, 90);
        assert_eq!(result.details.issue_relevance, 95);
        assert_eq!(result.details.timing_pattern, 85);
        assert_eq!(result.details.reporter_behavior, 80);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(
            result.summary(),
            "Low risk: Report appears legitimate. Standard verification recommended."
        );
    }

    #[test]
    fn weak_report_collects_flags_in_signal_order() {
        let content = ReportContent {
            vehicle_number: "BAD123".to_string(),
            location: "Random".to_string(),
            issue: "Other".to_string(),
            description: "bad driver".to_string(),
            reporter_name: None,
            submitted_at: Some(now()),
        };

        let result = ContentAnalyzer::default().analyze(&content, now());

        assert_eq!(result.confidence, 45);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(
            result.flags,
            vec![
                FLAG_DESCRIPTION_TOO_SHORT,
                FLAG_UNKNOWN_LOCATION,
                FLAG_NON_STANDARD_ISSUE,
                FLAG_INVALID_VEHICLE_NUMBER,
            ]
        );
        assert_eq!(
            result.summary(),
            "High risk: Multiple concerns detected. Requires careful review."
        );
    }

    #[test]
    fn custom_matchers_replace_region_lists() {
        let analyzer = ContentAnalyzer::new(
            AllowList::new(["Koramangala"]),
            AllowList::new(["Overcharging"]),
        );
        let content = ReportContent {
            location: "Koramangala 5th block".to_string(),
            ..credible_content()
        };

        let result = analyzer.analyze(&content, now());
        assert_eq!(result.details.location_validity, 90);
        assert_eq!(result.details.issue_relevance, 40);
        assert_eq!(result.flags, vec![FLAG_NON_STANDARD_ISSUE]);
    }

    #[test]
    fn analysis_is_repeatable() {
        let analyzer = ContentAnalyzer::default();
        let content = credible_content();

        assert_eq!(analyzer.analyze(&content, now()), analyzer.analyze(&content, now()));
    }
}
