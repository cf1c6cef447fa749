use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::ReportId;
use crate::risk::RiskLevel;

/// What an admin reviewer sees for one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportReviewView {
    pub id: ReportId,
    pub vehicle_number: String,
    pub status: &'static str,
    pub credibility_score: i32,
    pub credibility_risk: RiskLevel,
    pub confidence: i32,
    pub confidence_risk: RiskLevel,
    pub summary: &'static str,
    /// Credibility flags first, then content flags.
    pub flags: Vec<String>,
    pub is_flagged: bool,
    pub rto_jurisdiction: String,
}

/// Report fields safe to expose on the public vehicle lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicReportView {
    pub id: ReportId,
    pub report_reason: String,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub credibility_score: i32,
    pub location: String,
    pub report_details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_name: Option<String>,
    pub is_anonymous: bool,
}

/// Aggregate shown when the public searches a vehicle number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleSummary {
    pub vehicle_number: String,
    pub total_reports: usize,
    pub verified_reports: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reported: Option<DateTime<Utc>>,
    pub rto_office: String,
    pub recent_issues: Vec<String>,
    /// Newest first.
    pub reports: Vec<PublicReportView>,
}
