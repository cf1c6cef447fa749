use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{GpsFix, ImageSignals, ReportId, ReportStatus};
use super::views::{PublicReportView, ReportReviewView};
use crate::credibility::CredibilityResult;
use crate::detection::AnalysisResult;

/// Stored report with both scoring results and review metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: ReportId,
    /// Whitespace-free, uppercase registration number.
    pub vehicle_number: String,
    pub location_address: String,
    pub gps: Option<GpsFix>,
    pub report_reason: String,
    pub report_details: String,
    pub images: ImageSignals,
    pub is_anonymous: bool,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub device_fingerprint: Option<String>,
    pub ip_hash: Option<String>,
    pub rto_jurisdiction: String,
    pub credibility: CredibilityResult,
    pub analysis: AnalysisResult,
    pub is_flagged: bool,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl ReportRecord {
    pub fn credibility_score(&self) -> i32 {
        self.credibility.final_score
    }

    /// True when either the device fingerprint or the IP hash matches.
    pub fn shares_source_with(
        &self,
        device_fingerprint: Option<&str>,
        ip_hash: Option<&str>,
    ) -> bool {
        let same = |stored: &Option<String>, incoming: Option<&str>| match (stored, incoming) {
            (Some(stored), Some(incoming)) => !incoming.is_empty() && stored == incoming,
            _ => false,
        };
        same(&self.device_fingerprint, device_fingerprint) || same(&self.ip_hash, ip_hash)
    }

    pub fn review_view(&self) -> ReportReviewView {
        ReportReviewView {
            id: self.id.clone(),
            vehicle_number: self.vehicle_number.clone(),
            status: self.status.label(),
            credibility_score: self.credibility_score(),
            credibility_risk: self.credibility.risk_level,
            confidence: self.analysis.confidence,
            confidence_risk: self.analysis.risk_level,
            summary: self.analysis.summary(),
            flags: self
                .credibility
                .flags
                .iter()
                .chain(self.analysis.flags.iter())
                .cloned()
                .collect(),
            is_flagged: self.is_flagged,
            rto_jurisdiction: self.rto_jurisdiction.clone(),
        }
    }

    pub fn public_view(&self) -> PublicReportView {
        PublicReportView {
            id: self.id.clone(),
            report_reason: self.report_reason.clone(),
            status: self.status.label(),
            created_at: self.created_at,
            credibility_score: self.credibility_score(),
            location: self.location_address.clone(),
            report_details: self.report_details.clone(),
            reporter_name: if self.is_anonymous {
                None
            } else {
                self.reporter_name.clone()
            },
            is_anonymous: self.is_anonymous,
        }
    }
}

/// Criteria for listing stored reports. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    /// Case-insensitive substring of the location address.
    pub location: Option<String>,
    pub vehicle_number: Option<String>,
    pub created_since: Option<DateTime<Utc>>,
    pub exclude_flagged: bool,
}

impl ReportFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn for_vehicle(mut self, vehicle_number: &str) -> Self {
        self.vehicle_number = Some(crate::vehicle::normalize(vehicle_number));
        self
    }

    pub fn created_since(mut self, since: DateTime<Utc>) -> Self {
        self.created_since = Some(since);
        self
    }

    pub fn exclude_flagged(mut self) -> Self {
        self.exclude_flagged = true;
        self
    }

    pub fn matches(&self, record: &ReportRecord) -> bool {
        if self.status.is_some_and(|status| status != record.status) {
            return false;
        }
        if let Some(location) = &self.location {
            let needle = location.to_lowercase();
            if !record.location_address.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(vehicle_number) = &self.vehicle_number {
            if &record.vehicle_number != vehicle_number {
                return false;
            }
        }
        if self.created_since.is_some_and(|since| record.created_at < since) {
            return false;
        }
        !(self.exclude_flagged && record.is_flagged)
    }
}

/// Storage abstraction so the review service can be exercised in isolation.
///
/// `list` returns matching records in insertion order. `update_status` writes
/// only while the stored status still equals `expected`, and returns
/// `Conflict` otherwise; the comparison and the write happen under one lock.
pub trait ReportRepository: Send + Sync {
    fn save(&self, record: ReportRecord) -> Result<ReportRecord, RepositoryError>;
    fn get(&self, id: &ReportId) -> Result<Option<ReportRecord>, RepositoryError>;
    fn list(&self, filter: &ReportFilter) -> Result<Vec<ReportRecord>, RepositoryError>;
    fn update_status(
        &self,
        id: &ReportId,
        expected: ReportStatus,
        status: ReportStatus,
    ) -> Result<ReportRecord, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
