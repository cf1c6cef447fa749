use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::ReportContent;

/// Sequential report identifier (`R001`, `R002`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportId(pub String);

impl ReportId {
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("R{sequence:03}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review lifecycle of a stored report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Reviewing,
    Resolved,
    Invalid,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Reviewing => "reviewing",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Invalid => "invalid",
        }
    }

    /// Resolved and invalid reports accept no further transitions.
    pub const fn is_terminal(self) -> bool {
        matches!(self, ReportStatus::Resolved | ReportStatus::Invalid)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report status '{0}' (expected pending, reviewing, resolved or invalid)")]
pub struct UnknownStatus(pub String);

impl FromStr for ReportStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ReportStatus::Pending),
            "reviewing" => Ok(ReportStatus::Reviewing),
            "resolved" => Ok(ReportStatus::Resolved),
            "invalid" => Ok(ReportStatus::Invalid),
            _ => Err(UnknownStatus(value.to_string())),
        }
    }
}

/// Device-reported coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// Results of upstream media checks; image bytes never reach this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSignals {
    pub count: u32,
    pub duplicate: bool,
    pub stock: bool,
}

/// Citizen-provided report as received from the intake form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSubmission {
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
    /// Set by the upstream location check when GPS and address disagree.
    pub geolocation_anomaly: bool,
}

impl ReportSubmission {
    /// Reporter name as it may be shown or scored; anonymous reports never carry one.
    pub fn disclosed_reporter_name(&self) -> Option<&str> {
        if self.is_anonymous {
            return None;
        }
        self.reporter_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn content(&self, submitted_at: DateTime<Utc>) -> ReportContent {
        ReportContent {
            vehicle_number: self.vehicle_number.clone(),
            location: self.location_address.clone(),
            issue: self.report_reason.clone(),
            description: self.report_details.clone(),
            reporter_name: self.disclosed_reporter_name().map(str::to_string),
            submitted_at: Some(submitted_at),
        }
    }
}
