use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Timelike, Utc};
use tracing::{debug, info, warn};

use super::domain::{ReportId, ReportStatus, ReportSubmission};
use super::repository::{ReportFilter, ReportRecord, ReportRepository, RepositoryError};
use super::views::VehicleSummary;
use crate::clock::Clock;
use crate::config::{RegionProfile, ReviewSettings};
use crate::credibility::{CredibilityScorer, ScoringInput};
use crate::detection::ContentAnalyzer;
use crate::vehicle::{self, JurisdictionDirectory};

const RECENT_ISSUE_LIMIT: usize = 5;

/// Service composing both scorers, the report store and the jurisdiction directory.
pub struct ReportReviewService<R, C> {
    repository: Arc<R>,
    clock: Arc<C>,
    scorer: CredibilityScorer,
    analyzer: Arc<ContentAnalyzer>,
    directory: Arc<JurisdictionDirectory>,
    settings: ReviewSettings,
    sequence: AtomicU64,
}

impl<R, C> ReportReviewService<R, C>
where
    R: ReportRepository + 'static,
    C: Clock + 'static,
{
    pub fn new(
        repository: Arc<R>,
        clock: Arc<C>,
        profile: &RegionProfile,
        settings: ReviewSettings,
    ) -> Self {
        Self {
            repository,
            clock,
            scorer: CredibilityScorer::new(),
            analyzer: Arc::new(ContentAnalyzer::from_profile(profile)),
            directory: Arc::new(profile.directory()),
            settings,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_report_id(&self) -> ReportId {
        ReportId::from_sequence(self.sequence.fetch_add(1, Ordering::Relaxed))
    }

    /// Derives credibility signals from the submission and the reports already stored.
    pub fn scoring_input(
        &self,
        submission: &ReportSubmission,
        now: DateTime<Utc>,
    ) -> Result<ScoringInput, ReviewServiceError> {
        let vehicle_number = vehicle::normalize(&submission.vehicle_number);

        let report_velocity = if vehicle_number.is_empty() {
            0
        } else {
            let filter = ReportFilter::all()
                .for_vehicle(&vehicle_number)
                .created_since(window_start(now, self.settings.velocity_window));
            self.repository.list(&filter)?.len()
        };

        let device_fingerprint = submission.device_fingerprint.as_deref();
        let ip_hash = submission.ip_hash.as_deref();
        let same_source_reported_recently = if device_fingerprint.is_none() && ip_hash.is_none() {
            false
        } else {
            let filter = ReportFilter::all()
                .created_since(window_start(now, self.settings.repeat_source_window));
            self.repository
                .list(&filter)?
                .iter()
                .any(|record| record.shares_source_with(device_fingerprint, ip_hash))
        };

        let submitted_hour = now.with_timezone(&self.settings.utc_offset).hour() as u8;

        Ok(ScoringInput {
            vehicle_number_provided: !vehicle_number.is_empty(),
            has_images: submission.images.count > 0,
            image_count: submission.images.count,
            has_gps: submission.gps.is_some(),
            is_anonymous: submission.is_anonymous,
            description_length: u32::try_from(submission.report_details.chars().count())
                .unwrap_or(u32::MAX),
            is_duplicate_image: submission.images.duplicate,
            is_stock_image: submission.images.stock,
            same_source_reported_recently,
            geolocation_anomaly: submission.geolocation_anomaly,
            report_velocity: u32::try_from(report_velocity).unwrap_or(u32::MAX),
            submitted_hour,
        })
    }

    /// Score, classify and persist a new report.
    pub fn submit(
        &self,
        submission: ReportSubmission,
    ) -> Result<ReportRecord, ReviewServiceError> {
        let now = self.clock.now();
        let input = self.scoring_input(&submission, now)?;
        let credibility = self.scorer.score(&input);
        let analysis = self.analyzer.analyze(&submission.content(now), now);

        let status = if credibility.should_auto_verify {
            ReportStatus::Resolved
        } else {
            ReportStatus::Pending
        };
        let vehicle_number = vehicle::normalize(&submission.vehicle_number);
        let reporter_name = submission.disclosed_reporter_name().map(str::to_string);
        let reporter_contact = if submission.is_anonymous {
            None
        } else {
            submission.reporter_contact
        };

        let record = ReportRecord {
            id: self.next_report_id(),
            rto_jurisdiction: self.directory.office_for(&vehicle_number).to_string(),
            vehicle_number,
            location_address: submission.location_address,
            gps: submission.gps,
            report_reason: submission.report_reason,
            report_details: submission.report_details,
            images: submission.images,
            is_anonymous: submission.is_anonymous,
            reporter_name,
            reporter_contact,
            device_fingerprint: submission.device_fingerprint,
            ip_hash: submission.ip_hash,
            is_flagged: credibility.should_auto_hide,
            status,
            credibility,
            analysis,
            created_at: now,
        };

        debug!(
            report_id = %record.id,
            added = record.credibility.added_points,
            subtracted = record.credibility.subtracted_points,
            details = ?record.analysis.details,
            "scored report"
        );

        let stored = self.repository.save(record)?;

        info!(
            report_id = %stored.id,
            vehicle = %stored.vehicle_number,
            credibility = stored.credibility.final_score,
            confidence = stored.analysis.confidence,
            status = %stored.status,
            "report submitted"
        );
        if stored.is_flagged {
            warn!(
                report_id = %stored.id,
                flags = ?stored.credibility.flags,
                "report hidden pending review"
            );
        }

        Ok(stored)
    }

    pub fn get(&self, id: &ReportId) -> Result<ReportRecord, ReviewServiceError> {
        let record = self.repository.get(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(&self, filter: &ReportFilter) -> Result<Vec<ReportRecord>, ReviewServiceError> {
        Ok(self.repository.list(filter)?)
    }

    /// Admin status change. Resolved and invalid reports are final. A status
    /// written by someone else since the read surfaces as `Conflict`.
    pub fn update_status(
        &self,
        id: &ReportId,
        status: ReportStatus,
    ) -> Result<ReportRecord, ReviewServiceError> {
        let current = self.get(id)?;
        if current.status.is_terminal() {
            return Err(ReviewServiceError::InvalidTransition {
                id: id.clone(),
                from: current.status,
                to: status,
            });
        }

        let updated = self
            .repository
            .update_status(id, current.status, status)
            .map_err(|err| {
                if matches!(err, RepositoryError::Conflict) {
                    warn!(
                        report_id = %id,
                        expected = %current.status,
                        "report status changed concurrently"
                    );
                }
                err
            })?;
        info!(
            report_id = %id,
            from = %current.status,
            to = %updated.status,
            "report status changed"
        );
        Ok(updated)
    }

    /// Public lookup for a Maharashtra plate. Hidden reports are left out, and
    /// `None` means no visible report exists.
    pub fn vehicle_lookup(
        &self,
        vehicle_number: &str,
    ) -> Result<Option<VehicleSummary>, ReviewServiceError> {
        if !vehicle::is_maharashtra_plate(vehicle_number) {
            return Err(ReviewServiceError::InvalidVehicleNumber(
                vehicle_number.to_string(),
            ));
        }
        let normalized = vehicle::normalize(vehicle_number);

        let mut reports = self
            .repository
            .list(&ReportFilter::all().for_vehicle(&normalized).exclude_flagged())?;
        if reports.is_empty() {
            return Ok(None);
        }
        reports.reverse();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let verified_reports = reports
            .iter()
            .filter(|record| record.status == ReportStatus::Resolved)
            .count();

        let mut seen = HashSet::new();
        let recent_issues = reports
            .iter()
            .map(|record| record.report_reason.trim())
            .filter(|reason| !reason.is_empty())
            .filter(|reason| seen.insert(reason.to_string()))
            .take(RECENT_ISSUE_LIMIT)
            .map(str::to_string)
            .collect();

        Ok(Some(VehicleSummary {
            rto_office: self.directory.office_for(&normalized).to_string(),
            vehicle_number: normalized,
            total_reports: reports.len(),
            verified_reports,
            last_reported: reports.first().map(|record| record.created_at),
            recent_issues,
            reports: reports.iter().map(ReportRecord::public_view).collect(),
        }))
    }
}

/// Earliest instant inside a look-back window; saturates at the minimum timestamp.
fn window_start(now: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
    now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("report {id} is {from} and cannot move to {to}")]
    InvalidTransition {
        id: ReportId,
        from: ReportStatus,
        to: ReportStatus,
    },
    #[error("'{0}' is not a Maharashtra vehicle number")]
    InvalidVehicleNumber(String),
}
