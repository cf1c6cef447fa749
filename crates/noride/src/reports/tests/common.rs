use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::clock::Clock;
use crate::config::{RegionProfile, ReviewSettings};
use crate::reports::domain::{GpsFix, ImageSignals, ReportId, ReportStatus, ReportSubmission};
use crate::reports::repository::{ReportFilter, ReportRecord, ReportRepository, RepositoryError};
use crate::reports::ReportReviewService;

/// 12:30 in Mumbai.
pub(super) fn midday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 7, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn strong_submission() -> ReportSubmission {
    ReportSubmission {
        vehicle_number: "MH 02 AB 1234".to_string(),
        location_address: "Andheri West, near the metro station".to_string(),
        gps: Some(GpsFix {
            latitude: 19.1197,
            longitude: 72.8464,
        }),
        report_reason: "Overcharging".to_string(),
        report_details: "Driver demanded 250 rupees for a 3 km ride at 9:40 and refused to \
                         start the meter when asked."
            .to_string(),
        images: ImageSignals {
            count: 2,
            duplicate: false,
            stock: false,
        },
        is_anonymous: false,
        reporter_name: Some("Priya Shah".to_string()),
        reporter_contact: Some("priya@example.com".to_string()),
        device_fingerprint: Some("device-strong".to_string()),
        ip_hash: Some("ip-strong".to_string()),
        geolocation_anomaly: false,
    }
}

/// Scores exactly 80: named reporter with a detailed description but no media or GPS.
pub(super) fn pending_submission(vehicle_number: &str, reason: &str) -> ReportSubmission {
    ReportSubmission {
        vehicle_number: vehicle_number.to_string(),
        location_address: "Dadar TT circle".to_string(),
        gps: None,
        report_reason: reason.to_string(),
        report_details: "Driver refused to go by meter and asked for a fixed fare well above \
                         the usual rate."
            .to_string(),
        images: ImageSignals::default(),
        is_anonymous: false,
        reporter_name: Some("Kiran Patil".to_string()),
        reporter_contact: None,
        device_fingerprint: None,
        ip_hash: None,
        geolocation_anomaly: false,
    }
}

/// Scores 5: anonymous, reused stock media, GPS disagrees with the address.
pub(super) fn weak_submission() -> ReportSubmission {
    ReportSubmission {
        vehicle_number: String::new(),
        location_address: "Random".to_string(),
        gps: None,
        report_reason: "Other".to_string(),
        report_details: "bad driver".to_string(),
        images: ImageSignals {
            count: 1,
            duplicate: true,
            stock: true,
        },
        is_anonymous: true,
        reporter_name: Some("should not be kept".to_string()),
        reporter_contact: Some("hidden@example.com".to_string()),
        device_fingerprint: Some("device-weak".to_string()),
        ip_hash: None,
        geolocation_anomaly: true,
    }
}

pub(super) fn build_service() -> (
    ReportReviewService<MemoryRepository, ManualClock>,
    Arc<MemoryRepository>,
    Arc<ManualClock>,
) {
    build_service_with(MemoryRepository::default(), ReviewSettings::default())
}

pub(super) fn build_service_with<R: ReportRepository + 'static>(
    repository: R,
    settings: ReviewSettings,
) -> (ReportReviewService<R, ManualClock>, Arc<R>, Arc<ManualClock>) {
    let repository = Arc::new(repository);
    let clock = Arc::new(ManualClock::starting_at(midday()));
    let service = ReportReviewService::new(
        repository.clone(),
        clock.clone(),
        &RegionProfile::mumbai(),
        settings,
    );
    (service, repository, clock)
}

pub(super) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(super) fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(super) fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().expect("clock mutex poisoned");
        *guard += by;
    }

    pub(super) fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().expect("clock mutex poisoned") = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<ReportRecord>>>,
}

impl ReportRepository for MemoryRepository {
    fn save(&self, record: ReportRecord) -> Result<ReportRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn get(&self, id: &ReportId) -> Result<Option<ReportRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list(&self, filter: &ReportFilter) -> Result<Vec<ReportRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    fn update_status(
        &self,
        id: &ReportId,
        expected: ReportStatus,
        status: ReportStatus,
    ) -> Result<ReportRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if record.status != expected {
            return Err(RepositoryError::Conflict);
        }
        record.status = status;
        Ok(record.clone())
    }
}

/// Store where another reviewer sets `concurrent_status` right after every read.
pub(super) struct InterleavedRepository {
    pub(super) inner: MemoryRepository,
    pub(super) concurrent_status: ReportStatus,
}

impl ReportRepository for InterleavedRepository {
    fn save(&self, record: ReportRecord) -> Result<ReportRecord, RepositoryError> {
        self.inner.save(record)
    }

    fn get(&self, id: &ReportId) -> Result<Option<ReportRecord>, RepositoryError> {
        let found = self.inner.get(id)?;
        let mut guard = self.inner.records.lock().expect("repository mutex poisoned");
        if let Some(stored) = guard.iter_mut().find(|record| &record.id == id) {
            stored.status = self.concurrent_status;
        }
        Ok(found)
    }

    fn list(&self, filter: &ReportFilter) -> Result<Vec<ReportRecord>, RepositoryError> {
        self.inner.list(filter)
    }

    fn update_status(
        &self,
        id: &ReportId,
        expected: ReportStatus,
        status: ReportStatus,
    ) -> Result<ReportRecord, RepositoryError> {
        self.inner.update_status(id, expected, status)
    }
}
