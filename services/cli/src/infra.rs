use chrono::{DateTime, Utc};
use noride::reports::import::parse_timestamp;
use noride::reports::{
    ReportFilter, ReportId, ReportRecord, ReportRepository, ReportStatus, RepositoryError,
};
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Process-local report store. Records are kept in insertion order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryReportRepository {
    records: Arc<Mutex<Vec<ReportRecord>>>,
}

impl InMemoryReportRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<ReportRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("report store lock poisoned".to_string()))
    }
}

impl ReportRepository for InMemoryReportRepository {
    fn save(&self, record: ReportRecord) -> Result<ReportRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn get(&self, id: &ReportId) -> Result<Option<ReportRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list(&self, filter: &ReportFilter) -> Result<Vec<ReportRecord>, RepositoryError> {
        let guard = self.lock()?;
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
        let mut guard = self.lock()?;
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

/// Reads a whole input file, or standard input when the path is `-`.
pub(crate) fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        return Ok(raw);
    }
    std::fs::read_to_string(path)
}

pub(crate) fn parse_now(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use noride::config::{RegionProfile, ReviewSettings};
    use noride::reports::{ReportReviewService, ReportSubmission};
    use noride::FixedClock;

    #[test]
    fn parse_now_accepts_rfc3339_and_dates() {
        assert_eq!(
            parse_now("2024-03-15T09:30:00+05:30"),
            Ok(Utc.with_ymd_and_hms(2024, 3, 15, 4, 0, 0).single().expect("valid"))
        );
        assert_eq!(
            parse_now("2024-03-15"),
            Ok(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).single().expect("valid"))
        );
        assert!(parse_now("yesterday").is_err());
    }

    #[test]
    fn missing_record_update_is_not_found() {
        let repository = InMemoryReportRepository::default();

        match repository.update_status(
            &ReportId::from_sequence(1),
            ReportStatus::Pending,
            ReportStatus::Reviewing,
        ) {
            Err(RepositoryError::NotFound) => {}
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn status_write_requires_expected_current_status() {
        let repository = InMemoryReportRepository::default();
        let service = ReportReviewService::new(
            Arc::new(repository.clone()),
            Arc::new(FixedClock(Utc::now())),
            &RegionProfile::mumbai(),
            ReviewSettings::default(),
        );
        let record = service
            .submit(ReportSubmission {
                vehicle_number: "MH01AB1234".to_string(),
                ..ReportSubmission::default()
            })
            .expect("submits");
        assert_eq!(record.status, ReportStatus::Pending);

        repository
            .update_status(&record.id, ReportStatus::Pending, ReportStatus::Resolved)
            .expect("first reviewer wins");

        match repository.update_status(&record.id, ReportStatus::Pending, ReportStatus::Invalid) {
            Err(RepositoryError::Conflict) => {}
            other => panic!("expected conflict, got {other:?}"),
        }
        let stored = repository
            .get(&record.id)
            .expect("get succeeds")
            .expect("record present");
        assert_eq!(stored.status, ReportStatus::Resolved);
    }
}
