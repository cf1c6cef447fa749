//! Report intake, admin review and public vehicle lookup.

pub mod domain;
pub mod import;
pub mod repository;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{GpsFix, ImageSignals, ReportId, ReportStatus, ReportSubmission, UnknownStatus};
pub use import::{ReportCsvImporter, ReportImportError};
pub use repository::{ReportFilter, ReportRecord, ReportRepository, RepositoryError};
pub use service::{ReportReviewService, ReviewServiceError};
pub use views::{PublicReportView, ReportReviewView, VehicleSummary};
