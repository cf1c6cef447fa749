//! CSV exports of report rows, read into analyzer input.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use crate::detection::ReportContent;

#[derive(Debug)]
pub enum ReportImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ReportImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportImportError::Io(err) => write!(f, "failed to read report export: {}", err),
            ReportImportError::Csv(err) => write!(f, "invalid report CSV data: {}", err),
        }
    }
}

impl std::error::Error for ReportImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportImportError::Io(err) => Some(err),
            ReportImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ReportImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReportImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ReportCsvImporter;

impl ReportCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ReportContent>, ReportImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ReportContent>, ReportImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut contents = Vec::new();

        for row in csv_reader.deserialize::<ReportRow>() {
            contents.push(row?.into_content());
        }

        Ok(contents)
    }
}

#[derive(Debug, Deserialize)]
struct ReportRow {
    #[serde(default)]
    vehicle_number: String,
    #[serde(default)]
    location_address: String,
    #[serde(default)]
    report_reason: String,
    #[serde(default)]
    report_details: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    reporter_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    submitted_at: Option<String>,
}

impl ReportRow {
    fn into_content(self) -> ReportContent {
        let submitted_at = self.submitted_at.as_deref().and_then(parse_timestamp);
        ReportContent {
            vehicle_number: self.vehicle_number,
            location: self.location_address,
            issue: self.report_reason,
            description: self.report_details,
            reporter_name: self.reporter_name,
            submitted_at,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// RFC 3339, or a bare `YYYY-MM-DD` read as midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_timestamp_supports_rfc3339_and_dates() {
        let rfc = parse_timestamp("2024-03-15T09:30:00+05:30").expect("rfc3339 parses");
        assert_eq!(
            rfc,
            Utc.with_ymd_and_hms(2024, 3, 15, 4, 0, 0).single().expect("valid")
        );

        let date = parse_timestamp(" 2024-03-01 ").expect("date parses");
        assert_eq!(
            date,
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("valid")
        );

        assert_eq!(parse_timestamp("last tuesday"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
