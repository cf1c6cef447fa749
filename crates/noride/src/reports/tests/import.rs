use std::io::Cursor;

use chrono::{TimeZone, Utc};

use crate::reports::{ReportCsvImporter, ReportImportError};

const EXPORT: &str = "\
vehicle_number,location_address,report_reason,report_details,reporter_name,submitted_at
MH 02 AB 1234, Andheri East ,Overcharging,Charged double the meter fare at 10:15,Priya,2024-03-15T09:30:00Z
BAD123,Random,Other,bad driver,,2024-03-01
MH01CD5678,Colaba,Harassment,Shouted at passengers,  ,not a date
";

#[test]
fn rows_map_to_report_content() {
    let contents =
        ReportCsvImporter::from_reader(Cursor::new(EXPORT)).expect("export parses");

    assert_eq!(contents.len(), 3);

    let first = &contents[0];
    assert_eq!(first.vehicle_number, "MH 02 AB 1234");
    assert_eq!(first.location, "Andheri East");
    assert_eq!(first.issue, "Overcharging");
    assert_eq!(first.reporter_name.as_deref(), Some("Priya"));
    assert_eq!(
        first.submitted_at,
        Some(Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).single().expect("valid"))
    );

    let second = &contents[1];
    assert_eq!(second.reporter_name, None);
    assert_eq!(
        second.submitted_at,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("valid"))
    );
}

#[test]
fn blank_cells_and_bad_dates_become_none() {
    let contents =
        ReportCsvImporter::from_reader(Cursor::new(EXPORT)).expect("export parses");

    let third = &contents[2];
    assert_eq!(third.reporter_name, None);
    assert_eq!(third.submitted_at, None);
}

#[test]
fn missing_optional_columns_are_tolerated() {
    let export = "vehicle_number,location_address,report_reason,report_details\n\
                  MH04EF1111,Worli,Rash Driving,Jumped two signals near the sea face\n";

    let contents =
        ReportCsvImporter::from_reader(Cursor::new(export)).expect("export parses");

    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0].location, "Worli");
    assert_eq!(contents[0].reporter_name, None);
    assert_eq!(contents[0].submitted_at, None);
}

#[test]
fn ragged_rows_surface_csv_errors() {
    let export = "vehicle_number,location_address,report_reason,report_details\n\
                  MH04EF1111,Worli\n";

    match ReportCsvImporter::from_reader(Cursor::new(export)) {
        Err(ReportImportError::Csv(_)) => {}
        other => panic!("expected csv error, got {other:?}"),
    }
}

#[test]
fn missing_file_surfaces_io_error() {
    match ReportCsvImporter::from_path("/nonexistent/noride/reports.csv") {
        Err(ReportImportError::Io(_)) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}
