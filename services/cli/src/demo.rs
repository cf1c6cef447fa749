use crate::infra::{parse_now, InMemoryReportRepository};
use chrono::{DateTime, Utc};
use clap::Args;
use noride::config::AppConfig;
use noride::error::AppError;
use noride::reports::{
    GpsFix, ImageSignals, ReportRecord, ReportReviewService, ReportStatus, ReportSubmission,
};
use noride::FixedClock;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Submission time for every sample report (defaults to now)
    #[arg(long, value_parser = parse_now)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Vehicle number used for the sample reports and the lookup
    #[arg(long, default_value = "MH 02 AB 1234")]
    pub(crate) vehicle: String,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs { now, vehicle } = args;
    let now = now.unwrap_or_else(Utc::now);
    let profile = config.load_region_profile()?;

    let service = ReportReviewService::new(
        Arc::new(InMemoryReportRepository::default()),
        Arc::new(FixedClock(now)),
        &profile,
        config.review,
    );

    println!("NoRide review demo ({})", now.to_rfc3339());

    println!("\nIntake");
    let verified = service.submit(documented_report(&vehicle))?;
    render_record(&verified);
    let hidden = service.submit(reused_photo_report(&vehicle))?;
    render_record(&hidden);
    let pending = service.submit(plain_report(&vehicle))?;
    render_record(&pending);

    println!("\nAdmin review of {}", pending.id);
    let reviewing = service.update_status(&pending.id, ReportStatus::Reviewing)?;
    println!("- {} -> {}", pending.status, reviewing.status);
    let resolved = service.update_status(&pending.id, ReportStatus::Resolved)?;
    println!("- {} -> {}", reviewing.status, resolved.status);
    if let Err(err) = service.update_status(&pending.id, ReportStatus::Pending) {
        println!("- reopening rejected: {err}");
    }

    println!("\nPublic lookup for {vehicle}");
    match service.vehicle_lookup(&vehicle) {
        Ok(Some(summary)) => {
            println!(
                "- {} visible reports, {} verified, handled by {}",
                summary.total_reports, summary.verified_reports, summary.rto_office
            );
            println!("- recent issues: {}", summary.recent_issues.join(", "));
            for report in &summary.reports {
                println!(
                    "  - {} [{}] {} (credibility {}, reporter {})",
                    report.id,
                    report.status,
                    report.report_reason,
                    report.credibility_score,
                    report.reporter_name.as_deref().unwrap_or("anonymous")
                );
            }
        }
        Ok(None) => println!("- no visible reports"),
        Err(err) => println!("- lookup unavailable: {err}"),
    }

    Ok(())
}

fn render_record(record: &ReportRecord) {
    let view = record.review_view();
    println!(
        "- {} {} -> credibility {} ({}), confidence {} ({}), status {}{}",
        view.id,
        view.vehicle_number,
        view.credibility_score,
        view.credibility_risk,
        view.confidence,
        view.confidence_risk,
        view.status,
        if view.is_flagged { ", hidden" } else { "" }
    );
    println!("  {}", view.summary);
    for flag in &view.flags {
        println!("  ! {flag}");
    }
}

fn documented_report(vehicle: &str) -> ReportSubmission {
    ReportSubmission {
        vehicle_number: vehicle.to_string(),
        location_address: "Andheri West, outside the metro station".to_string(),
        gps: Some(GpsFix {
            latitude: 19.1197,
            longitude: 72.8464,
        }),
        report_reason: "Overcharging".to_string(),
        report_details: "Driver asked for 250 rupees for a 3 km ride at 9:40 and refused to \
                         start the meter."
            .to_string(),
        images: ImageSignals {
            count: 2,
            ..ImageSignals::default()
        },
        is_anonymous: false,
        reporter_name: Some("Priya Shah".to_string()),
        reporter_contact: Some("priya@example.com".to_string()),
        device_fingerprint: Some("demo-phone".to_string()),
        ip_hash: None,
        geolocation_anomaly: false,
    }
}

fn reused_photo_report(vehicle: &str) -> ReportSubmission {
    ReportSubmission {
        vehicle_number: vehicle.to_string(),
        location_address: "Somewhere".to_string(),
        report_reason: "Other".to_string(),
        report_details: "BAD DRIVER!!!!!".to_string(),
        images: ImageSignals {
            count: 1,
            duplicate: true,
            stock: true,
        },
        is_anonymous: true,
        device_fingerprint: Some("demo-phone".to_string()),
        geolocation_anomaly: true,
        ..ReportSubmission::default()
    }
}

fn plain_report(vehicle: &str) -> ReportSubmission {
    ReportSubmission {
        vehicle_number: vehicle.to_string(),
        location_address: "Dadar TT circle".to_string(),
        report_reason: "Rash Driving".to_string(),
        report_details: "Overtook a bus on the wrong side and nearly hit a cyclist near the \
                         flyover."
            .to_string(),
        reporter_name: Some("Kiran Patil".to_string()),
        ..ReportSubmission::default()
    }
}
