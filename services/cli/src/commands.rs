use crate::infra::{parse_now, read_input};
use chrono::{DateTime, Utc};
use clap::Args;
use noride::config::RegionProfile;
use noride::error::AppError;
use noride::reports::ReportCsvImporter;
use noride::{
    AnalysisResult, ContentAnalyzer, CredibilityResult, CredibilityScorer, ReportContent,
    ScoringInput,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON credibility input, or `-` for stdin
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// JSON report content, or `-` for stdin
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Reference time for the timing signal (defaults to now)
    #[arg(long, value_parser = parse_now)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one report per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Reference time for the timing signal (defaults to now)
    #[arg(long, value_parser = parse_now)]
    pub(crate) now: Option<DateTime<Utc>>,
}

/// Analysis output with its reviewer sentence.
#[derive(Debug, Serialize)]
pub(crate) struct AnalysisReport {
    #[serde(flatten)]
    pub(crate) result: AnalysisResult,
    pub(crate) summary: &'static str,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = read_input(&args.input)?;
    let result = score_json(&raw)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) fn run_analyze(args: AnalyzeArgs, profile: &RegionProfile) -> Result<(), AppError> {
    let raw = read_input(&args.input)?;
    let now = args.now.unwrap_or_else(Utc::now);
    let report = analyze_json(&ContentAnalyzer::from_profile(profile), &raw, now)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs, profile: &RegionProfile) -> Result<(), AppError> {
    let contents = ReportCsvImporter::from_path(&args.csv)?;
    let now = args.now.unwrap_or_else(Utc::now);
    info!(path = %args.csv.display(), rows = contents.len(), "analyzing report export");

    let analyzer = ContentAnalyzer::from_profile(profile);
    for line in batch_lines(&analyzer, &contents, now) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn score_json(raw: &str) -> Result<CredibilityResult, serde_json::Error> {
    let input: ScoringInput = serde_json::from_str(raw)?;
    Ok(CredibilityScorer::new().score(&input))
}

pub(crate) fn analyze_json(
    analyzer: &ContentAnalyzer,
    raw: &str,
    now: DateTime<Utc>,
) -> Result<AnalysisReport, serde_json::Error> {
    let content: ReportContent = serde_json::from_str(raw)?;
    let result = analyzer.analyze(&content, now);
    let summary = result.summary();
    Ok(AnalysisReport { result, summary })
}

/// One line per row: position, vehicle, confidence, tier and flags.
pub(crate) fn batch_lines(
    analyzer: &ContentAnalyzer,
    contents: &[ReportContent],
    now: DateTime<Utc>,
) -> Vec<String> {
    contents
        .iter()
        .enumerate()
        .map(|(index, content)| {
            let result = analyzer.analyze(content, now);
            let vehicle = if content.vehicle_number.is_empty() {
                "-"
            } else {
                content.vehicle_number.as_str()
            };
            let flags = if result.flags.is_empty() {
                "none".to_string()
            } else {
                result.flags.join("; ")
            };
            format!(
                "{:>3}  {:<14} confidence {:>3} ({})  flags: {}",
                index + 1,
                vehicle,
                result.confidence,
                result.risk_level.label(),
                flags
            )
        })
        .collect()
}
