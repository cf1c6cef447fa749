use crate::commands::{run_analyze, run_batch, run_score, AnalyzeArgs, BatchArgs, ScoreArgs};
use crate::demo::{run_demo, DemoArgs};
use clap::{Parser, Subcommand};
use noride::config::AppConfig;
use noride::error::AppError;
use noride::telemetry;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "noride",
    about = "Score and review citizen reports of auto-rickshaw misconduct",
    version
)]
struct Cli {
    /// JSON region profile; overrides NORIDE_REGION_PROFILE
    #[arg(long, global = true)]
    region_profile: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a JSON credibility input
    Score(ScoreArgs),
    /// Analyze the text fields of a JSON report
    Analyze(AnalyzeArgs),
    /// Analyze every row of a CSV report export
    Batch(BatchArgs),
    /// Walk through intake, review and vehicle lookup with sample reports
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(path) = cli.region_profile {
        config.region_profile = Some(path);
    }

    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Score(args) => run_score(args),
        Command::Analyze(args) => run_analyze(args, &config.load_region_profile()?),
        Command::Batch(args) => run_batch(args, &config.load_region_profile()?),
        Command::Demo(args) => run_demo(args, &config),
    }
}
