//! Credibility scoring and content analysis for citizen reports of auto-rickshaw misconduct.

pub mod clock;
pub mod config;
pub mod credibility;
pub mod detection;
pub mod error;
pub mod reports;
pub mod risk;
pub mod telemetry;
pub mod vehicle;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credibility::{CredibilityResult, CredibilityScorer, ScoringInput};
pub use detection::{
    AllowList, AnalysisDetails, AnalysisResult, ContentAnalyzer, ReportContent, TermMatcher,
};
pub use error::AppError;
pub use risk::RiskLevel;
