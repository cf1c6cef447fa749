mod region;

pub use region::{RegionProfile, RegionProfileError, MUMBAI_LOCATIONS, STANDARD_ISSUES};

use chrono::{Duration, FixedOffset, Offset, Utc};
use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;
const DEFAULT_VELOCITY_WINDOW_HOURS: i64 = 24;
const DEFAULT_REPEAT_SOURCE_WINDOW_MINUTES: i64 = 60;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub review: ReviewSettings,
    /// JSON region profile replacing the built-in Mumbai lists.
    pub region_profile: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let offset_minutes = read_number(
            "NORIDE_UTC_OFFSET_MINUTES",
            i64::from(DEFAULT_UTC_OFFSET_MINUTES),
        )?;
        let utc_offset = i32::try_from(offset_minutes)
            .ok()
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::InvalidUtcOffset {
                minutes: offset_minutes,
            })?;

        let velocity_window = read_window(
            "NORIDE_VELOCITY_WINDOW_HOURS",
            DEFAULT_VELOCITY_WINDOW_HOURS,
            Duration::try_hours,
        )?;
        let repeat_source_window = read_window(
            "NORIDE_REPEAT_SOURCE_WINDOW_MINUTES",
            DEFAULT_REPEAT_SOURCE_WINDOW_MINUTES,
            Duration::try_minutes,
        )?;

        let region_profile = env::var("NORIDE_REGION_PROFILE")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            review: ReviewSettings {
                utc_offset,
                velocity_window,
                repeat_source_window,
            },
            region_profile,
        })
    }

    /// Reads the configured region profile, or the Mumbai defaults when none is set.
    pub fn load_region_profile(&self) -> Result<RegionProfile, RegionProfileError> {
        match &self.region_profile {
            Some(path) => RegionProfile::from_path(path),
            None => Ok(RegionProfile::mumbai()),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Windows and local time used when the review workflow derives submission signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSettings {
    pub utc_offset: FixedOffset,
    pub velocity_window: Duration,
    pub repeat_source_window: Duration,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60)
                .unwrap_or_else(|| Utc.fix()),
            velocity_window: Duration::hours(DEFAULT_VELOCITY_WINDOW_HOURS),
            repeat_source_window: Duration::minutes(DEFAULT_REPEAT_SOURCE_WINDOW_MINUTES),
        }
    }
}

fn read_number(name: &'static str, default: i64) -> Result<i64, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(default),
    }
}

fn read_window(
    name: &'static str,
    default: i64,
    to_duration: fn(i64) -> Option<Duration>,
) -> Result<Duration, ConfigError> {
    let amount = read_number(name, default)?;
    if amount <= 0 {
        return Err(ConfigError::InvalidWindow { name, amount });
    }
    to_duration(amount).ok_or(ConfigError::InvalidWindow { name, amount })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { name: &'static str, value: String },
    InvalidUtcOffset { minutes: i64 },
    InvalidWindow { name: &'static str, amount: i64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be an integer, got '{value}'")
            }
            ConfigError::InvalidUtcOffset { minutes } => write!(
                f,
                "NORIDE_UTC_OFFSET_MINUTES must be within one day of UTC, got {minutes}"
            ),
            ConfigError::InvalidWindow { name, amount } => {
                write!(f, "{name} must be a positive duration, got {amount}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
