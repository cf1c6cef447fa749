use super::matcher::TermMatcher;
use crate::vehicle;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

pub const FLAG_DESCRIPTION_TOO_SHORT: &str = "Description too short";
pub const FLAG_MINIMAL_DESCRIPTION: &str = "Minimal description provided";
pub const FLAG_UNKNOWN_LOCATION: &str = "Location not recognized as Mumbai area";
pub const FLAG_NON_STANDARD_ISSUE: &str = "Issue type not standard";
pub const FLAG_INVALID_VEHICLE_NUMBER: &str = "Invalid vehicle number format";
pub const FLAG_STALE_REPORT: &str = "Report submitted more than 30 days ago";
pub const FLAG_EXCESSIVE_CAPS: &str = "Excessive capitalization detected";
pub const FLAG_REPEATED_CHARACTERS: &str = "Repeated characters detected";

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const STALE_AFTER_DAYS: f64 = 30.0;
const FRESH_WITHIN_DAYS: f64 = 1.0;
const CAPS_RATIO_LIMIT: f64 = 0.3;
const REPEAT_RUN: usize = 5;

fn time_reference() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)[0-9]{1,2}:[0-9]{2}|morning|afternoon|evening|night|am|pm")
            .expect("time reference regex")
    })
}

pub(crate) fn description_quality(description: &str, flags: &mut Vec<String>) -> i32 {
    let length = description.trim().chars().count() as i32;

    let mut score = if length < 20 {
        flags.push(FLAG_DESCRIPTION_TOO_SHORT.to_string());
        20
    } else if length < 50 {
        flags.push(FLAG_MINIMAL_DESCRIPTION.to_string());
        50
    } else if length > 500 {
        85
    } else {
        // Integer division floors here; sub-scores stay integers before weighting.
        (60 + length * 40 / 500).min(100)
    };

    if description.chars().any(|ch| ch.is_ascii_digit()) {
        score += 10;
    }
    if time_reference().is_match(description) {
        score += 10;
    }

    score.min(100)
}

pub(crate) fn location_validity<M: TermMatcher>(
    location: &str,
    matcher: &M,
    flags: &mut Vec<String>,
) -> i32 {
    if matcher.matches(location) {
        90
    } else {
        flags.push(FLAG_UNKNOWN_LOCATION.to_string());
        30
    }
}

pub(crate) fn issue_relevance<M: TermMatcher>(
    issue: &str,
    vehicle_number: &str,
    matcher: &M,
    flags: &mut Vec<String>,
) -> i32 {
    let mut score = if matcher.matches(issue) {
        95
    } else {
        flags.push(FLAG_NON_STANDARD_ISSUE.to_string());
        40
    };

    if !vehicle::is_standard_plate(vehicle_number) {
        flags.push(FLAG_INVALID_VEHICLE_NUMBER.to_string());
        score -= 15;
    }

    score
}

pub(crate) fn timing_pattern(
    submitted_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    flags: &mut Vec<String>,
) -> i32 {
    let Some(submitted_at) = submitted_at else {
        return 70;
    };

    let days_since = (now - submitted_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
    if days_since > STALE_AFTER_DAYS {
        flags.push(FLAG_STALE_REPORT.to_string());
        50
    } else if days_since < FRESH_WITHIN_DAYS {
        85
    } else {
        70
    }
}

pub(crate) fn reporter_behavior(
    reporter_name: Option<&str>,
    description: &str,
    flags: &mut Vec<String>,
) -> i32 {
    let mut score = match reporter_name {
        Some(name) if !name.is_empty() => 75,
        _ => 80,
    };

    if uppercase_ratio(description) > CAPS_RATIO_LIMIT {
        flags.push(FLAG_EXCESSIVE_CAPS.to_string());
        score -= 20;
    }
    if has_repeated_run(description, REPEAT_RUN) {
        flags.push(FLAG_REPEATED_CHARACTERS.to_string());
        score -= 25;
    }

    score
}

fn uppercase_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|ch| ch.is_ascii_uppercase()).count();
    upper as f64 / total as f64
}

fn breaks_run(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// True when some character occurs `run` or more times back to back.
/// Line terminators never form a run.
fn has_repeated_run(text: &str, run: usize) -> bool {
    let mut previous = None;
    let mut length = 0;

    for ch in text.chars() {
        if breaks_run(ch) {
            previous = None;
            length = 0;
            continue;
        }
        if previous == Some(ch) {
            length += 1;
        } else {
            previous = Some(ch);
            length = 1;
        }
        if length >= run {
            return true;
        }
    }

    false
}
