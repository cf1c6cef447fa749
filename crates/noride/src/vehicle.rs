//! Vehicle registration numbers and the RTO offices that issue them.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const GENERAL_RTO: &str = "General RTO";

const MUMBAI_OFFICES: [(&str, &str); 7] = [
    ("MH-01", "South Mumbai RTO"),
    ("MH-02", "Andheri RTO"),
    ("MH-03", "Wadala RTO"),
    ("MH-04", "Tardeo RTO"),
    ("MH-05", "Thane RTO"),
    ("MH-06", "Borivali RTO"),
    ("MH-07", "Malad RTO"),
];

fn standard_plate() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{2}\s?[0-9]{2}\s?[A-Za-z]{2}\s?[0-9]{4}$")
            .expect("standard plate regex")
    })
}

fn maharashtra_plate() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^MH[0-9]{2}[A-Z]{2}[0-9]{4}$").expect("maharashtra plate regex")
    })
}

/// Strips all whitespace and uppercases the remainder.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Two letters, two digits, two letters, four digits, each group optionally
/// separated by a single space.
pub fn is_standard_plate(raw: &str) -> bool {
    standard_plate().is_match(raw)
}

pub fn is_maharashtra_plate(raw: &str) -> bool {
    maharashtra_plate().is_match(&normalize(raw))
}

/// State code plus district digits in `XX-NN` form, when the plate has them.
pub fn rto_code(raw: &str) -> Option<String> {
    let normalized: String = normalize(raw).chars().filter(|ch| *ch != '-').collect();
    let mut chars = normalized.chars();
    let state: String = chars.by_ref().take(2).collect();
    let district: String = chars.take(2).collect();

    let valid = state.len() == 2
        && district.len() == 2
        && state.chars().all(|ch| ch.is_ascii_alphabetic())
        && district.chars().all(|ch| ch.is_ascii_digit());
    valid.then(|| format!("{state}-{district}"))
}

/// Maps RTO codes to the office that handles complaints for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionDirectory {
    offices: BTreeMap<String, String>,
    fallback: String,
}

impl JurisdictionDirectory {
    pub fn new(offices: BTreeMap<String, String>, fallback: impl Into<String>) -> Self {
        let offices = offices
            .into_iter()
            .map(|(code, office)| (code.trim().to_uppercase(), office))
            .collect();
        Self {
            offices,
            fallback: fallback.into(),
        }
    }

    pub fn mumbai() -> Self {
        let offices = MUMBAI_OFFICES
            .iter()
            .map(|(code, office)| (code.to_string(), office.to_string()))
            .collect();
        Self::new(offices, GENERAL_RTO)
    }

    pub fn office_for(&self, vehicle_number: &str) -> &str {
        rto_code(vehicle_number)
            .and_then(|code| self.offices.get(&code))
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    pub fn offices(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.offices
            .iter()
            .map(|(code, office)| (code.as_str(), office.as_str()))
    }

    pub fn len(&self) -> usize {
        self.offices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offices.is_empty()
    }
}

impl Default for JurisdictionDirectory {
    fn default() -> Self {
        Self::mumbai()
    }
}
