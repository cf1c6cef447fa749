use crate::detection::AllowList;
use crate::vehicle::{JurisdictionDirectory, GENERAL_RTO};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const MUMBAI_LOCATIONS: [&str; 20] = [
    "Bandra",
    "Andheri",
    "Dadar",
    "Colaba",
    "Powai",
    "Thane",
    "Navi Mumbai",
    "Borivali",
    "Malad",
    "Kandivali",
    "Vile Parle",
    "Santacruz",
    "Worli",
    "Parel",
    "Fort",
    "Marine Drive",
    "Juhu",
    "Versova",
    "Kala Ghoda",
    "Mahim",
];

pub const STANDARD_ISSUES: [&str; 10] = [
    "Overcharging",
    "Rash Driving",
    "Refusal to Use Meter",
    "Refusal to Meter",
    "Harassment",
    "Vehicle Condition",
    "Cleanliness",
    "Unsafe Behavior",
    "Refusal of Service",
    "Aggressive Behavior",
];

/// Deployment data for one city: recognized areas, issue categories and RTO offices.
///
/// Keys missing from a JSON profile keep their Mumbai values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionProfile {
    pub locations: Vec<String>,
    pub issues: Vec<String>,
    pub jurisdictions: BTreeMap<String, String>,
    pub jurisdiction_fallback: String,
}

#[derive(Debug, Error)]
pub enum RegionProfileError {
    #[error("failed to read region profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("region profile {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RegionProfile {
    pub fn mumbai() -> Self {
        let directory = JurisdictionDirectory::mumbai();
        Self {
            locations: MUMBAI_LOCATIONS.iter().map(|s| s.to_string()).collect(),
            issues: STANDARD_ISSUES.iter().map(|s| s.to_string()).collect(),
            jurisdictions: directory
                .offices()
                .map(|(code, office)| (code.to_string(), office.to_string()))
                .collect(),
            jurisdiction_fallback: GENERAL_RTO.to_string(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegionProfileError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RegionProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = Self::from_json_str(&raw).map_err(|source| RegionProfileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            locations = profile.locations.len(),
            issues = profile.issues.len(),
            jurisdictions = profile.jurisdictions.len(),
            "loaded region profile"
        );
        Ok(profile)
    }

    pub fn location_matcher(&self) -> AllowList {
        AllowList::new(&self.locations)
    }

    pub fn issue_matcher(&self) -> AllowList {
        AllowList::new(&self.issues)
    }

    pub fn directory(&self) -> JurisdictionDirectory {
        JurisdictionDirectory::new(self.jurisdictions.clone(), self.jurisdiction_fallback.clone())
    }
}

impl Default for RegionProfile {
    fn default() -> Self {
        Self::mumbai()
    }
}
