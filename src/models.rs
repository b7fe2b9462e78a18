use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// License categories understood by `go-licenses --disallowed_types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LicenseType {
    Forbidden,
    Notice,
    Reciprocal,
    Restricted,
    Unknown,
}

impl LicenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseType::Forbidden => "forbidden",
            LicenseType::Notice => "notice",
            LicenseType::Reciprocal => "reciprocal",
            LicenseType::Restricted => "restricted",
            LicenseType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LicenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Distinct stderr lines reporting a disallowed license, keyed by their text.
pub type Violations = BTreeSet<String>;

/// Result of checking a single module root.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub dir: PathBuf,
    pub violations: Violations,
}

impl CheckOutcome {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
