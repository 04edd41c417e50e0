pub mod brand_impersonation;
pub mod tld_risk;
pub mod url_inspector;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UrlRiskLevel {
    Safe,
    Low,
    Medium,
    High,
}

impl UrlRiskLevel {
    /// Tier for a non-whitelisted URL: >=60 HIGH, >=30 MEDIUM, else LOW.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 60 => UrlRiskLevel::High,
            s if s >= 30 => UrlRiskLevel::Medium,
            _ => UrlRiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UrlRiskLevel::Safe => "SAFE",
            UrlRiskLevel::Low => "LOW",
            UrlRiskLevel::Medium => "MEDIUM",
            UrlRiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for UrlRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlFinding {
    pub url: String,
    pub domain: String,
    pub risk_score: u32,
    pub risk_level: UrlRiskLevel,
    pub findings: Vec<String>,
    pub is_suspicious: bool,
}

/// Outcome of inspecting one URL. A URL that cannot be parsed still yields a
/// finding, tagged so callers can tell it apart from a full inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlInspection {
    Inspected(UrlFinding),
    Fallback(UrlFinding),
}

impl UrlInspection {
    pub fn into_finding(self) -> UrlFinding {
        match self {
            UrlInspection::Inspected(finding) | UrlInspection::Fallback(finding) => finding,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, UrlInspection::Fallback(_))
    }
}
