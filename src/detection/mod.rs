pub mod multi_language;
pub mod rule_engine;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A matched label together with the weight it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedSignal {
    pub label: String,
    pub weight: u32,
}

/// Ordered signal list that keeps only the first occurrence of each label.
#[derive(Debug, Clone, Default)]
pub struct SignalSet {
    signals: Vec<DetectedSignal>,
    seen: HashSet<String>,
}

impl SignalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the label was already recorded.
    pub fn insert(&mut self, label: &str, weight: u32) -> bool {
        if !self.seen.insert(label.to_string()) {
            return false;
        }
        self.signals.push(DetectedSignal {
            label: label.to_string(),
            weight,
        });
        true
    }

    pub fn total_weight(&self) -> u32 {
        self.signals.iter().map(|s| s.weight).sum()
    }

    pub fn labels(&self) -> Vec<String> {
        self.signals.iter().map(|s| s.label.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn into_signals(self) -> Vec<DetectedSignal> {
        self.signals
    }
}

/// Three-level risk tier derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// 0..=30 is LOW, 31..=70 is MEDIUM, anything above is HIGH.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s <= 30 => RiskLevel::Low,
            s if s <= 70 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(31), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(71), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }

    #[test]
    fn test_risk_level_is_monotonic() {
        let mut previous = RiskLevel::Low;
        for score in 0..=100 {
            let level = RiskLevel::from_score(score);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_signal_set_first_occurrence_wins() {
        let mut set = SignalSet::new();
        assert!(set.insert("OTP", 10));
        assert!(set.insert("bank", 4));
        assert!(!set.insert("OTP", 10));

        assert_eq!(set.len(), 2);
        assert_eq!(set.total_weight(), 14);
        assert_eq!(set.labels(), vec!["OTP".to_string(), "bank".to_string()]);
    }

    #[test]
    fn test_risk_level_serializes_uppercase() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");
    }
}
