//! Fusion of the independent detector outputs into one decision.

pub mod decision_engine;

use crate::detection::multi_language::MultilingualScan;
use crate::detection::rule_engine::RuleScan;
use crate::features::UrlFinding;
use serde::{Deserialize, Serialize};

/// Everything the four detectors produced for one message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalBundle {
    pub rule: RuleScan,
    pub multilingual: MultilingualScan,
    pub urls: Vec<UrlFinding>,
    pub ai_score: u32,
}

impl SignalBundle {
    /// Rule labels followed by multilingual flags.
    pub fn combined_flags(&self) -> Vec<String> {
        self.rule
            .labels
            .iter()
            .chain(self.multilingual.flags.iter())
            .cloned()
            .collect()
    }

    pub fn max_url_risk(&self) -> Option<u32> {
        self.urls.iter().map(|u| u.risk_score).max()
    }
}
