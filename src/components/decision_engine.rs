//! Decision Engine Component
//!
//! Blends the rule, multilingual, classifier and URL signals into the final
//! score, risk tier and narrative explanation.

use crate::components::SignalBundle;
use crate::detection::RiskLevel;
use serde::{Deserialize, Serialize};

pub const RULE_WEIGHT: f64 = 0.6;
pub const AI_WEIGHT: f64 = 0.4;
/// A URL at or above this risk escalates the final score.
pub const URL_BOOST_THRESHOLD: u32 = 70;
pub const URL_BOOST: u32 = 10;

const MAX_QUOTED_FLAGS: usize = 4;

const HIGH_RISK_SUMMARY: &str = "THREAT CONFIRMED: This message exhibits multiple \
    high-confidence fraud signatures. Do not engage, click any links, share personal data, \
    or call any numbers provided.";
const MEDIUM_RISK_SUMMARY: &str = "THREAT SUSPECTED: This message contains patterns \
    consistent with social engineering or phishing attempts. Verify independently through \
    official channels before taking any action.";
const LOW_RISK_SUMMARY: &str = "THREAT UNLIKELY: No critical fraud indicators were \
    detected. The message appears benign, though vigilance is always advised.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalDecision {
    /// Rule score plus the multilingual bonus, capped at 100.
    pub combined_rule: u32,
    pub ai_score: u32,
    pub final_score: u32,
    pub risk_level: RiskLevel,
    pub url_boost_applied: bool,
    pub explanation: String,
}

#[derive(Debug, Default)]
pub struct DecisionEngine;

impl DecisionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Make final decision based on detector results
    pub fn make_decision(&self, signals: &SignalBundle) -> FinalDecision {
        let combined_rule = (signals.rule.score + signals.multilingual.score).min(100);
        let ai_score = signals.ai_score.min(100);

        let mut final_score = Self::weighted_score(combined_rule, ai_score);
        let mut risk_level = RiskLevel::from_score(final_score);

        // URL evidence escalates the fused score; the rule score is left as is.
        let url_boost_applied = signals
            .max_url_risk()
            .is_some_and(|risk| risk >= URL_BOOST_THRESHOLD);
        if url_boost_applied {
            final_score = (final_score + URL_BOOST).min(100);
            risk_level = RiskLevel::from_score(final_score);
        }

        let explanation = self.build_reasoning(
            risk_level,
            combined_rule,
            ai_score,
            &signals.combined_flags(),
            !signals.multilingual.flags.is_empty(),
        );

        FinalDecision {
            combined_rule,
            ai_score,
            final_score,
            risk_level,
            url_boost_applied,
            explanation,
        }
    }

    /// `round(0.6 * rule + 0.4 * ai)`, clamped to 0-100.
    pub fn weighted_score(combined_rule: u32, ai_score: u32) -> u32 {
        let blended = RULE_WEIGHT * combined_rule as f64 + AI_WEIGHT * ai_score as f64;
        (blended.round() as u32).min(100)
    }

    /// Build human-readable reasoning for the decision
    pub fn build_reasoning(
        &self,
        risk_level: RiskLevel,
        combined_rule: u32,
        ai_score: u32,
        flags: &[String],
        has_multilingual_flags: bool,
    ) -> String {
        let mut reasoning = match risk_level {
            RiskLevel::High => HIGH_RISK_SUMMARY,
            RiskLevel::Medium => MEDIUM_RISK_SUMMARY,
            RiskLevel::Low => LOW_RISK_SUMMARY,
        }
        .to_string();

        if !flags.is_empty() {
            let quoted: Vec<String> = flags
                .iter()
                .take(MAX_QUOTED_FLAGS)
                .map(|f| format!("\"{}\"", f))
                .collect();
            reasoning.push_str(&format!(" Key signals flagged: {}.", quoted.join(", ")));
        }

        if combined_rule > 60 {
            reasoning.push_str(" Rule engine detected a dense cluster of scam keywords.");
        }
        if ai_score > 65 {
            reasoning.push_str(" AI model classifies this with high fraud probability.");
        }
        if has_multilingual_flags {
            reasoning.push_str(" Regional language fraud signals detected.");
        }
        if combined_rule < 15 && ai_score < 35 {
            reasoning.push_str(" Both detection layers returned low-risk readings.");
        }

        reasoning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::multi_language::MultilingualScan;
    use crate::detection::rule_engine::RuleScan;
    use crate::features::{UrlFinding, UrlRiskLevel};

    fn bundle(rule: u32, multilingual: u32, ai: u32) -> SignalBundle {
        SignalBundle {
            rule: RuleScan {
                score: rule,
                ..RuleScan::default()
            },
            multilingual: MultilingualScan {
                score: multilingual,
                ..MultilingualScan::default()
            },
            urls: Vec::new(),
            ai_score: ai,
        }
    }

    fn url_with_risk(risk_score: u32) -> UrlFinding {
        UrlFinding {
            url: "http://example.tk".to_string(),
            domain: "example.tk".to_string(),
            risk_score,
            risk_level: UrlRiskLevel::from_score(risk_score),
            findings: vec!["test".to_string()],
            is_suspicious: risk_score >= 30,
        }
    }

    #[test]
    fn test_weighted_fusion() {
        let decision = DecisionEngine::new().make_decision(&bundle(50, 0, 80));
        assert_eq!(decision.combined_rule, 50);
        assert_eq!(decision.final_score, 62);
        assert_eq!(decision.risk_level, RiskLevel::Medium);
        assert!(!decision.url_boost_applied);
    }

    #[test]
    fn test_multilingual_blend_is_capped() {
        let decision = DecisionEngine::new().make_decision(&bundle(80, 50, 0));
        assert_eq!(decision.combined_rule, 100);
        assert_eq!(decision.final_score, 60);
    }

    #[test]
    fn test_no_rule_signal_uses_ai_only() {
        for ai in [0, 17, 39, 50, 88, 100] {
            let decision = DecisionEngine::new().make_decision(&bundle(0, 0, ai));
            assert_eq!(decision.combined_rule, 0);
            assert_eq!(decision.final_score, (0.4 * ai as f64).round() as u32);
        }
    }

    #[test]
    fn test_url_boost_escalates_tier() {
        let mut signals = bundle(65, 0, 65);
        assert_eq!(DecisionEngine::weighted_score(65, 65), 65);

        signals.urls.push(url_with_risk(70));
        let decision = DecisionEngine::new().make_decision(&signals);

        assert!(decision.url_boost_applied);
        assert_eq!(decision.final_score, 75);
        assert_eq!(decision.risk_level, RiskLevel::High);
        assert_eq!(decision.combined_rule, 65);
    }

    #[test]
    fn test_url_below_threshold_does_not_boost() {
        let mut signals = bundle(10, 0, 20);
        signals.urls.push(url_with_risk(69));
        let decision = DecisionEngine::new().make_decision(&signals);

        assert!(!decision.url_boost_applied);
        assert_eq!(decision.final_score, 14);
    }

    #[test]
    fn test_url_boost_is_capped() {
        let mut signals = bundle(100, 0, 100);
        signals.urls.push(url_with_risk(100));
        let decision = DecisionEngine::new().make_decision(&signals);
        assert_eq!(decision.final_score, 100);
    }

    #[test]
    fn test_reasoning_clause_order() {
        let engine = DecisionEngine::new();
        let flags = vec![
            "OTP".to_string(),
            "KYC".to_string(),
            "bank".to_string(),
            "urgent".to_string(),
            "free".to_string(),
        ];

        let reasoning = engine.build_reasoning(RiskLevel::High, 70, 90, &flags, true);

        assert!(reasoning.starts_with("THREAT CONFIRMED"));
        assert!(reasoning.contains(
            "Key signals flagged: \"OTP\", \"KYC\", \"bank\", \"urgent\"."
        ));
        assert!(!reasoning.contains("\"free\""));

        let dense = reasoning.find("dense cluster").unwrap();
        let ai = reasoning.find("high fraud probability").unwrap();
        let regional = reasoning.find("Regional language").unwrap();
        assert!(dense < ai && ai < regional);
        assert!(!reasoning.contains("low-risk readings"));
    }

    #[test]
    fn test_reasoning_for_quiet_message() {
        let reasoning = DecisionEngine::new().build_reasoning(RiskLevel::Low, 0, 20, &[], false);

        assert_eq!(
            reasoning,
            format!(
                "{} Both detection layers returned low-risk readings.",
                LOW_RISK_SUMMARY
            )
        );
    }

    #[test]
    fn test_medium_summary() {
        let reasoning =
            DecisionEngine::new().build_reasoning(RiskLevel::Medium, 40, 50, &[], false);
        assert_eq!(reasoning, MEDIUM_RISK_SUMMARY);
    }
}
