use crate::components::decision_engine::DecisionEngine;
use crate::components::SignalBundle;
use crate::config::ScorerConfig;
use crate::detection::multi_language::{MultilingualEngine, MultilingualScan};
use crate::detection::rule_engine::{RuleEngine, RuleScan};
use crate::detection::RiskLevel;
use crate::features::url_inspector::UrlInspector;
use crate::features::UrlFinding;
use crate::machine_learning::{AiExplanation, Classifier};
use crate::statistics::{AuditRecord, AuditSink};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Full verdict for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub message: String,
    /// Rule score after the multilingual bonus is blended in.
    pub rule_score: u32,
    pub ai_score: u32,
    pub final_score: u32,
    pub risk_level: RiskLevel,
    pub detected_phrases: Vec<String>,
    pub multilingual_flags: Vec<String>,
    pub detected_languages: Vec<String>,
    pub highlighted_message: String,
    pub explanation: String,
    pub url_analysis: Vec<UrlFinding>,
    pub ai_explanation: AiExplanation,
    pub url_boost_applied: bool,
}

impl AnalysisResult {
    /// Rule labels followed by multilingual flags, as handed to audit sinks.
    pub fn flattened_flags(&self) -> Vec<String> {
        self.detected_phrases
            .iter()
            .chain(self.multilingual_flags.iter())
            .cloned()
            .collect()
    }
}

/// Classifier output gathered on one task so score and explanation agree.
#[derive(Debug, Clone, Default)]
struct AiVerdict {
    score: u32,
    explanation: AiExplanation,
}

/// Scoring service: the detectors plus the fusion step.
///
/// Detectors are read-only after construction, so clones share them and
/// may score messages from any number of threads at once.
#[derive(Clone)]
pub struct FraudAnalyzer {
    rule_engine: Arc<RuleEngine>,
    multilingual: Arc<MultilingualEngine>,
    url_inspector: Arc<UrlInspector>,
    classifier: Arc<Classifier>,
    decision_engine: Arc<DecisionEngine>,
}

impl FraudAnalyzer {
    /// Compile every pattern table and train the classifier.
    pub fn new(config: &ScorerConfig) -> Result<Self> {
        config.validate()?;

        let start = Instant::now();
        let rule_engine =
            RuleEngine::with_markers(&config.highlight.open_tag, &config.highlight.close_tag)?;
        let url_inspector = UrlInspector::with_max_urls(config.url_inspection.max_urls)?;
        let classifier = Classifier::train(&config.classifier)?;
        let multilingual = MultilingualEngine::new();

        log::info!(
            "Fraud analyzer ready in {:?}: {} multilingual phrases, {} classifier features",
            start.elapsed(),
            multilingual.phrase_count(),
            classifier.vocabulary_size()
        );

        Ok(Self {
            rule_engine: Arc::new(rule_engine),
            multilingual: Arc::new(multilingual),
            url_inspector: Arc::new(url_inspector),
            classifier: Arc::new(classifier),
            decision_engine: Arc::new(DecisionEngine::new()),
        })
    }

    /// Score a message with every detector on the calling thread.
    pub fn analyze(&self, message: &str) -> AnalysisResult {
        let rule = self.rule_engine.analyze(message);
        log::debug!("Rule engine: score {} labels {:?}", rule.score, rule.labels);

        let multilingual = self.multilingual.analyze(message);
        log::debug!(
            "Multilingual engine: score {} flags {:?}",
            multilingual.score,
            multilingual.flags
        );

        let urls = self.url_inspector.inspect_message(message);
        log::debug!("URL inspector: {} URL(s) inspected", urls.len());

        let ai = Self::classify(&self.classifier, message);
        log::debug!("Classifier: score {}", ai.score);

        self.fuse(message, rule, multilingual, urls, ai)
    }

    /// Same verdict as [`FraudAnalyzer::analyze`], with the four detectors
    /// running on the blocking pool and joined before fusion.
    ///
    /// A detector task that panics contributes empty evidence instead of
    /// failing the whole analysis.
    pub async fn analyze_concurrent(&self, message: String) -> AnalysisResult {
        let text: Arc<str> = Arc::from(message.as_str());

        let rule_task = {
            let engine = Arc::clone(&self.rule_engine);
            let text = Arc::clone(&text);
            tokio::task::spawn_blocking(move || engine.analyze(&text))
        };
        let multilingual_task = {
            let engine = Arc::clone(&self.multilingual);
            let text = Arc::clone(&text);
            tokio::task::spawn_blocking(move || engine.analyze(&text))
        };
        let url_task = {
            let inspector = Arc::clone(&self.url_inspector);
            let text = Arc::clone(&text);
            tokio::task::spawn_blocking(move || inspector.inspect_message(&text))
        };
        let ai_task = {
            let classifier = Arc::clone(&self.classifier);
            let text = Arc::clone(&text);
            tokio::task::spawn_blocking(move || Self::classify(&classifier, &text))
        };

        let (rule, multilingual, urls, ai) =
            tokio::join!(rule_task, multilingual_task, url_task, ai_task);

        let rule: RuleScan = neutral_on_failure("rule engine", rule);
        let multilingual: MultilingualScan = neutral_on_failure("multilingual engine", multilingual);
        let urls: Vec<UrlFinding> = neutral_on_failure("URL inspector", urls);
        let ai: AiVerdict = neutral_on_failure("classifier", ai);

        self.fuse(&message, rule, multilingual, urls, ai)
    }

    /// Analyse and hand the audit record to `sink`.
    pub fn analyze_and_record(&self, message: &str, sink: &dyn AuditSink) -> AnalysisResult {
        let result = self.analyze(message);
        sink.record(AuditRecord::from_result(&result));
        result
    }

    fn classify(classifier: &Classifier, message: &str) -> AiVerdict {
        AiVerdict {
            score: classifier.score(message),
            explanation: classifier.explain(message),
        }
    }

    fn fuse(
        &self,
        message: &str,
        rule: RuleScan,
        multilingual: MultilingualScan,
        urls: Vec<UrlFinding>,
        ai: AiVerdict,
    ) -> AnalysisResult {
        let signals = SignalBundle {
            rule,
            multilingual,
            urls,
            ai_score: ai.score,
        };
        let decision = self.decision_engine.make_decision(&signals);

        log::debug!(
            "Decision: rule {} ai {} final {} ({}){}",
            decision.combined_rule,
            decision.ai_score,
            decision.final_score,
            decision.risk_level,
            if decision.url_boost_applied {
                ", URL boost applied"
            } else {
                ""
            }
        );

        let highlighted_message = self.rule_engine.highlight(message, &signals.rule.labels);

        let mut seen = HashSet::new();
        let multilingual_flags: Vec<String> = signals
            .multilingual
            .flags
            .iter()
            .filter(|flag| seen.insert(flag.as_str()))
            .cloned()
            .collect();

        AnalysisResult {
            message: message.to_string(),
            rule_score: decision.combined_rule,
            ai_score: decision.ai_score,
            final_score: decision.final_score,
            risk_level: decision.risk_level,
            detected_phrases: signals.rule.labels,
            multilingual_flags,
            detected_languages: signals.multilingual.languages,
            highlighted_message,
            explanation: decision.explanation,
            url_analysis: signals.urls,
            ai_explanation: ai.explanation,
            url_boost_applied: decision.url_boost_applied,
        }
    }
}

fn neutral_on_failure<T: Default>(
    detector: &str,
    outcome: std::result::Result<T, tokio::task::JoinError>,
) -> T {
    match outcome {
        Ok(value) => value,
        Err(e) => {
            log::error!("{} task failed, using empty evidence: {}", detector, e);
            T::default()
        }
    }
}
