pub mod anonymize;
pub mod components;
pub mod config;
pub mod detection;
pub mod domain_utils;
pub mod features;
pub mod filter;
pub mod language;
pub mod machine_learning;
pub mod statistics;

pub use anonymize::MessageAnonymizer;
pub use config::ScorerConfig;
pub use detection::RiskLevel;
pub use features::{UrlFinding, UrlRiskLevel};
pub use filter::{AnalysisResult, FraudAnalyzer};
pub use language::LanguageDetector;
pub use statistics::{AuditRecord, AuditSink, StatisticsCollector};
