use crate::anonymize::MessageAnonymizer;
use crate::detection::RiskLevel;
use crate::filter::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

/// What an audit sink receives for every analysed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub message: String,
    /// Combined rule score, multilingual bonus included.
    pub rule_score: u32,
    pub ai_score: u32,
    pub final_score: u32,
    pub risk_level: RiskLevel,
    pub flags: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            message: result.message.clone(),
            rule_score: result.rule_score,
            ai_score: result.ai_score,
            final_score: result.final_score,
            risk_level: result.risk_level,
            flags: result.flattened_flags(),
            analyzed_at: Utc::now(),
        }
    }
}

/// Destination for audit records. Implementations must tolerate concurrent callers.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: AuditRecord);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub avg_score: f64,
    pub since: DateTime<Utc>,
}

/// Anonymised entry for the public community feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub message: String,
    pub final_score: u32,
    pub risk_level: RiskLevel,
    pub flags: Vec<String>,
    pub flag_count: usize,
    pub analyzed_at: DateTime<Utc>,
}

/// In-memory audit sink with simple aggregate queries.
pub struct StatisticsCollector {
    records: Mutex<Vec<AuditRecord>>,
    start_time: DateTime<Utc>,
}

impl Default for StatisticsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            start_time: Utc::now(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AuditRecord>> {
        // A panicking writer can only have pushed whole records.
        self.records.lock().unwrap_or_else(|poisoned| {
            log::warn!("Statistics lock was poisoned, continuing with recorded data");
            poisoned.into_inner()
        })
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Most recent records first.
    pub fn recent(&self, limit: usize) -> Vec<AuditRecord> {
        self.lock().iter().rev().take(limit).cloned().collect()
    }

    pub fn summary(&self) -> StatsSummary {
        let records = self.lock();
        let count = |level: RiskLevel| records.iter().filter(|r| r.risk_level == level).count();

        let avg_score = if records.is_empty() {
            0.0
        } else {
            let sum: u64 = records.iter().map(|r| r.final_score as u64).sum();
            (sum as f64 / records.len() as f64 * 10.0).round() / 10.0
        };

        StatsSummary {
            total: records.len(),
            high: count(RiskLevel::High),
            medium: count(RiskLevel::Medium),
            low: count(RiskLevel::Low),
            avg_score,
            since: self.start_time,
        }
    }

    /// Most frequent flags, ties broken by which flag was seen first.
    pub fn top_flags(&self, limit: usize) -> Vec<(String, usize)> {
        let records = self.lock();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for flag in records.iter().flat_map(|r| r.flags.iter()) {
            match counts.iter_mut().find(|(name, _)| name == flag) {
                Some((_, count)) => *count += 1,
                None => counts.push((flag.clone(), 1)),
            }
        }

        // Stable sort keeps first-appearance order within equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(limit);
        counts
    }

    /// Newest MEDIUM and HIGH records with personal data redacted.
    pub fn community_feed(&self, limit: usize, anonymizer: &MessageAnonymizer) -> Vec<FeedEntry> {
        self.lock()
            .iter()
            .rev()
            .filter(|r| r.risk_level >= RiskLevel::Medium)
            .take(limit)
            .map(|r| FeedEntry {
                message: anonymizer.anonymize(&r.message),
                final_score: r.final_score,
                risk_level: r.risk_level,
                flags: r.flags.clone(),
                flag_count: r.flags.len(),
                analyzed_at: r.analyzed_at,
            })
            .collect()
    }

    pub fn reset(&self) {
        self.lock().clear();
        log::info!("Statistics reset");
    }
}

impl AuditSink for StatisticsCollector {
    fn record(&self, record: AuditRecord) {
        log::debug!(
            "Audit: final {} ({}) with {} flag(s)",
            record.final_score,
            record.risk_level,
            record.flags.len()
        );
        self.lock().push(record);
    }
}
