use super::{DetectedSignal, SignalSet};
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label whose highlight span is the URL itself rather than its literal text.
pub const LINK_LABEL: &str = "suspicious link";

pub const URL_PATTERN: &str = r"http[s]?://\S+";

const DEFAULT_WEIGHT: u32 = 5;

/// Ordered (pattern, canonical label) table. Order here is the order labels are reported in.
const FRAUD_PATTERNS: &[(&str, &str)] = &[
    (r"\burgent\b", "urgent"),
    (r"\bimmediately\b", "immediately"),
    (r"\bact now\b", "act now"),
    (r"\botp\b", "OTP"),
    (r"\bkyc\b", "KYC"),
    (r"\bupdate\s+account\b", "update account"),
    (r"\bblocked\b", "blocked"),
    (r"\batm\b", "ATM"),
    (r"\bbank\b", "bank"),
    (r"\baadhaar\b", "Aadhaar"),
    (r"\bpan\b", "PAN"),
    (r"\bverify\b", "verify"),
    (r"\breward\b", "reward"),
    (r"\blottery\b", "lottery"),
    (r"\bclick here\b", "click here"),
    (r"\blimited period\b", "limited period"),
    (r"\bsuspicious\b", "suspicious"),
    (URL_PATTERN, LINK_LABEL),
    (r"\bwon\b", "won"),
    (r"\bprize\b", "prize"),
    (r"\bcongratulations\b", "congratulations"),
    (r"\bfree\b", "free"),
    (r"\bexpire[sd]?\b", "expired"),
    (r"\bpassword\b", "password"),
    (r"\bcredit card\b", "credit card"),
    (r"\bdebit card\b", "debit card"),
    (r"\baccount number\b", "account number"),
    (r"\bpin\b", "PIN"),
    (r"\bsuspend\b", "suspend"),
    (r"\bdeactivat\w*\b", "deactivate"),
    (r"\bclaim\b", "claim"),
    (r"\bcash\s*back\b", "cash back"),
    (r"\bunfreeze\b", "unfreeze"),
    (r"\bverification\b", "verification"),
    (r"\bexpiry\b", "expiry"),
];

const LABEL_WEIGHTS: &[(&str, u32)] = &[
    ("OTP", 10),
    ("KYC", 10),
    ("Aadhaar", 10),
    ("PAN", 10),
    (LINK_LABEL, 15),
    ("lottery", 10),
    ("prize", 8),
    ("won", 8),
    ("password", 10),
    ("credit card", 10),
    ("debit card", 10),
    ("PIN", 10),
    ("account number", 10),
    ("update account", 8),
    ("blocked", 7),
    ("urgent", 6),
    ("immediately", 6),
    ("act now", 7),
    ("verify", 5),
    ("reward", 5),
    ("congratulations", 5),
    ("free", 4),
    ("expired", 5),
    ("suspend", 7),
    ("deactivate", 7),
    ("claim", 5),
    ("bank", 4),
    ("ATM", 5),
    ("cash back", 4),
    ("unfreeze", 7),
    ("click here", 8),
    ("limited period", 6),
    ("suspicious", 5),
    ("verification", 5),
    ("expiry", 5),
];

/// Weight of a canonical label, 5 for labels missing from the table.
pub fn weight_for(label: &str) -> u32 {
    LABEL_WEIGHTS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, w)| *w)
        .unwrap_or(DEFAULT_WEIGHT)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleScan {
    /// Sum of matched label weights, capped at 100.
    pub score: u32,
    pub labels: Vec<String>,
    pub signals: Vec<DetectedSignal>,
}

struct FraudRule {
    regex: Regex,
    label: &'static str,
}

pub struct RuleEngine {
    rules: Vec<FraudRule>,
    link_regex: Regex,
    highlighters: HashMap<&'static str, Regex>,
    open_tag: String,
    close_tag: String,
}

impl RuleEngine {
    pub fn new() -> Result<Self> {
        Self::with_markers("<mark class=\"hl\">", "</mark>")
    }

    pub fn with_markers(open_tag: &str, close_tag: &str) -> Result<Self> {
        let mut rules = Vec::with_capacity(FRAUD_PATTERNS.len());
        let mut highlighters = HashMap::new();

        for (pattern, label) in FRAUD_PATTERNS {
            let regex = Regex::new(&format!("(?i){}", pattern))
                .with_context(|| format!("Invalid fraud pattern for '{}': {}", label, pattern))?;
            rules.push(FraudRule { regex, label });

            if *label != LINK_LABEL {
                let literal = Regex::new(&format!("(?i){}", regex::escape(label)))
                    .with_context(|| format!("Invalid highlight pattern for '{}'", label))?;
                highlighters.insert(*label, literal);
            }
        }

        let link_regex = Regex::new(&format!("(?i){}", URL_PATTERN))
            .context("Invalid URL highlight pattern")?;

        Ok(Self {
            rules,
            link_regex,
            highlighters,
            open_tag: open_tag.to_string(),
            close_tag: close_tag.to_string(),
        })
    }

    /// Scan the lower-cased message against every rule in table order.
    pub fn analyze(&self, message: &str) -> RuleScan {
        let text_lower = message.to_lowercase();
        let mut detected = SignalSet::new();

        for rule in &self.rules {
            if rule.regex.is_match(&text_lower) {
                detected.insert(rule.label, weight_for(rule.label));
            }
        }

        let score = detected.total_weight().min(100);
        let labels = detected.labels();

        RuleScan {
            score,
            labels,
            signals: detected.into_signals(),
        }
    }

    /// Wrap every span matching a detected label in the configured markers.
    ///
    /// Longer labels claim their spans first; a later, shorter label never
    /// marks text inside or across a span that is already claimed.
    pub fn highlight(&self, message: &str, detected: &[String]) -> String {
        let mut ordered: Vec<&String> = detected.iter().collect();
        ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let mut spans: Vec<(usize, usize)> = Vec::new();

        for label in ordered {
            let adhoc;
            let matcher = if label == LINK_LABEL {
                &self.link_regex
            } else if let Some(regex) = self.highlighters.get(label.as_str()) {
                regex
            } else {
                match Regex::new(&format!("(?i){}", regex::escape(label))) {
                    Ok(regex) => {
                        adhoc = regex;
                        &adhoc
                    }
                    Err(e) => {
                        log::warn!("Skipping highlight for '{}': {}", label, e);
                        continue;
                    }
                }
            };

            for m in matcher.find_iter(message) {
                if m.start() == m.end() {
                    continue;
                }
                let free = spans
                    .iter()
                    .all(|&(start, end)| m.end() <= start || m.start() >= end);
                if free {
                    spans.push((m.start(), m.end()));
                }
            }
        }

        spans.sort_unstable();

        let mut highlighted = String::with_capacity(message.len() + spans.len() * 24);
        let mut cursor = 0;
        for (start, end) in spans {
            highlighted.push_str(&message[cursor..start]);
            highlighted.push_str(&self.open_tag);
            highlighted.push_str(&message[start..end]);
            highlighted.push_str(&self.close_tag);
            cursor = end;
        }
        highlighted.push_str(&message[cursor..]);
        highlighted
    }
}
