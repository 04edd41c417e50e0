use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Fraud,
    Safe,
}

/// One token's share of the classifier decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub token: String,
    /// |raw| relative to the strongest selected contribution, 0-100.
    pub magnitude: u32,
    /// coefficient x tf-idf weight, rounded to 4 decimals.
    pub raw_weight: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiExplanation {
    pub features: Vec<FeatureContribution>,
    pub fraud_features: Vec<FeatureContribution>,
    pub safe_features: Vec<FeatureContribution>,
    pub summary: String,
}

pub const INSUFFICIENT_TOKENS: &str = "Insufficient token data for feature explanation.";

/// Rank raw (token, contribution) pairs and keep the `top_n` strongest.
pub fn top_contributions(
    mut contributions: Vec<(String, f64)>,
    top_n: usize,
) -> Vec<FeatureContribution> {
    contributions.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
    contributions.truncate(top_n);

    let max_abs = contributions
        .iter()
        .map(|(_, c)| c.abs())
        .fold(0.0_f64, f64::max);
    let scale = if max_abs > 0.0 { max_abs } else { 1.0 };

    contributions
        .into_iter()
        .map(|(token, contribution)| FeatureContribution {
            token,
            magnitude: (contribution.abs() / scale * 100.0).round() as u32,
            raw_weight: (contribution * 10_000.0).round() / 10_000.0,
            direction: if contribution > 0.0 {
                Direction::Fraud
            } else {
                Direction::Safe
            },
        })
        .collect()
}

pub fn build_explanation(features: Vec<FeatureContribution>) -> AiExplanation {
    if features.is_empty() {
        return AiExplanation {
            summary: INSUFFICIENT_TOKENS.to_string(),
            ..AiExplanation::default()
        };
    }

    let (fraud_features, safe_features): (Vec<_>, Vec<_>) = features
        .iter()
        .cloned()
        .partition(|f| f.direction == Direction::Fraud);

    let top_fraud: Vec<&str> = fraud_features
        .iter()
        .take(3)
        .map(|f| f.token.as_str())
        .collect();
    let top_safe: Vec<&str> = safe_features
        .iter()
        .take(2)
        .map(|f| f.token.as_str())
        .collect();

    let mut parts = Vec::new();
    if !top_fraud.is_empty() {
        parts.push(format!("Top fraud signals: \"{}\"", top_fraud.join(", ")));
    }
    if !top_safe.is_empty() {
        parts.push(format!(
            "Counterbalanced by safer tokens: \"{}\"",
            top_safe.join(", ")
        ));
    }

    let summary = if parts.is_empty() {
        "Model found mixed signals.".to_string()
    } else {
        format!("{}.", parts.join(". "))
    };

    AiExplanation {
        features,
        fraud_features,
        safe_features,
        summary,
    }
}
