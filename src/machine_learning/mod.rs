//! Linear text classifier trained once, at startup, on a fixed labelled corpus.

pub mod corpus;
pub mod explainability;
pub mod logistic;
pub mod vectorizer;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub use explainability::{AiExplanation, Direction, FeatureContribution};
use logistic::LogisticModel;
use vectorizer::{TextCleaner, TfidfVectorizer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub max_features: usize,
    pub ngram_max: usize,
    /// Inverse L2 regularisation strength.
    pub regularization: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub explain_top_n: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_features: 600,
            ngram_max: 2,
            regularization: 1.5,
            max_iterations: 5000,
            tolerance: 1e-6,
            explain_top_n: 10,
        }
    }
}

/// Trained classifier. Immutable once built; share it behind an `Arc`.
pub struct Classifier {
    cleaner: TextCleaner,
    vectorizer: TfidfVectorizer,
    model: LogisticModel,
    training_accuracy: f64,
    explain_top_n: usize,
}

impl Classifier {
    pub fn train(config: &ClassifierConfig) -> Result<Self> {
        Self::train_on(corpus::TRAINING_CORPUS, config)
    }

    pub fn train_on(corpus: &[(&str, bool)], config: &ClassifierConfig) -> Result<Self> {
        let cleaner = TextCleaner::new()?;

        let documents: Vec<String> = corpus.iter().map(|(text, _)| cleaner.clean(text)).collect();
        let labels: Vec<bool> = corpus.iter().map(|(_, fraud)| *fraud).collect();

        let vectorizer = TfidfVectorizer::fit(&documents, config.ngram_max, config.max_features);
        if vectorizer.is_empty() {
            bail!("Training corpus produced an empty vocabulary");
        }

        let samples: Vec<_> = documents.iter().map(|d| vectorizer.transform(d)).collect();
        let (model, report) = LogisticModel::fit(
            &samples,
            &labels,
            vectorizer.len(),
            config.regularization,
            config.max_iterations,
            config.tolerance,
        );

        let correct = samples
            .iter()
            .zip(&labels)
            .filter(|(x, label)| (model.predict_proba(x) >= 0.5) == **label)
            .count();
        let training_accuracy = correct as f64 / samples.len() as f64;

        if !report.converged {
            log::warn!(
                "Classifier stopped after {} iterations without converging (gradient {:.2e})",
                report.iterations,
                report.final_gradient
            );
        }
        log::info!(
            "Classifier trained: {} messages, {} features, {} iterations, training accuracy {:.2}",
            samples.len(),
            vectorizer.len(),
            report.iterations,
            training_accuracy
        );

        Ok(Self {
            cleaner,
            vectorizer,
            model,
            training_accuracy,
            explain_top_n: config.explain_top_n,
        })
    }

    pub fn fraud_probability(&self, message: &str) -> f64 {
        let cleaned = self.cleaner.clean(message);
        self.model.predict_proba(&self.vectorizer.transform(&cleaned))
    }

    /// Fraud probability as an integer percentage, 0-100.
    pub fn score(&self, message: &str) -> u32 {
        (self.fraud_probability(message) * 100.0).round().clamp(0.0, 100.0) as u32
    }

    /// Per-token contributions for the message, strongest first.
    ///
    /// Unlike [`Classifier::score`], URLs are not collapsed into the sentinel:
    /// their host and path words are attributed individually.
    pub fn explain(&self, message: &str) -> AiExplanation {
        let normalized = TextCleaner::normalize(message);
        let vector = self.vectorizer.transform(&normalized);

        let contributions = vector
            .iter()
            .filter_map(|(index, weight)| {
                self.vectorizer
                    .term(*index)
                    .map(|term| (term.to_string(), self.model.coefficient(*index) * weight))
            })
            .collect();

        let features = explainability::top_contributions(contributions, self.explain_top_n);
        explainability::build_explanation(features)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.len()
    }

    pub fn training_accuracy(&self) -> f64 {
        self.training_accuracy
    }
}
