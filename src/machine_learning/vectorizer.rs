//! TF-IDF vectorisation over cleaned word n-grams.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;

/// Every URL in a message collapses to this single token.
pub const URL_SENTINEL: &str = "suspiciouslink";

/// Sparse document vector as (vocabulary index, weight), sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

pub struct TextCleaner {
    url_regex: Regex,
}

impl TextCleaner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            url_regex: Regex::new(r"http\S+").context("Invalid URL sentinel pattern")?,
        })
    }

    /// Lowercase, replace URLs with the sentinel, keep only `[a-z0-9]` words.
    pub fn clean(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        let replaced = self.url_regex.replace_all(&lower, URL_SENTINEL);
        Self::normalize(&replaced)
    }

    /// Lowercase and keep only `[a-z0-9]` words. URLs are left in place, so
    /// their host and path fragments become ordinary tokens.
    pub fn normalize(text: &str) -> String {
        let stripped: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Word n-grams of a cleaned text; single-character tokens are dropped.
pub fn ngrams(cleaned: &str, ngram_max: usize) -> Vec<String> {
    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= 2)
        .collect();

    let mut grams = Vec::new();
    for n in 1..=ngram_max {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            grams.push(window.join(" "));
        }
    }
    grams
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
    ngram_max: usize,
}

impl TfidfVectorizer {
    /// Build the vocabulary from cleaned documents.
    ///
    /// The `max_features` most frequent n-grams (ties alphabetical) are kept
    /// and indexed alphabetically. IDF is smoothed: `ln((1+n)/(1+df)) + 1`.
    pub fn fit(documents: &[String], ngram_max: usize, max_features: usize) -> Self {
        let mut term_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let grams = ngrams(doc, ngram_max);
            let mut seen: Vec<&String> = Vec::new();
            for gram in &grams {
                *term_counts.entry(gram.clone()).or_insert(0) += 1;
                if !seen.contains(&gram) {
                    seen.push(gram);
                    *doc_freq.entry(gram.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(&String, &usize)> = term_counts.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let mut terms: Vec<String> = ranked
            .into_iter()
            .take(max_features)
            .map(|(term, _)| term.clone())
            .collect();
        terms.sort();

        let n_docs = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        Self {
            vocabulary,
            terms,
            idf,
            ngram_max,
        }
    }

    /// Count x IDF over vocabulary n-grams, L2-normalised. Empty when nothing overlaps.
    pub fn transform(&self, cleaned: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for gram in ngrams(cleaned, self.ngram_max) {
            if let Some(&index) = self.vocabulary.get(&gram) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();
        vector.sort_by_key(|(index, _)| *index);

        let norm = vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in vector.iter_mut() {
                *value /= norm;
            }
        }
        vector
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
