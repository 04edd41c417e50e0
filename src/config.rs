use crate::features::url_inspector::DEFAULT_MAX_URLS;
use crate::machine_learning::ClassifierConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlInspectionConfig {
    pub max_urls: usize,
}

impl Default for UrlInspectionConfig {
    fn default() -> Self {
        Self {
            max_urls: DEFAULT_MAX_URLS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub open_tag: String,
    pub close_tag: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            open_tag: "<mark class=\"hl\">".to_string(),
            close_tag: "</mark>".to_string(),
        }
    }
}

/// Tunables for the analyzer. Fusion weights and tier thresholds are fixed
/// and deliberately absent here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub classifier: ClassifierConfig,
    pub url_inspection: UrlInspectionConfig,
    pub highlight: HighlightConfig,
}

impl ScorerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ScorerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file when given and present, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) if Path::new(path).exists() => Self::load_from_file(path),
            Some(path) => {
                log::warn!("Config file not found: {}, using defaults", path);
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn generate_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(&Self::default())
            .context("Failed to serialize default config")?;
        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let classifier = &self.classifier;
        if classifier.max_features == 0 {
            bail!("classifier.max_features must be greater than 0");
        }
        if classifier.ngram_max == 0 {
            bail!("classifier.ngram_max must be greater than 0");
        }
        if classifier.regularization.is_nan() || classifier.regularization <= 0.0 {
            bail!("classifier.regularization must be positive");
        }
        if classifier.explain_top_n == 0 {
            bail!("classifier.explain_top_n must be greater than 0");
        }
        if self.url_inspection.max_urls == 0 {
            bail!("url_inspection.max_urls must be greater than 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScorerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.classifier.max_features, 600);
        assert_eq!(config.url_inspection.max_urls, 5);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ScorerConfig = serde_yaml::from_str(
            "classifier:\n  explain_top_n: 5\nurl_inspection:\n  max_urls: 2\n",
        )
        .unwrap();

        assert_eq!(config.classifier.explain_top_n, 5);
        assert_eq!(config.classifier.ngram_max, 2);
        assert_eq!(config.url_inspection.max_urls, 2);
        assert_eq!(config.highlight, HighlightConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_limits() {
        let mut config = ScorerConfig::default();
        config.url_inspection.max_urls = 0;
        assert!(config.validate().is_err());

        let mut config = ScorerConfig::default();
        config.classifier.regularization = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_generate_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "fraud-shield-config-{}.yaml",
            std::process::id()
        ));

        ScorerConfig::generate_default(&path).unwrap();
        let loaded = ScorerConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, ScorerConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = ScorerConfig::load_or_default(Some("/nonexistent/fraud-shield.yaml")).unwrap();
        assert_eq!(config, ScorerConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "fraud-shield-bad-{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, "classifier: [not, a, map]").unwrap();
        let result = ScorerConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}
