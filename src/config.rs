use std::env;

use anyhow::{Context, Result};

use crate::similarity::engine::{PreprocessMode, SimilarityEngine, DEFAULT_THRESHOLD};
use crate::similarity::preprocess::{PreprocessorRegistry, DEFAULT_STOPWORD_TAGS};

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy, so every setting can live
/// there instead of the shell environment. CLI flags override these values.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Default check threshold (PLAGCHECK_THRESHOLD)
    pub threshold: f64,
    /// Language tags that select the English stopword filter (PLAGCHECK_STOPWORD_TAGS)
    pub stopword_tags: Vec<String>,
    /// Preprocess corpus documents as well as queries (PLAGCHECK_SYMMETRIC_PREPROCESSING)
    pub preprocess_mode: PreprocessMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            stopword_tags: DEFAULT_STOPWORD_TAGS.iter().map(|t| t.to_string()).collect(),
            preprocess_mode: PreprocessMode::QueryOnly,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Unset or blank variables take their defaults; malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("PLAGCHECK_THRESHOLD") {
            let threshold: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("PLAGCHECK_THRESHOLD is not a number: {raw:?}"))?;
            config.threshold = validate_threshold(threshold)
                .context("PLAGCHECK_THRESHOLD is out of range")?;
        }

        if let Some(raw) = get("PLAGCHECK_STOPWORD_TAGS") {
            config.stopword_tags = raw
                .split(',')
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
        }

        if let Some(raw) = get("PLAGCHECK_SYMMETRIC_PREPROCESSING") {
            let symmetric = parse_bool(&raw).with_context(|| {
                format!("PLAGCHECK_SYMMETRIC_PREPROCESSING is not a boolean: {raw:?}")
            })?;
            config.preprocess_mode = if symmetric {
                PreprocessMode::Symmetric
            } else {
                PreprocessMode::QueryOnly
            };
        }

        Ok(config)
    }

    /// Build an engine with this configuration.
    pub fn build_engine(&self) -> SimilarityEngine {
        SimilarityEngine::new(PreprocessorRegistry::english(&self.stopword_tags))
            .with_mode(self.preprocess_mode)
            .with_threshold(self.threshold)
    }
}

/// Check that a threshold lies in [0, 1].
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!("threshold must be between 0.0 and 1.0, got {threshold}");
    }
    Ok(threshold)
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected true/false, got {other:?}"),
    }
}
