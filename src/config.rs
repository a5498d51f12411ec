use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::{json, Number, Value};

use crate::pipeline::options::Options;
use crate::pipeline::train::{Trainer, MODEL_STEP};
use crate::text::stemmer::{Language, Stemmer};
use crate::text::stopwords::StopwordSet;
use crate::vectorize::count::CountVectorizer;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override individual fields after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Stemming language (TOPICPREP_LANGUAGE, default french)
    pub language: Language,
    /// One stopword per line. Unset means the built-in French/English list.
    pub stopwords_path: Option<PathBuf>,
    pub n_topics: usize,
    /// Integer = document count, decimal = fraction of the corpus
    pub max_df: Number,
    pub min_df: Number,
    pub max_features: Option<usize>,
    /// Longest n-gram fed to the vectorizer
    pub ngram_max: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::French,
            stopwords_path: None,
            n_topics: 2,
            max_df: Number::from_f64(0.98).unwrap_or_else(|| Number::from(1)),
            min_df: Number::from(2),
            max_features: Some(10_000),
            ngram_max: 2,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; defaults match short-comment topic
    /// discovery in French.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(tag) = lookup("TOPICPREP_LANGUAGE") {
            config.language = tag
                .parse()
                .with_context(|| format!("TOPICPREP_LANGUAGE={tag}"))?;
        }
        config.stopwords_path = lookup("TOPICPREP_STOPWORDS_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup("TOPICPREP_N_TOPICS") {
            config.n_topics = parse_count("TOPICPREP_N_TOPICS", &raw)?;
            if config.n_topics == 0 {
                anyhow::bail!("TOPICPREP_N_TOPICS must be at least 1");
            }
        }
        if let Some(raw) = lookup("TOPICPREP_MAX_DF") {
            config.max_df = parse_frequency("TOPICPREP_MAX_DF", &raw)?;
        }
        if let Some(raw) = lookup("TOPICPREP_MIN_DF") {
            config.min_df = parse_frequency("TOPICPREP_MIN_DF", &raw)?;
        }
        if let Some(raw) = lookup("TOPICPREP_MAX_FEATURES") {
            // "none" lifts the cap
            config.max_features = match raw.trim() {
                "none" | "" => None,
                value => Some(parse_count("TOPICPREP_MAX_FEATURES", value)?),
            };
        }
        if let Some(raw) = lookup("TOPICPREP_NGRAM_MAX") {
            config.ngram_max = parse_count("TOPICPREP_NGRAM_MAX", &raw)?;
            if config.ngram_max == 0 {
                anyhow::bail!("TOPICPREP_NGRAM_MAX must be at least 1");
            }
        }

        Ok(config)
    }

    /// The active stopword list: the configured file, or the built-in list.
    pub fn stopwords(&self) -> Result<StopwordSet> {
        match &self.stopwords_path {
            Some(path) => Ok(StopwordSet::from_file(path)?),
            None => Ok(StopwordSet::french_english()),
        }
    }

    /// Render the settings as flat `step__option` pipeline parameters.
    pub fn pipeline_params(&self) -> Options {
        let mut params = Options::new();
        let mut set = |step: &str, key: &str, value: Value| {
            params.insert(format!("{step}__{key}"), value);
        };
        set(Stemmer::NAME, "language", json!(self.language.as_str()));
        set(CountVectorizer::NAME, "max_df", Value::Number(self.max_df.clone()));
        set(CountVectorizer::NAME, "min_df", Value::Number(self.min_df.clone()));
        set(CountVectorizer::NAME, "max_features", json!(self.max_features));
        set(CountVectorizer::NAME, "ngram_range", json!([1, self.ngram_max]));
        set(MODEL_STEP, "n_components", json!(self.n_topics));
        params
    }

    /// A trainer with every setting applied.
    pub fn trainer(&self) -> Result<Trainer> {
        let mut trainer = Trainer::new(self.stopwords()?, self.language);
        trainer
            .configure(&self.pipeline_params())
            .context("Invalid pipeline configuration")?;
        Ok(trainer)
    }
}

fn parse_count(key: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number, got {raw:?}"))
}

/// Whole numbers stay integers (document counts); anything with a decimal
/// point is a fraction.
fn parse_frequency(key: &str, raw: &str) -> Result<Number> {
    let raw = raw.trim();
    if let Ok(count) = raw.parse::<u64>() {
        return Ok(Number::from(count));
    }
    let value: f64 = raw
        .parse()
        .with_context(|| format!("{key} must be a number, got {raw:?}"))?;
    Number::from_f64(value).with_context(|| format!("{key} must be finite, got {raw:?}"))
}
