// Error types for the normalization pipeline.
//
// Library code returns `PipelineError`; the binary and config layer wrap it
// in `anyhow` like everything else at the edges.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the normalization pipeline and topic post-processing.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The stemming language tag is not one of the supported Snowball languages.
    #[error("Unsupported stemming language: {0:?}")]
    UnsupportedLanguage(String),

    /// Two collaborators disagreed on a length (words vs weights, documents vs
    /// probability rows, vocabulary vs topic-term columns).
    #[error("Shape mismatch in {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// The operation needs at least one document.
    #[error("Corpus is empty")]
    EmptyCorpus,

    /// Neither the word-level nor the letter-level path produced any terms.
    #[error("No vocabulary remained after vectorization (word and letter paths)")]
    EmptyVocabulary,

    /// An option value had the wrong type or range.
    #[error("Invalid value for option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },

    /// A step does not understand the given option key.
    #[error("Step '{step}' has no option '{key}'")]
    UnknownOption { step: String, key: String },

    /// A `step__key` parameter named a step that is not in the pipeline.
    #[error("No pipeline step named '{0}'")]
    UnknownStep(String),

    /// The stopword file could not be read.
    #[error("Failed to read stopwords from {}", path.display())]
    StopwordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Topic words were requested before any vocabulary was fitted.
    #[error("Pipeline has not been fitted yet")]
    NotFitted,

    /// The topic model collaborator failed.
    #[error("Topic model error: {0}")]
    Model(String),
}

/// Non-fatal: a stem was looked up that was never seen while fitting.
///
/// Logged and resolved to an empty string so the rest of the inverse
/// transform can complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Stem '{stem}' not found in vocabulary for inverse stemming")]
pub struct UnseenStemWarning {
    pub stem: String,
}

pub type Result<T> = std::result::Result<T, PipelineError>;
