// Adapter for topic matrices computed outside this process.
//
// The external engine reads the document-term matrix exported by
// `topicprep vectorize`, fits its model, and writes
// {"doc_topic": [[...]], "topic_term": [[...]]}. This adapter hands those
// matrices back to the trainer as if it had fitted them.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::traits::{TopicFit, TopicModel};
use crate::error::{PipelineError, Result};
use crate::vectorize::count::DocumentTermMatrix;

/// A topic model whose answer is already known.
#[derive(Debug, Clone)]
pub struct PrecomputedTopicModel {
    fit: TopicFit,
}

impl PrecomputedTopicModel {
    pub fn new(fit: TopicFit) -> Self {
        Self { fit }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let fit: TopicFit = serde_json::from_str(json)
            .map_err(|e| PipelineError::Model(format!("invalid topic matrices: {e}")))?;
        Ok(Self::new(fit))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| PipelineError::Model(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn n_topics(&self) -> usize {
        self.fit.n_topics()
    }
}

impl TopicModel for PrecomputedTopicModel {
    fn fit(&mut self, matrix: &DocumentTermMatrix, n_topics: usize) -> Result<TopicFit> {
        if self.fit.n_topics() != n_topics {
            return Err(PipelineError::ShapeMismatch {
                what: "precomputed topics",
                expected: n_topics,
                found: self.fit.n_topics(),
            });
        }
        debug!(
            documents = matrix.n_documents(),
            terms = matrix.n_terms(),
            topics = n_topics,
            "Using precomputed topic matrices"
        );
        Ok(self.fit.clone())
    }
}
