// Topic model trait: the seam to the external statistical engine.
//
// This crate never estimates topics itself. Anything that can turn a
// document-term matrix into document-topic and topic-term matrices can be
// plugged in here: a binding to an LDA library, a service client, or the
// precomputed adapter that reads matrices from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::vectorize::count::DocumentTermMatrix;

/// Output of a topic model fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicFit {
    /// documents x topics, each row a topic distribution
    pub doc_topic: Vec<Vec<f64>>,
    /// topics x vocabulary, unnormalized term weights
    pub topic_term: Vec<Vec<f64>>,
}

impl TopicFit {
    pub fn n_topics(&self) -> usize {
        self.topic_term.len()
    }

    /// Check the matrices against the corpus and vocabulary they came from.
    pub fn validate(&self, n_documents: usize, n_terms: usize) -> Result<()> {
        let n_topics = self.n_topics();
        if self.doc_topic.len() != n_documents {
            return Err(PipelineError::ShapeMismatch {
                what: "doc-topic rows vs documents",
                expected: n_documents,
                found: self.doc_topic.len(),
            });
        }
        if let Some(row) = self.doc_topic.iter().find(|r| r.len() != n_topics) {
            return Err(PipelineError::ShapeMismatch {
                what: "doc-topic columns vs topics",
                expected: n_topics,
                found: row.len(),
            });
        }
        if let Some(row) = self.topic_term.iter().find(|r| r.len() != n_terms) {
            return Err(PipelineError::ShapeMismatch {
                what: "topic-term columns vs vocabulary",
                expected: n_terms,
                found: row.len(),
            });
        }
        Ok(())
    }
}

/// Trait for fitting a topic model on a document-term matrix.
pub trait TopicModel {
    /// Fit `n_topics` topics and return both matrices.
    fn fit(&mut self, matrix: &DocumentTermMatrix, n_topics: usize) -> Result<TopicFit>;
}
