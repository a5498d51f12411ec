// Representative document per topic: the document the model is most sure
// belongs to that topic.

use crate::error::{PipelineError, Result};

/// For each topic column of `probabilities` (documents x topics), return the
/// document with the highest probability. Ties go to the lowest document
/// index.
pub fn representative_documents(
    corpus: &[String],
    probabilities: &[Vec<f64>],
) -> Result<Vec<String>> {
    if corpus.is_empty() {
        return Err(PipelineError::EmptyCorpus);
    }
    if probabilities.len() != corpus.len() {
        return Err(PipelineError::ShapeMismatch {
            what: "probability rows vs documents",
            expected: corpus.len(),
            found: probabilities.len(),
        });
    }

    let n_topics = probabilities[0].len();
    if let Some(row) = probabilities.iter().find(|row| row.len() != n_topics) {
        return Err(PipelineError::ShapeMismatch {
            what: "probability row width",
            expected: n_topics,
            found: row.len(),
        });
    }

    let representatives = (0..n_topics)
        .map(|topic| {
            let mut best = 0;
            for (doc, row) in probabilities.iter().enumerate().skip(1) {
                if row[topic] > probabilities[best][topic] {
                    best = doc;
                }
            }
            corpus[best].clone()
        })
        .collect();
    Ok(representatives)
}
