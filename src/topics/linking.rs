// Pairing topic words with their weights, and splitting 1-grams from n-grams.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// One word (or phrase) of a topic with its model weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordWeight {
    pub word: String,
    pub weight: f64,
}

impl WordWeight {
    pub fn new(word: impl Into<String>, weight: f64) -> Self {
        Self {
            word: word.into(),
            weight,
        }
    }

    /// True for multi-token phrases, which always contain a space.
    pub fn is_ngram(&self) -> bool {
        self.word.contains(' ')
    }
}

/// Per-topic word/weight pairs split by token count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicGroups {
    pub onegrams: Vec<Vec<WordWeight>>,
    pub ngrams: Vec<Vec<WordWeight>>,
}

/// Zip each topic's words with its weights, keeping rank order.
///
/// Fails if the number of topics or any topic's length differs.
pub fn link(words: &[Vec<String>], weights: &[Vec<f64>]) -> Result<Vec<Vec<WordWeight>>> {
    if words.len() != weights.len() {
        return Err(PipelineError::ShapeMismatch {
            what: "topics (words vs weights)",
            expected: words.len(),
            found: weights.len(),
        });
    }

    words
        .iter()
        .zip(weights)
        .map(|(topic_words, topic_weights)| {
            if topic_words.len() != topic_weights.len() {
                return Err(PipelineError::ShapeMismatch {
                    what: "topic words vs weights",
                    expected: topic_words.len(),
                    found: topic_weights.len(),
                });
            }
            Ok(topic_words
                .iter()
                .zip(topic_weights)
                .map(|(word, &weight)| WordWeight::new(word.clone(), weight))
                .collect())
        })
        .collect()
}

/// Split every topic into single-token and multi-token pairs, preserving
/// relative order in both.
pub fn partition(topics: &[Vec<WordWeight>]) -> TopicGroups {
    let mut groups = TopicGroups::default();
    for topic in topics {
        let (ngrams, onegrams): (Vec<WordWeight>, Vec<WordWeight>) =
            topic.iter().cloned().partition(WordWeight::is_ngram);
        groups.onegrams.push(onegrams);
        groups.ngrams.push(ngrams);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_pairs_in_order() {
        let words = vec![vec!["chats".to_string(), "chiens".to_string()]];
        let weights = vec![vec![2.0, 0.75]];
        let linked = link(&words, &weights).unwrap();
        assert_eq!(
            linked,
            vec![vec![WordWeight::new("chats", 2.0), WordWeight::new("chiens", 0.75)]]
        );
    }

    #[test]
    fn test_link_rejects_ragged_topic() {
        let words = vec![vec!["a".to_string()]];
        let weights = vec![vec![1.0, 0.5]];
        assert!(matches!(
            link(&words, &weights),
            Err(PipelineError::ShapeMismatch { expected: 1, found: 2, .. })
        ));
    }

    #[test]
    fn test_partition_by_space() {
        let topics = vec![vec![
            WordWeight::new("chats", 3.0),
            WordWeight::new("super chiens", 2.0),
            WordWeight::new("sont", 1.0),
        ]];
        let groups = partition(&topics);
        assert_eq!(
            groups.onegrams,
            vec![vec![WordWeight::new("chats", 3.0), WordWeight::new("sont", 1.0)]]
        );
        assert_eq!(groups.ngrams, vec![vec![WordWeight::new("super chiens", 2.0)]]);
    }
}
