// Count vectorizer: bag-of-n-grams document-term matrix.
//
// Tokens are lowercase runs of two or more word characters (alphanumerics
// and '_', so letter n-grams with space markers survive). Word n-grams are
// consecutive tokens joined by a single space; that space is what the
// inverse transforms later use to recognize multi-token pseudo-tokens.
//
// Fitting never errors on an empty vocabulary. It returns
// `VectorizeOutcome::EmptyVocabulary` instead, so the caller can decide to
// retry with the letter-level path.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::pipeline::options::{ensure_known, get_f64, Options};

/// Document frequency bound: a fraction of the corpus or an absolute count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocFrequency {
    Count(usize),
    Fraction(f64),
}

impl DocFrequency {
    /// Interpret a JSON number: integers are counts, everything else is a
    /// fraction of the corpus.
    fn from_number(key: &str, value: f64, integer: bool) -> Result<Self> {
        if integer {
            Ok(DocFrequency::Count(value as usize))
        } else if value <= 1.0 {
            Ok(DocFrequency::Fraction(value))
        } else {
            Err(PipelineError::InvalidOption {
                key: key.to_string(),
                reason: format!("fractional frequency must be <= 1.0, got {value}"),
            })
        }
    }

    /// Largest document count allowed when used as an upper bound.
    fn upper_bound(self, n_docs: usize) -> usize {
        match self {
            DocFrequency::Count(n) => n,
            DocFrequency::Fraction(f) => (f * n_docs as f64).floor() as usize,
        }
    }

    /// Smallest document count required when used as a lower bound.
    fn lower_bound(self, n_docs: usize) -> usize {
        match self {
            DocFrequency::Count(n) => n,
            DocFrequency::Fraction(f) => (f * n_docs as f64).ceil() as usize,
        }
    }
}

/// Vectorizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerOptions {
    /// Ignore terms present in more documents than this.
    pub max_df: DocFrequency,
    /// Ignore terms present in fewer documents than this.
    pub min_df: DocFrequency,
    /// Keep only the most frequent terms.
    pub max_features: Option<usize>,
    /// Inclusive (min, max) n-gram length in tokens.
    pub ngram_range: (usize, usize),
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self {
            max_df: DocFrequency::Fraction(1.0),
            min_df: DocFrequency::Count(1),
            max_features: None,
            ngram_range: (1, 1),
        }
    }
}

impl VectorizerOptions {
    /// Settings used for topic discovery on short comments.
    pub fn topic_defaults() -> Self {
        Self {
            max_df: DocFrequency::Fraction(0.98),
            min_df: DocFrequency::Count(2),
            max_features: Some(10_000),
            ngram_range: (1, 2),
        }
    }

    /// Apply `max_df`, `min_df`, `max_features`, `ngram_range` options.
    pub fn configure(&mut self, options: &Options) -> Result<()> {
        ensure_known(
            CountVectorizer::NAME,
            options,
            &["max_df", "min_df", "max_features", "ngram_range"],
        )?;

        for key in ["max_df", "min_df"] {
            if let Some(value) = get_f64(options, key)? {
                let integer = options[key].is_u64();
                let bound = DocFrequency::from_number(key, value, integer)?;
                if key == "max_df" {
                    self.max_df = bound;
                } else {
                    self.min_df = bound;
                }
            }
        }

        if let Some(value) = options.get("max_features") {
            self.max_features = match value {
                serde_json::Value::Null => None,
                v => Some(v.as_u64().ok_or_else(|| PipelineError::InvalidOption {
                    key: "max_features".to_string(),
                    reason: format!("expected a positive integer, got {v}"),
                })? as usize),
            };
        }

        if let Some(value) = options.get("ngram_range") {
            let range: (usize, usize) =
                serde_json::from_value(value.clone()).map_err(|e| PipelineError::InvalidOption {
                    key: "ngram_range".to_string(),
                    reason: e.to_string(),
                })?;
            if range.0 == 0 || range.0 > range.1 {
                return Err(PipelineError::InvalidOption {
                    key: "ngram_range".to_string(),
                    reason: format!("invalid range {range:?}"),
                });
            }
            self.ngram_range = range;
        }
        Ok(())
    }
}

/// Rows are documents, columns are vocabulary indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTermMatrix {
    pub vocabulary: Vec<String>,
    pub counts: Vec<Vec<u32>>,
}

impl DocumentTermMatrix {
    pub fn n_documents(&self) -> usize {
        self.counts.len()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Result of fitting the vectorizer.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorizeOutcome {
    Trained(DocumentTermMatrix),
    /// No term survived tokenization and frequency pruning.
    EmptyVocabulary,
}

/// Bag-of-n-grams counter with an order-preserving inverse.
#[derive(Debug, Clone, Default)]
pub struct CountVectorizer {
    options: VectorizerOptions,
    vocabulary: Vec<String>,
}

impl CountVectorizer {
    pub const NAME: &'static str = "count_vect";

    pub fn new(options: VectorizerOptions) -> Self {
        Self {
            options,
            vocabulary: Vec::new(),
        }
    }

    pub fn options(&self) -> &VectorizerOptions {
        &self.options
    }

    pub fn configure(&mut self, options: &Options) -> Result<()> {
        self.options.configure(options)
    }

    /// Vocabulary learned by the last fit, in column order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Learn the vocabulary and count terms per document.
    pub fn fit_transform(&mut self, corpus: &[String]) -> VectorizeOutcome {
        self.vocabulary.clear();
        let n_docs = corpus.len();
        let analyzed: Vec<Vec<String>> = corpus.iter().map(|doc| self.analyze(doc)).collect();

        // Document frequency and total count per term
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &analyzed {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in terms {
                *term_freq.entry(term.as_str()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        let max_doc_count = self.options.max_df.upper_bound(n_docs);
        let min_doc_count = self.options.min_df.lower_bound(n_docs);
        let mut kept: Vec<(&str, usize)> = doc_freq
            .iter()
            .filter(|&(_, &df)| df >= min_doc_count && df <= max_doc_count)
            .map(|(&term, _)| (term, term_freq[term]))
            .collect();

        if let Some(limit) = self.options.max_features {
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            kept.truncate(limit);
        }

        let mut vocabulary: Vec<String> = kept.into_iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort_unstable();

        debug!(
            documents = n_docs,
            candidate_terms = doc_freq.len(),
            vocabulary = vocabulary.len(),
            max_doc_count,
            min_doc_count,
            "Vectorizer vocabulary pruned"
        );

        if vocabulary.is_empty() {
            return VectorizeOutcome::EmptyVocabulary;
        }

        let columns: BTreeMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();
        let counts = analyzed
            .iter()
            .map(|terms| {
                let mut row = vec![0u32; vocabulary.len()];
                for term in terms {
                    if let Some(&col) = columns.get(term.as_str()) {
                        row[col] += 1;
                    }
                }
                row
            })
            .collect();

        self.vocabulary = vocabulary.clone();
        VectorizeOutcome::Trained(DocumentTermMatrix { vocabulary, counts })
    }

    /// Map index lists back to terms, keeping the order given.
    pub fn inverse(&self, index_lists: &[Vec<usize>]) -> Result<Vec<Vec<String>>> {
        index_lists
            .iter()
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| {
                        self.vocabulary
                            .get(i)
                            .cloned()
                            .ok_or(PipelineError::ShapeMismatch {
                                what: "vocabulary index",
                                expected: self.vocabulary.len(),
                                found: i,
                            })
                    })
                    .collect()
            })
            .collect()
    }

    /// Tokenize and build the configured n-grams for one document.
    fn analyze(&self, doc: &str) -> Vec<String> {
        let tokens = tokenize(doc);
        let (min_n, max_n) = self.options.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n == 0 || n > tokens.len() {
                continue;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}

/// Lowercase runs of at least two word characters.
pub fn tokenize(doc: &str) -> Vec<String> {
    doc.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn corpus(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    fn trained(outcome: VectorizeOutcome) -> DocumentTermMatrix {
        match outcome {
            VectorizeOutcome::Trained(dtm) => dtm,
            VectorizeOutcome::EmptyVocabulary => panic!("expected a vocabulary"),
        }
    }

    #[test]
    fn test_tokenize_drops_single_chars() {
        assert_eq!(tokenize("A cat, b_c x!"), vec!["cat", "b_c"]);
    }

    #[test]
    fn test_counts_and_sorted_vocabulary() {
        let mut cv = CountVectorizer::default();
        let dtm = trained(cv.fit_transform(&corpus(&["chat chat sup", "chien sup"])));
        assert_eq!(dtm.vocabulary, vec!["chat", "chien", "sup"]);
        assert_eq!(dtm.counts, vec![vec![2, 0, 1], vec![0, 1, 1]]);
    }

    #[test]
    fn test_bigrams_are_space_joined() {
        let mut cv = CountVectorizer::new(VectorizerOptions {
            ngram_range: (1, 2),
            ..VectorizerOptions::default()
        });
        let dtm = trained(cv.fit_transform(&corpus(&["sup chien"])));
        assert_eq!(dtm.vocabulary, vec!["chien", "sup", "sup chien"]);
    }

    #[test]
    fn test_min_and_max_df_prune() {
        let mut cv = CountVectorizer::new(VectorizerOptions {
            max_df: DocFrequency::Fraction(0.98),
            min_df: DocFrequency::Count(2),
            ..VectorizerOptions::default()
        });
        // "sup" is in every document, "rare" in only one
        let dtm = trained(cv.fit_transform(&corpus(&[
            "sup chat rare",
            "sup chat",
            "sup chien",
            "sup chien",
        ])));
        assert_eq!(dtm.vocabulary, vec!["chat", "chien"]);
    }

    #[test]
    fn test_empty_vocabulary_is_an_outcome() {
        let mut cv = CountVectorizer::new(VectorizerOptions::topic_defaults());
        let outcome = cv.fit_transform(&corpus(&["abba", "ggbg"]));
        assert_eq!(outcome, VectorizeOutcome::EmptyVocabulary);
        assert!(cv.vocabulary().is_empty());
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut cv = CountVectorizer::new(VectorizerOptions {
            max_features: Some(2),
            ..VectorizerOptions::default()
        });
        let dtm = trained(cv.fit_transform(&corpus(&["aa aa aa bb bb cc", "dd"])));
        assert_eq!(dtm.vocabulary, vec!["aa", "bb"]);
    }

    #[test]
    fn test_inverse_keeps_given_order() {
        let mut cv = CountVectorizer::default();
        cv.fit_transform(&corpus(&["aa bb cc"]));
        let words = cv.inverse(&[vec![2, 0, 1]]).unwrap();
        assert_eq!(words, vec![vec!["cc", "aa", "bb"]]);
        assert!(cv.inverse(&[vec![3]]).is_err());
    }

    #[test]
    fn test_configure_from_options() {
        let mut options = VectorizerOptions::default();
        let params = json!({
            "max_df": 0.5,
            "min_df": 2,
            "max_features": 10,
            "ngram_range": [1, 3],
        });
        options.configure(params.as_object().unwrap()).unwrap();
        assert_eq!(options.max_df, DocFrequency::Fraction(0.5));
        assert_eq!(options.min_df, DocFrequency::Count(2));
        assert_eq!(options.max_features, Some(10));
        assert_eq!(options.ngram_range, (1, 3));

        let bad = json!({"ngram_range": [2, 1]});
        assert!(options.configure(bad.as_object().unwrap()).is_err());
        let bad = json!({"max_df": 1.5});
        assert!(options.configure(bad.as_object().unwrap()).is_err());
    }
}
