// Training orchestration with the letter-level fallback.
//
// 1. Normalize the corpus on words (stopwords -> stemmer) and vectorize.
// 2. If no vocabulary survives, normalize on letters (stopwords -> letter
//    n-grams) and vectorize again.
// 3. Hand the matrix to the topic model.
// 4. Turn each topic's ranked term indices back into readable words:
//    truncate, map indices to terms, undo the normalization, pair with
//    weights, split 1-grams from n-grams.
// 5. Pick a representative document per topic.
//
// The fallback decision is an explicit match on `VectorizeOutcome`; nothing
// here relies on catching a failure from the word path.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::options::{get_f64, route_params, Options};
use super::steps::Pipeline;
use super::traits::Transformer;
use crate::error::{PipelineError, Result};
use crate::text::stemmer::Language;
use crate::text::stopwords::StopwordSet;
use crate::topics::linking::{link, partition, WordWeight};
use crate::topics::representative::representative_documents;
use crate::topics::selection::{rank_terms, select_top_words};
use crate::topics::traits::TopicModel;
use crate::vectorize::count::{CountVectorizer, DocumentTermMatrix, VectorizeOutcome, VectorizerOptions};

/// Step name carrying topic model parameters (`lda__n_components`).
pub const MODEL_STEP: &str = "lda";

/// Which normalization produced the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPath {
    Words,
    Letters,
}

impl TextPath {
    pub fn as_str(self) -> &'static str {
        match self {
            TextPath::Words => "words",
            TextPath::Letters => "letters",
        }
    }
}

/// A vectorized corpus and the path that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prepared {
    pub path: TextPath,
    pub matrix: DocumentTermMatrix,
}

/// Everything a trained run produces, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedTopics {
    pub path: TextPath,
    /// documents x topics
    pub doc_topic: Vec<Vec<f64>>,
    /// Top words per topic, best first
    pub topics: Vec<Vec<WordWeight>>,
    pub onegrams: Vec<Vec<WordWeight>>,
    pub ngrams: Vec<Vec<WordWeight>>,
    /// Most representative source document per topic
    pub representatives: Vec<String>,
}

impl TrainedTopics {
    pub fn n_topics(&self) -> usize {
        self.topics.len()
    }
}

/// Runs the word path, falls back to letters, and describes the topics.
pub struct Trainer {
    words: Pipeline,
    letters: Pipeline,
    vectorizer_options: VectorizerOptions,
    n_topics: usize,
    fitted: Option<(TextPath, CountVectorizer)>,
}

impl Trainer {
    pub fn new(stopwords: StopwordSet, language: Language) -> Self {
        Self {
            words: Pipeline::words(stopwords.clone(), language),
            letters: Pipeline::letters(stopwords),
            vectorizer_options: VectorizerOptions::topic_defaults(),
            n_topics: 2,
            fitted: None,
        }
    }

    pub fn with_n_topics(mut self, n_topics: usize) -> Self {
        self.n_topics = n_topics;
        self
    }

    pub fn with_vectorizer(mut self, options: VectorizerOptions) -> Self {
        self.vectorizer_options = options;
        self
    }

    pub fn n_topics(&self) -> usize {
        self.n_topics
    }

    pub fn pipeline(&self, path: TextPath) -> &Pipeline {
        match path {
            TextPath::Words => &self.words,
            TextPath::Letters => &self.letters,
        }
    }

    pub fn pipeline_mut(&mut self, path: TextPath) -> &mut Pipeline {
        match path {
            TextPath::Words => &mut self.words,
            TextPath::Letters => &mut self.letters,
        }
    }

    /// Apply flat `step__option` parameters. Normalization steps are
    /// configured on whichever pipelines contain them; `count_vect__*` goes
    /// to the vectorizer and `lda__n_components` sets the topic count.
    pub fn configure(&mut self, params: &Options) -> Result<()> {
        for (step, options) in route_params(params)? {
            match step.as_str() {
                CountVectorizer::NAME => self.vectorizer_options.configure(&options)?,
                MODEL_STEP => self.configure_model(&options)?,
                _ => {
                    let in_words = self.words.configure_step(&step, &options)?;
                    let in_letters = self.letters.configure_step(&step, &options)?;
                    if !in_words && !in_letters {
                        return Err(PipelineError::UnknownStep(step));
                    }
                }
            }
        }
        Ok(())
    }

    fn configure_model(&mut self, options: &Options) -> Result<()> {
        super::options::ensure_known(MODEL_STEP, options, &["n_components"])?;
        if let Some(n) = get_f64(options, "n_components")? {
            if n < 1.0 || n.fract() != 0.0 {
                return Err(PipelineError::InvalidOption {
                    key: "n_components".to_string(),
                    reason: format!("expected a positive integer, got {n}"),
                });
            }
            self.n_topics = n as usize;
        }
        Ok(())
    }

    /// Normalize and vectorize, falling back to letters on an empty
    /// vocabulary. Fitted state from a previous call is discarded.
    pub fn prepare(&mut self, corpus: &[String]) -> Result<Prepared> {
        if corpus.is_empty() {
            return Err(PipelineError::EmptyCorpus);
        }
        self.fitted = None;

        for path in [TextPath::Words, TextPath::Letters] {
            let pipeline = self.pipeline_mut(path);
            pipeline.reset();
            let normalized = pipeline.fit_transform(corpus)?;

            let mut vectorizer = CountVectorizer::new(self.vectorizer_options.clone());
            match vectorizer.fit_transform(&normalized) {
                VectorizeOutcome::Trained(matrix) => {
                    info!(
                        path = path.as_str(),
                        documents = matrix.n_documents(),
                        terms = matrix.n_terms(),
                        "Corpus vectorized"
                    );
                    self.fitted = Some((path, vectorizer));
                    return Ok(Prepared { path, matrix });
                }
                VectorizeOutcome::EmptyVocabulary => {
                    warn!(path = path.as_str(), "No vocabulary left after normalization");
                }
            }
        }

        Err(PipelineError::EmptyVocabulary)
    }

    /// Turn topic-term weights into readable top words per topic.
    pub fn describe(&self, topic_term: &[Vec<f64>]) -> Result<Vec<Vec<WordWeight>>> {
        let (path, vectorizer) = self.fitted.as_ref().ok_or(PipelineError::NotFitted)?;
        let n_terms = vectorizer.vocabulary().len();

        let mut top_indices: Vec<Vec<usize>> = Vec::with_capacity(topic_term.len());
        let mut top_weights: Vec<Vec<f64>> = Vec::with_capacity(topic_term.len());
        for row in topic_term {
            if row.len() != n_terms {
                return Err(PipelineError::ShapeMismatch {
                    what: "topic-term columns vs vocabulary",
                    expected: n_terms,
                    found: row.len(),
                });
            }
            let ranked = rank_terms(row);
            let top = select_top_words(&ranked).to_vec();
            top_weights.push(top.iter().map(|&i| row[i]).collect());
            top_indices.push(top);
        }

        let terms = vectorizer.inverse(&top_indices)?;
        let readable = self.pipeline(*path).inverse_transform(&terms);
        link(&readable, &top_weights)
    }

    /// Full run: prepare, fit the model, describe topics, pick
    /// representative documents.
    pub fn train(&mut self, corpus: &[String], model: &mut dyn TopicModel) -> Result<TrainedTopics> {
        let prepared = self.prepare(corpus)?;

        let fit = model.fit(&prepared.matrix, self.n_topics)?;
        if fit.n_topics() != self.n_topics {
            return Err(PipelineError::ShapeMismatch {
                what: "fitted topics",
                expected: self.n_topics,
                found: fit.n_topics(),
            });
        }
        fit.validate(corpus.len(), prepared.matrix.n_terms())?;

        let topics = self.describe(&fit.topic_term)?;
        let groups = partition(&topics);
        let representatives = representative_documents(corpus, &fit.doc_topic)?;

        info!(
            path = prepared.path.as_str(),
            topics = topics.len(),
            "Topics described"
        );

        Ok(TrainedTopics {
            path: prepared.path,
            doc_topic: fit.doc_topic,
            topics,
            onegrams: groups.onegrams,
            ngrams: groups.ngrams,
            representatives,
        })
    }
}
