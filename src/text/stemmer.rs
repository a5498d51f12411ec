// Stemming with a frequency-weighted reverse index.
//
// Stemming is many-to-one ("chat", "chats" -> "chat"), so it cannot be undone
// exactly. While fitting, every (stem, surface form) pair is counted; the
// inverse transform then answers with the surface form that produced the
// stem most often. Ties go to whichever surface form was seen first.
//
// The index is corpus-wide: a stem resolves to the most frequent surface
// form across all fitted documents, not per document.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::fold::{fold_and_lowercase, split_surface_words};
use crate::error::{PipelineError, Result, UnseenStemWarning};
use crate::pipeline::options::{ensure_known, get_str, Options};
use crate::pipeline::traits::Transformer;

/// Languages with a Snowball stemmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    Danish,
    Dutch,
    English,
    Finnish,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Romanian,
    Russian,
    Spanish,
    Swedish,
    Tamil,
    Turkish,
}

impl Language {
    pub const ALL: [Language; 18] = [
        Language::Arabic,
        Language::Danish,
        Language::Dutch,
        Language::English,
        Language::Finnish,
        Language::French,
        Language::German,
        Language::Greek,
        Language::Hungarian,
        Language::Italian,
        Language::Norwegian,
        Language::Portuguese,
        Language::Romanian,
        Language::Russian,
        Language::Spanish,
        Language::Swedish,
        Language::Tamil,
        Language::Turkish,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Arabic => "arabic",
            Language::Danish => "danish",
            Language::Dutch => "dutch",
            Language::English => "english",
            Language::Finnish => "finnish",
            Language::French => "french",
            Language::German => "german",
            Language::Greek => "greek",
            Language::Hungarian => "hungarian",
            Language::Italian => "italian",
            Language::Norwegian => "norwegian",
            Language::Portuguese => "portuguese",
            Language::Romanian => "romanian",
            Language::Russian => "russian",
            Language::Spanish => "spanish",
            Language::Swedish => "swedish",
            Language::Tamil => "tamil",
            Language::Turkish => "turkish",
        }
    }

    fn algorithm(self) -> Algorithm {
        match self {
            Language::Arabic => Algorithm::Arabic,
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::Finnish => Algorithm::Finnish,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Greek => Algorithm::Greek,
            Language::Hungarian => Algorithm::Hungarian,
            Language::Italian => Algorithm::Italian,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Romanian => Algorithm::Romanian,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
            Language::Tamil => Algorithm::Tamil,
            Language::Turkish => Algorithm::Turkish,
        }
    }
}

impl FromStr for Language {
    type Err = PipelineError;

    fn from_str(tag: &str) -> Result<Self> {
        let tag = tag.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == tag)
            .ok_or(PipelineError::UnsupportedLanguage(tag))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a surface form was first recorded. Ordered by fit call, then
/// document, then token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FirstSeen {
    generation: u64,
    document: usize,
    token: usize,
}

#[derive(Debug, Clone, Copy)]
struct SurfaceCount {
    count: u64,
    first_seen: FirstSeen,
}

/// Stem -> surface form -> occurrence count.
///
/// Counts only ever increase; `reset` is the only way to forget.
#[derive(Debug, Clone, Default)]
pub struct ReverseStemIndex {
    entries: HashMap<String, HashMap<String, SurfaceCount>>,
    generations: u64,
}

impl ReverseStemIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct stems.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many times `surface` produced `stem` during fitting.
    pub fn count(&self, stem: &str, surface: &str) -> u64 {
        self.entries
            .get(stem)
            .and_then(|surfaces| surfaces.get(surface))
            .map_or(0, |entry| entry.count)
    }

    /// Surface forms recorded for a stem, most frequent first
    /// (ties in first-seen order).
    pub fn surfaces(&self, stem: &str) -> Vec<(&str, u64)> {
        let Some(surfaces) = self.entries.get(stem) else {
            return Vec::new();
        };
        let mut ranked: Vec<(&String, &SurfaceCount)> = surfaces.iter().collect();
        ranked.sort_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        ranked
            .into_iter()
            .map(|(surface, entry)| (surface.as_str(), entry.count))
            .collect()
    }

    /// The most frequent surface form for a stem.
    pub fn best_surface(&self, stem: &str) -> Option<&str> {
        self.entries
            .get(stem)?
            .iter()
            .max_by(|(_, a), (_, b)| {
                a.count
                    .cmp(&b.count)
                    .then_with(|| b.first_seen.cmp(&a.first_seen))
            })
            .map(|(surface, _)| surface.as_str())
    }

    /// Forget everything learned so far.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.generations = 0;
    }

    fn begin_fit(&mut self) -> u64 {
        let generation = self.generations;
        self.generations += 1;
        generation
    }

    fn record(&mut self, stem: &str, surface: &str, at: FirstSeen) {
        let entry = self
            .entries
            .entry(stem.to_string())
            .or_default()
            .entry(surface.to_string())
            .or_insert(SurfaceCount {
                count: 0,
                first_seen: at,
            });
        entry.count += 1;
        entry.first_seen = entry.first_seen.min(at);
    }

    /// Fold another index into this one: counts add, the earliest
    /// first-seen position wins. Commutative, so partial indexes built on
    /// different threads can be merged in any order.
    fn merge(&mut self, other: ReverseStemIndex) {
        for (stem, surfaces) in other.entries {
            let target = self.entries.entry(stem).or_default();
            for (surface, theirs) in surfaces {
                target
                    .entry(surface)
                    .and_modify(|ours| {
                        ours.count += theirs.count;
                        ours.first_seen = ours.first_seen.min(theirs.first_seen);
                    })
                    .or_insert(theirs);
            }
        }
    }
}

/// Snowball stemmer that remembers how to go back.
pub struct Stemmer {
    language: Language,
    algorithm: rust_stemmers::Stemmer,
    index: ReverseStemIndex,
}

impl fmt::Debug for Stemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stemmer")
            .field("language", &self.language)
            .field("stems", &self.index.len())
            .finish()
    }
}

impl Default for Stemmer {
    fn default() -> Self {
        Self::new(Language::French)
    }
}

impl Stemmer {
    pub const NAME: &'static str = "stemmer";

    pub fn new(language: Language) -> Self {
        Self {
            language,
            algorithm: rust_stemmers::Stemmer::create(language.algorithm()),
            index: ReverseStemIndex::new(),
        }
    }

    /// Build a stemmer from a language tag such as "french".
    pub fn from_tag(tag: &str) -> Result<Self> {
        Ok(Self::new(tag.parse()?))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn index(&self) -> &ReverseStemIndex {
        &self.index
    }

    /// Clear the reverse index.
    pub fn reset(&mut self) {
        self.index.reset();
    }

    /// Stem a single document: punctuation becomes spacing, each word is
    /// folded and stemmed, stems are joined with single spaces.
    pub fn stem_document(&self, doc: &str) -> String {
        self.stem_pairs(doc)
            .into_iter()
            .map(|(_, stem)| stem)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn stem_pairs<'d>(&self, doc: &'d str) -> Vec<(&'d str, String)> {
        split_surface_words(doc)
            .into_iter()
            .map(|surface| {
                let folded = fold_and_lowercase(surface);
                let stem = self.algorithm.stem(&folded).into_owned();
                (surface, stem)
            })
            .collect()
    }

    /// Resolve one stem to its most frequent surface form.
    pub fn find_surface(&self, stem: &str) -> std::result::Result<&str, UnseenStemWarning> {
        self.index.best_surface(stem).ok_or_else(|| UnseenStemWarning {
            stem: stem.to_string(),
        })
    }

    /// Resolve a pseudo-token. Multi-word tokens (vectorizer n-grams) are
    /// resolved word by word; unseen stems become empty strings.
    pub fn resolve(&self, token: &str) -> String {
        if token.contains(' ') {
            return token
                .split(' ')
                .map(|part| self.resolve(part))
                .collect::<Vec<_>>()
                .join(" ");
        }

        match self.find_surface(token) {
            Ok(surface) => surface.to_string(),
            Err(warning) => {
                warn!(stem = %warning.stem, "{warning}");
                String::new()
            }
        }
    }
}

impl Transformer for Stemmer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn configure(&mut self, options: &Options) -> Result<()> {
        ensure_known(Self::NAME, options, &["language"])?;
        if let Some(tag) = get_str(options, "language")? {
            let language: Language = tag.parse()?;
            if language != self.language {
                // Stems from another language would never be looked up again
                debug!(from = %self.language, to = %language, "Switching stemmer language");
                *self = Self::new(language);
            }
        }
        Ok(())
    }

    /// Stem the corpus and count every (stem, surface form) pair.
    ///
    /// Documents are stemmed in parallel into per-worker partial indexes,
    /// which are then merged into this stemmer's index.
    fn fit(&mut self, corpus: &[String]) -> Result<()> {
        let generation = self.index.begin_fit();

        let partials: Vec<ReverseStemIndex> = {
            let this = &*self;
            corpus
                .par_iter()
                .enumerate()
                .fold(ReverseStemIndex::new, |mut partial, (document, doc)| {
                    for (token, (surface, stem)) in this.stem_pairs(doc).into_iter().enumerate() {
                        let at = FirstSeen {
                            generation,
                            document,
                            token,
                        };
                        partial.record(&stem, surface, at);
                    }
                    partial
                })
                .collect()
        };

        for partial in partials {
            self.index.merge(partial);
        }

        info!(
            language = %self.language,
            documents = corpus.len(),
            stems = self.index.len(),
            "Fitted stemmer reverse index"
        );
        Ok(())
    }

    fn reset(&mut self) {
        self.index.reset();
    }

    fn transform(&self, corpus: &[String]) -> Result<Vec<String>> {
        Ok(corpus.par_iter().map(|doc| self.stem_document(doc)).collect())
    }

    fn inverse_transform(&self, token_lists: &[Vec<String>]) -> Vec<Vec<String>> {
        token_lists
            .iter()
            .map(|tokens| tokens.iter().map(|token| self.resolve(token)).collect())
            .collect()
    }
}
