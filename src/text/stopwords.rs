// Stopword removal that keeps the text's structure intact.
//
// Unlike a tokenize-filter-join approach, the scanner here only cuts out the
// stopwords themselves: punctuation, hyphens and spacing stay exactly where
// they were, so "Un super-chat marche sur le trottoir" becomes
// "super-chat marche trottoir". The only boundary character removed is an
// apostrophe or space directly after a removed stopword, so no dangling
// separator is left behind.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rayon::prelude::*;
use stop_words::{get, LANGUAGE};
use tracing::debug;

use super::fold::{classify, fold_and_lowercase, is_stopword_separator, CharClass};
use crate::error::{PipelineError, Result};
use crate::pipeline::options::{ensure_known, get_str_list, Options};
use crate::pipeline::traits::Transformer;

/// A set of stopwords, stored in folded (ASCII, lowercase) form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Build a set from raw words. Words are folded; blank entries are skipped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| fold_and_lowercase(w.as_ref().trim()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Load stopwords from a UTF-8 file with one word per line.
    /// Blank lines are ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| PipelineError::StopwordFile {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::new(contents.lines());
        debug!(path = %path.display(), count = set.len(), "Loaded stopword file");
        Ok(set)
    }

    /// The default mixed French/English list from the stop-words crate.
    pub fn french_english() -> Self {
        let mut words: Vec<String> = get(LANGUAGE::French);
        words.extend(get(LANGUAGE::English));
        Self::new(words)
    }

    /// Check a word against the set, folding it first.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&fold_and_lowercase(word))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The folded words in lexicographic order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

/// Remove stopwords from a single document, keeping everything else as-is.
pub fn remove_stopwords(document: &str, stopwords: &StopwordSet) -> String {
    let mut scanner = Scanner::new(stopwords, document.len());
    for c in document.chars() {
        scanner.push(c);
    }
    scanner.finish()
}

/// Single-pass scanner. Characters flow from the input into either the word
/// being built or the pending punctuation run, and from there into `output`.
struct Scanner<'a> {
    stopwords: &'a StopwordSet,
    output: String,
    pending_punctuation: String,
    current_word: String,
}

impl<'a> Scanner<'a> {
    fn new(stopwords: &'a StopwordSet, capacity: usize) -> Self {
        Self {
            stopwords,
            output: String::with_capacity(capacity),
            pending_punctuation: String::new(),
            current_word: String::new(),
        }
    }

    fn push(&mut self, c: char) {
        match classify(c) {
            CharClass::Letter => self.current_word.push(c),
            CharClass::Mark if !self.current_word.is_empty() => self.current_word.push(c),
            _ => self.close_word(Some(c)),
        }
    }

    /// Handle a boundary. `None` is the end of input, which closes the last
    /// word exactly like a trailing punctuation mark would.
    fn close_word(&mut self, boundary: Option<char>) {
        if self.current_word.is_empty() {
            self.pending_punctuation.extend(boundary);
            return;
        }

        let mut boundary = boundary;
        self.output.push_str(&self.pending_punctuation);
        self.pending_punctuation.clear();

        if self.stopwords.contains(&self.current_word) {
            if boundary.is_some_and(is_stopword_separator) {
                boundary = None;
            }
        } else {
            self.output.push_str(&self.current_word);
        }

        self.current_word.clear();
        self.pending_punctuation.extend(boundary);
    }

    fn finish(mut self) -> String {
        self.close_word(None);
        self.output.push_str(&self.pending_punctuation);
        self.output
    }
}

/// Pipeline step wrapping `remove_stopwords`.
#[derive(Debug, Clone)]
pub struct StopwordRemover {
    stopwords: StopwordSet,
}

impl StopwordRemover {
    pub const NAME: &'static str = "stopwords";

    pub fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }
}

impl Default for StopwordRemover {
    fn default() -> Self {
        Self::new(StopwordSet::french_english())
    }
}

impl Transformer for StopwordRemover {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn configure(&mut self, options: &Options) -> Result<()> {
        ensure_known(Self::NAME, options, &["stopwords"])?;
        if let Some(words) = get_str_list(options, "stopwords")? {
            self.stopwords = StopwordSet::new(words);
        }
        Ok(())
    }

    fn fit(&mut self, _corpus: &[String]) -> Result<()> {
        Ok(())
    }

    fn transform(&self, corpus: &[String]) -> Result<Vec<String>> {
        Ok(corpus
            .par_iter()
            .map(|doc| remove_stopwords(doc, &self.stopwords))
            .collect())
    }

    fn inverse_transform(&self, token_lists: &[Vec<String>]) -> Vec<Vec<String>> {
        token_lists.to_vec()
    }
}
