// Letter n-gram fallback encoding.
//
// When the word-level path leaves no usable vocabulary (short comments,
// made-up words, no repeated terms), documents are re-encoded as overlapping
// letter bigrams and trigrams. Spaces become '_' so word boundaries survive
// into the n-grams; decoding just turns them back into spaces.

use rayon::prelude::*;

use crate::error::Result;
use crate::pipeline::options::{ensure_known, Options};
use crate::pipeline::traits::Transformer;

/// Stands in for a space inside a letter n-gram.
pub const SPACE_MARKER: char = '_';

/// How many times the trigram run is repeated. Bigrams and trigrams compete
/// for the same vectorizer feature budget, so trigrams are overweighted.
pub const TRIGRAM_REPEAT: usize = 3;

/// Encode a document as space-separated letter bigrams followed by the
/// trigram run repeated `TRIGRAM_REPEAT` times.
pub fn split_letters(doc: &str) -> String {
    let mut bigrams: Vec<String> = Vec::with_capacity(doc.len());
    let mut trigrams: Vec<String> = Vec::with_capacity(doc.len());

    let mut prev2: Option<char> = None;
    let mut prev1: Option<char> = None;
    for c in doc.chars() {
        let c = if c == ' ' { SPACE_MARKER } else { c };

        let mut bigram = String::new();
        bigram.extend(prev1);
        bigram.push(c);

        let mut trigram = String::new();
        trigram.extend(prev2);
        trigram.push_str(&bigram);

        bigrams.push(bigram);
        trigrams.push(trigram);

        prev2 = prev1;
        prev1 = Some(c);
    }

    // The first two trigrams lack their leading context
    let trigrams = trigrams.get(2..).unwrap_or_default();
    let repeated: Vec<&str> = trigrams
        .iter()
        .cycle()
        .take(trigrams.len() * TRIGRAM_REPEAT)
        .map(String::as_str)
        .collect();

    format!("{} {}", bigrams.join(" "), repeated.join(" ")).replace("  ", " ")
}

/// Decode a single letter n-gram token.
pub fn join_letters(token: &str) -> String {
    token.replace(SPACE_MARKER, " ")
}

/// Pipeline step wrapping `split_letters` / `join_letters`. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterSplitter;

impl LetterSplitter {
    pub const NAME: &'static str = "letter_splitter";
}

impl Transformer for LetterSplitter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn configure(&mut self, options: &Options) -> Result<()> {
        ensure_known(Self::NAME, options, &[])
    }

    fn fit(&mut self, _corpus: &[String]) -> Result<()> {
        Ok(())
    }

    fn transform(&self, corpus: &[String]) -> Result<Vec<String>> {
        Ok(corpus.par_iter().map(|doc| split_letters(doc)).collect())
    }

    fn inverse_transform(&self, token_lists: &[Vec<String>]) -> Vec<Vec<String>> {
        token_lists
            .iter()
            .map(|tokens| tokens.iter().map(|t| join_letters(t)).collect())
            .collect()
    }
}
