// Text normalization: the reversible transforms that run before vectorization.
//
// Each transform implements the pipeline's `Transformer` trait so the word
// path (stopwords -> stemmer) and the letter path (stopwords -> letters) can
// be swapped without the caller knowing which one produced the tokens.

pub mod fold;
pub mod letters;
pub mod stemmer;
pub mod stopwords;
