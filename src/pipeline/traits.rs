// Transformer trait: the composition seam of the pipeline.
//
// Every normalization step (stopwords, stemmer, letter splitter) implements
// the same four operations so the steps can be assembled into an ordered
// `Pipeline` and swapped for each other. Steps that keep no state treat
// `fit` as a no-op; steps whose transform is not reversible return their
// input from `inverse_transform`.

use super::options::Options;
use crate::error::Result;

/// A reversible, fittable corpus transform.
pub trait Transformer: Send + Sync {
    /// Step name used to route `step__option` parameters.
    fn name(&self) -> &'static str;

    /// Apply step-specific options (e.g. `language` for the stemmer).
    fn configure(&mut self, options: &Options) -> Result<()>;

    /// Learn whatever state the inverse transform needs from the corpus.
    fn fit(&mut self, corpus: &[String]) -> Result<()>;

    /// Transform every document of the corpus, preserving order.
    fn transform(&self, corpus: &[String]) -> Result<Vec<String>>;

    /// Map token lists produced downstream back toward readable text.
    fn inverse_transform(&self, token_lists: &[Vec<String>]) -> Vec<Vec<String>>;

    /// Forget fitted state. Stateless steps have nothing to forget.
    fn reset(&mut self) {}

    /// Fit on the corpus, then transform it.
    fn fit_transform(&mut self, corpus: &[String]) -> Result<Vec<String>> {
        self.fit(corpus)?;
        self.transform(corpus)
    }
}
