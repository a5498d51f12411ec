// Ordered, named list of transformers.
//
// Fitting runs front to back, each step fitted on the previous step's
// output. Inverting runs back to front, so the last transform applied is the
// first one undone.

use tracing::debug;

use super::options::{route_params, Options};
use super::traits::Transformer;
use crate::error::{PipelineError, Result};
use crate::text::letters::LetterSplitter;
use crate::text::stemmer::{Language, Stemmer};
use crate::text::stopwords::{StopwordRemover, StopwordSet};

/// A sequence of transformers applied in order.
pub struct Pipeline {
    steps: Vec<Box<dyn Transformer>>,
}

impl Pipeline {
    pub fn new(steps: Vec<Box<dyn Transformer>>) -> Self {
        Self { steps }
    }

    /// stopwords -> stemmer
    pub fn words(stopwords: StopwordSet, language: Language) -> Self {
        Self::new(vec![
            Box::new(StopwordRemover::new(stopwords)),
            Box::new(Stemmer::new(language)),
        ])
    }

    /// stopwords -> letter_splitter
    pub fn letters(stopwords: StopwordSet) -> Self {
        Self::new(vec![
            Box::new(StopwordRemover::new(stopwords)),
            Box::new(LetterSplitter),
        ])
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Apply options to the step called `step`. Returns false if the
    /// pipeline has no such step.
    pub fn configure_step(&mut self, step: &str, options: &Options) -> Result<bool> {
        match self.steps.iter_mut().find(|s| s.name() == step) {
            Some(target) => {
                target.configure(options)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Transformer for Pipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    /// Route `step__option` parameters to their steps. Every named step must
    /// exist.
    fn configure(&mut self, params: &Options) -> Result<()> {
        for (step, options) in route_params(params)? {
            if !self.configure_step(&step, &options)? {
                return Err(PipelineError::UnknownStep(step));
            }
        }
        Ok(())
    }

    fn fit(&mut self, corpus: &[String]) -> Result<()> {
        self.fit_transform(corpus).map(|_| ())
    }

    fn transform(&self, corpus: &[String]) -> Result<Vec<String>> {
        let mut current = corpus.to_vec();
        for step in &self.steps {
            current = step.transform(&current)?;
        }
        Ok(current)
    }

    fn inverse_transform(&self, token_lists: &[Vec<String>]) -> Vec<Vec<String>> {
        let mut current = token_lists.to_vec();
        for step in self.steps.iter().rev() {
            current = step.inverse_transform(&current);
        }
        current
    }

    fn reset(&mut self) {
        for step in &mut self.steps {
            step.reset();
        }
    }

    fn fit_transform(&mut self, corpus: &[String]) -> Result<Vec<String>> {
        let mut current = corpus.to_vec();
        for step in &mut self.steps {
            current = step.fit_transform(&current)?;
            debug!(step = step.name(), documents = current.len(), "Pipeline step fitted");
        }
        Ok(current)
    }
}
