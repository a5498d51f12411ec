// Normalization pipeline: composable, reversible transformer steps.
//
// Steps are assembled into an ordered `Pipeline` and configured through flat
// `step__option` parameters. `train` drives the word path, the letter
// fallback, and the topic post-processing.

pub mod options;
pub mod steps;
pub mod train;
pub mod traits;
