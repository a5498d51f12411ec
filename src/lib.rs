// Topicprep: reversible text normalization for topic discovery
//
// This is the library root. Each module corresponds to one stage of the
// path from raw comments to readable topic descriptions.

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod text;
pub mod topics;
pub mod vectorize;
