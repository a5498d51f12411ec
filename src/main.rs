use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use topicprep::config::Config;
use topicprep::output::terminal;
use topicprep::pipeline::steps::Pipeline;
use topicprep::pipeline::train::TextPath;
use topicprep::pipeline::traits::Transformer;
use topicprep::text::stemmer::Language;
use topicprep::topics::precomputed::PrecomputedTopicModel;

/// Topicprep: reversible text normalization for topic discovery.
///
/// Normalizes short comments (stopwords, stemming, letter n-grams), builds
/// the document-term matrix for a topic model, and turns the model's output
/// back into readable words.
#[derive(Parser)]
#[command(name = "topicprep", version, about)]
struct Cli {
    /// Stemming language (overrides TOPICPREP_LANGUAGE)
    #[arg(long, global = true)]
    language: Option<Language>,

    /// Stopword file, one word per line (overrides TOPICPREP_STOPWORDS_PATH)
    #[arg(long, global = true)]
    stopwords: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print each document after stopword removal and stemming
    Normalize {
        /// Corpus file, one document per line
        corpus: PathBuf,

        /// Use the letter n-gram path instead of stemming
        #[arg(long)]
        letters: bool,
    },

    /// Build the document-term matrix (JSON), falling back to letters if needed
    Vectorize {
        /// Corpus file, one document per line
        corpus: PathBuf,
    },

    /// Turn precomputed topic model output into readable topics
    Present {
        /// Corpus file, one document per line
        corpus: PathBuf,

        /// JSON file with `doc_topic` and `topic_term` matrices
        model: PathBuf,

        /// Print JSON instead of the colored report
        #[arg(long)]
        json: bool,
    },

    /// Print the active stopword list
    Stopwords,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("topicprep=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(language) = cli.language {
        config.language = language;
    }
    if let Some(path) = cli.stopwords {
        config.stopwords_path = Some(path);
    }

    match cli.command {
        Commands::Normalize { corpus, letters } => {
            let docs = load_corpus(&corpus)?;
            let stopwords = config.stopwords()?;
            let mut pipeline = if letters {
                Pipeline::letters(stopwords)
            } else {
                Pipeline::words(stopwords, config.language)
            };
            let normalized = pipeline.fit_transform(&docs)?;
            terminal::display_normalized(&docs, &normalized);
        }

        Commands::Vectorize { corpus } => {
            let docs = load_corpus(&corpus)?;
            let mut trainer = config.trainer()?;
            let prepared = trainer.prepare(&docs)?;
            println!("{}", serde_json::to_string_pretty(&prepared)?);
        }

        Commands::Present {
            corpus,
            model,
            json,
        } => {
            let docs = load_corpus(&corpus)?;
            let mut model = PrecomputedTopicModel::from_file(&model)
                .with_context(|| format!("Failed to load topic model from {}", model.display()))?;
            // The model file decides how many topics there are
            config.n_topics = model.n_topics();

            let mut trainer = config.trainer()?;
            let trained = trainer.train(&docs, &mut model)?;
            info!(path = trained.path.as_str(), topics = trained.n_topics(), "Presented topics");

            if json {
                println!("{}", serde_json::to_string_pretty(&trained)?);
            } else {
                terminal::display_topics(&trained);
                terminal::display_groups(&trained);
                if trained.path == TextPath::Letters {
                    println!(
                        "\n{}",
                        "Tip: letter topics usually mean the corpus is too small or too varied."
                            .dimmed()
                    );
                }
            }
        }

        Commands::Stopwords => {
            let stopwords = config.stopwords()?;
            for word in stopwords.sorted() {
                println!("{word}");
            }
            println!("{}", format!("{} stopwords", stopwords.len()).dimmed());
        }
    }

    Ok(())
}

/// Read a corpus file: one document per line, blank lines skipped.
fn load_corpus(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus {}", path.display()))?;
    let docs: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if docs.is_empty() {
        anyhow::bail!("Corpus {} has no documents", path.display());
    }
    Ok(docs)
}
