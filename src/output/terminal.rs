// Colored terminal output for topic descriptions.
//
// main.rs delegates here for anything with colors or bars; machine-readable
// output goes through serde_json instead.

use colored::Colorize;

use crate::pipeline::train::{TextPath, TrainedTopics};
use crate::topics::linking::WordWeight;

const BAR_WIDTH: usize = 20;
const PREVIEW_CHARS: usize = 100;

/// Display every topic with its weighted words and representative document.
pub fn display_topics(trained: &TrainedTopics) {
    println!(
        "\n{}",
        format!(
            "=== {} topics ({} path, {} documents) ===",
            trained.n_topics(),
            trained.path.as_str(),
            trained.doc_topic.len()
        )
        .bold()
    );
    if trained.path == TextPath::Letters {
        println!(
            "  {}",
            "No word survived vectorization; topics are letter n-grams.".yellow()
        );
    }
    println!();

    for (i, words) in trained.topics.iter().enumerate() {
        println!("  {} {}", "Topic".bold(), (i + 1).to_string().bold());

        let max_weight = words.iter().map(|w| w.weight).fold(0.0_f64, f64::max);
        for word in words {
            println!("    {:<30} {}", word.word, weight_bar(word, max_weight));
        }

        if let Some(doc) = trained.representatives.get(i) {
            println!(
                "    {} {}",
                "e.g.".dimmed(),
                super::truncate_chars(doc, PREVIEW_CHARS).italic()
            );
        }
        println!();
    }
}

/// Display the 1-gram / n-gram split of each topic on one line each.
pub fn display_groups(trained: &TrainedTopics) {
    for (i, (onegrams, ngrams)) in trained.onegrams.iter().zip(&trained.ngrams).enumerate() {
        println!(
            "  {:>2}. {}  {}",
            i + 1,
            join_words(onegrams).bright_green(),
            join_words(ngrams).bright_blue()
        );
    }
}

/// Display normalized documents next to their source.
pub fn display_normalized(corpus: &[String], normalized: &[String]) {
    for (source, out) in corpus.iter().zip(normalized) {
        println!("  {}", super::truncate_chars(source, PREVIEW_CHARS).dimmed());
        println!("  {} {}", "->".bright_blue(), out);
    }
}

fn join_words(words: &[WordWeight]) -> String {
    words
        .iter()
        .map(|w| w.word.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bar scaled against the heaviest word in the topic, colored by share.
fn weight_bar(word: &WordWeight, max_weight: f64) -> String {
    let share = if max_weight > 0.0 {
        word.weight / max_weight
    } else {
        0.0
    };
    let filled = (share * BAR_WIDTH as f64).round() as usize;
    let bar = format!(
        "[{}{}] {:.2}",
        "=".repeat(filled.min(BAR_WIDTH)),
        " ".repeat(BAR_WIDTH.saturating_sub(filled)),
        word.weight
    );

    if share >= 0.75 {
        bar.bright_green().to_string()
    } else if share >= 0.40 {
        bar.bright_yellow().to_string()
    } else {
        bar.bright_blue().to_string()
    }
}
