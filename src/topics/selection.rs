// Top-word truncation for topic descriptions.
//
// A topic ranks the whole vocabulary, but only a handful of words are worth
// showing. Small vocabularies keep about half of their words; large ones keep
// about the square root, with a smooth hand-over between the two:
//
//   y = floor(w * (x / 2) + (1 - w) * sqrt(x) + 0.5),  w = 1.05^-x
//
// w fades from 1 to 0 with a half-life near x = 4. y never decreases as x
// grows, so a bigger vocabulary never shows fewer words.

/// Decay base of the half-to-square-root transition.
const TRANSITION_BASE: f64 = 1.05;

/// How many top words to keep for a vocabulary of `vocabulary_size` words.
pub fn top_word_count(vocabulary_size: usize) -> usize {
    let x = vocabulary_size as f64;
    let w = TRANSITION_BASE.powf(-x);
    let y = w * (x / 2.0) + (1.0 - w) * x.sqrt() + 0.5;
    // Never more than we have, even if float rounding disagrees
    (y.floor() as usize).min(vocabulary_size)
}

/// Truncate a ranked (best first) list to its top words.
pub fn select_top_words<T>(ranked: &[T]) -> &[T] {
    &ranked[..top_word_count(ranked.len())]
}

/// Term indices ordered by descending weight. Equal weights keep the lower
/// index first.
pub fn rank_terms(weights: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));
    order
}
