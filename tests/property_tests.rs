// Property tests for the normalization and truncation invariants.
//
// Random inputs check what the example-based tests cannot enumerate: folding
// is idempotent, text without stopwords survives removal unchanged, every
// stem produced while fitting resolves to a word that produced it, letter
// tokens decode without markers, and the top-word count never decreases.

use proptest::prelude::*;

use topicprep::pipeline::traits::Transformer;
use topicprep::text::fold::fold_and_lowercase;
use topicprep::text::letters::{join_letters, split_letters};
use topicprep::text::stemmer::{Language, Stemmer};
use topicprep::text::stopwords::{remove_stopwords, StopwordSet};
use topicprep::topics::selection::top_word_count;

// ============================================================
// Folding and stopwords
// ============================================================

proptest! {
    #[test]
    fn folding_is_idempotent(s in "\\PC{0,40}") {
        let once = fold_and_lowercase(&s);
        prop_assert_eq!(fold_and_lowercase(&once), once);
    }

    #[test]
    fn text_without_stopwords_is_unchanged(
        words in prop::collection::vec("[m-zé]{2,6}", 1..8),
        separators in prop::collection::vec("[ \t\n\r,.'!?-]{1,3}", 8),
    ) {
        // Words start after 'l' and 'd', so they never equal "le" or "de"
        let mut doc = String::new();
        for (word, separator) in words.iter().zip(&separators) {
            doc.push_str(word);
            doc.push_str(separator);
        }
        let stop = StopwordSet::new(["le", "de"]);
        prop_assert_eq!(remove_stopwords(&doc, &stop), doc);
    }

    #[test]
    fn stopword_is_removed_whatever_follows(
        separator in "[ \t\n\r]",
        word in "[m-z]{2,6}",
    ) {
        let doc = format!("le{separator}{word}");
        let out = remove_stopwords(&doc, &StopwordSet::new(["le"]));
        let expected = if separator == " " {
            word.clone()
        } else {
            format!("{separator}{word}")
        };
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn removed_words_are_gone(words in prop::collection::vec("[a-z]{2,6}", 1..10)) {
        let doc = words.join(" ");
        let stop = StopwordSet::new([words[0].as_str()]);
        let out = remove_stopwords(&doc, &stop);
        prop_assert!(out.split(' ').all(|w| w != words[0]));
    }
}

// ============================================================
// Stemming round trip
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_fitted_stem_resolves(
        docs in prop::collection::vec(prop::collection::vec("[a-z]{3,8}", 1..6), 1..5)
    ) {
        let corpus: Vec<String> = docs.iter().map(|d| d.join(" ")).collect();
        let mut stemmer = Stemmer::new(Language::French);
        let stemmed = stemmer.fit_transform(&corpus).unwrap();

        for doc in &stemmed {
            for stem in doc.split(' ') {
                let surface = stemmer.find_surface(stem);
                prop_assert!(surface.is_ok(), "stem {:?} did not resolve", stem);
                let surface = surface.unwrap();
                // The answer is a word that really produced this stem
                prop_assert_eq!(stemmer.stem_document(surface), stem);
                prop_assert!(stemmer.index().count(stem, surface) > 0);
            }
        }
    }
}

// ============================================================
// Letters and truncation
// ============================================================

proptest! {
    #[test]
    fn letter_tokens_decode_without_markers(doc in "[a-z ]{0,30}") {
        let encoded = split_letters(&doc);
        prop_assert!(!encoded.contains("  "));
        for token in encoded.split(' ') {
            prop_assert!(!join_letters(token).contains('_'));
        }
    }

    #[test]
    fn top_word_count_is_monotonic(x in 0usize..50_000) {
        let y = top_word_count(x);
        prop_assert!(y <= x);
        prop_assert!(top_word_count(x + 1) >= y);
    }
}
