// Unit tests for the text normalization steps.
//
// Covers stopword removal, stemming with the reverse index, and the letter
// n-gram encoding, on a small French corpus of comments about cats and dogs.

use topicprep::pipeline::traits::Transformer;
use topicprep::text::fold::fold_and_lowercase;
use topicprep::text::letters::{join_letters, split_letters, LetterSplitter};
use topicprep::text::stemmer::{Language, Stemmer};
use topicprep::text::stopwords::{remove_stopwords, StopwordRemover, StopwordSet};

const TEST_STOPWORDS: &[&str] = &[
    "le", "les", "la", "un", "de", "a", "b", "c", "s", "est", "sur", "tres", "donc", "the", "is",
    "ya", "pis", "yer",
];

const CATS_DOGS: &[&str] = &[
    "Les chats sont super",
    "Un super-chat marche sur le trottoir",
    "Les chats sont super ronrons",
    "Un super-chien",
    "Deux super-chiens",
    "Combien de chiens?",
];

const CATS_DOGS_NO_STOPWORDS: &[&str] = &[
    "chats sont super",
    "super-chat marche trottoir",
    "chats sont super ronrons",
    "super-chien",
    "Deux super-chiens",
    "Combien chiens?",
];

const CATS_DOGS_STEMMED: &[&str] = &[
    "chat sont sup",
    "sup chat march trottoir",
    "chat sont sup ronron",
    "sup chien",
    "deux sup chien",
    "combien chien",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn test_stopwords() -> StopwordSet {
    StopwordSet::new(TEST_STOPWORDS.iter().copied())
}

// ============================================================
// Stopword removal
// ============================================================

#[test]
fn stopwords_removed_from_corpus() {
    let remover = StopwordRemover::new(test_stopwords());
    let out = remover.transform(&strings(CATS_DOGS)).unwrap();
    assert_eq!(out, strings(CATS_DOGS_NO_STOPWORDS));
}

#[test]
fn stopword_inverse_is_identity() {
    let remover = StopwordRemover::new(test_stopwords());
    let tokens = vec![vec!["chats".to_string(), "sont super".to_string()]];
    assert_eq!(remover.inverse_transform(&tokens), tokens);
}

#[test]
fn stopwords_match_accented_and_uppercase_forms() {
    let out = remove_stopwords("C'est TRÈS drôle, donc voilà", &test_stopwords());
    assert_eq!(out, "drôle, voilà");
}

#[test]
fn non_stopword_text_is_untouched() {
    let doc = "Ça marche!  (vraiment)";
    assert_eq!(remove_stopwords(doc, &test_stopwords()), doc);
}

#[test]
fn stopword_file_loads_one_word_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stopwords.txt");
    std::fs::write(&path, "le\nLes\n\n  Très \n").unwrap();
    let set = StopwordSet::from_file(&path).unwrap();
    assert_eq!(set.sorted(), vec!["le", "les", "tres"]);
}

#[test]
fn missing_stopword_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(StopwordSet::from_file(&dir.path().join("nope.txt")).is_err());
}

// ============================================================
// Stemming and the reverse index
// ============================================================

#[test]
fn stemmer_stems_french_corpus() {
    let mut stemmer = Stemmer::new(Language::French);
    let out = stemmer.fit_transform(&strings(CATS_DOGS_NO_STOPWORDS)).unwrap();
    assert_eq!(out, strings(CATS_DOGS_STEMMED));
}

#[test]
fn stemmer_restores_most_frequent_surface_forms() {
    let mut stemmer = Stemmer::new(Language::French);
    let stemmed = stemmer.fit_transform(&strings(CATS_DOGS_NO_STOPWORDS)).unwrap();

    let token_lists: Vec<Vec<String>> = stemmed
        .iter()
        .map(|doc| doc.split(' ').map(str::to_string).collect())
        .collect();
    let restored = stemmer.inverse_transform(&token_lists);

    let expected: Vec<Vec<String>> = [
        vec!["chats", "sont", "super"],
        vec!["super", "chats", "marche", "trottoir"],
        vec!["chats", "sont", "super", "ronrons"],
        vec!["super", "chiens"],
        vec!["Deux", "super", "chiens"],
        vec!["Combien", "chiens"],
    ]
    .iter()
    .map(|doc| strings(doc))
    .collect();
    assert_eq!(restored, expected);
}

#[test]
fn stemmer_restores_topic_ngrams() {
    let mut stemmer = Stemmer::new(Language::French);
    stemmer.fit(&strings(CATS_DOGS_NO_STOPWORDS)).unwrap();

    let topic = strings(&["chat", "sup", "sont sup", "sont", "chat sont", "chien", "sup chien"]);
    let restored = stemmer.inverse_transform(&[topic]);
    assert_eq!(
        restored,
        vec![strings(&[
            "chats",
            "super",
            "sont super",
            "sont",
            "chats sont",
            "chiens",
            "super chiens"
        ])]
    );
}

#[test]
fn stemmer_counts_surface_forms() {
    let mut stemmer = Stemmer::new(Language::French);
    stemmer.fit(&strings(CATS_DOGS_NO_STOPWORDS)).unwrap();
    let index = stemmer.index();
    assert_eq!(index.count("chat", "chats"), 2);
    assert_eq!(index.count("chat", "chat"), 1);
    assert_eq!(index.count("chien", "chiens"), 2);
    assert_eq!(index.count("sup", "super"), 5);
    assert_eq!(index.count("sup", "nope"), 0);
}

#[test]
fn unseen_stem_resolves_to_empty() {
    let mut stemmer = Stemmer::new(Language::French);
    stemmer.fit(&strings(CATS_DOGS_NO_STOPWORDS)).unwrap();
    assert!(stemmer.find_surface("oiseau").is_err());
    assert_eq!(stemmer.resolve("oiseau"), "");
    assert_eq!(stemmer.resolve("sup oiseau"), "super ");
}

#[test]
fn language_tags_parse_case_insensitively() {
    assert_eq!("French".parse::<Language>().unwrap(), Language::French);
    assert_eq!(" english ".parse::<Language>().unwrap(), Language::English);
    assert!("latin".parse::<Language>().is_err());
    assert!(Stemmer::from_tag("latin").is_err());
}

// ============================================================
// Letter n-grams
// ============================================================

#[test]
fn letters_encode_bigrams_then_repeated_trigrams() {
    assert_eq!(split_letters("chat"), "c ch ha at cha hat cha hat cha hat");
}

#[test]
fn letters_mark_spaces() {
    let encoded = split_letters("a bc");
    assert_eq!(encoded, "a a_ _b bc a_b _bc a_b _bc a_b _bc");
    assert!(!encoded.contains("  "));
}

#[test]
fn letters_decode_space_markers() {
    assert_eq!(join_letters("a_b"), "a b");
    let splitter = LetterSplitter;
    let decoded = splitter.inverse_transform(&[strings(&["_bc", "ha"])]);
    assert_eq!(decoded, vec![strings(&[" bc", "ha"])]);
}

#[test]
fn letter_splitter_has_no_state_to_fit() {
    let mut splitter = LetterSplitter;
    let out = splitter.fit_transform(&strings(&["abc", "ab"])).unwrap();
    assert_eq!(out, strings(&["a ab bc abc abc abc", "a ab "]));
}

// ============================================================
// Folding
// ============================================================

#[test]
fn folding_strips_accents_and_case() {
    assert_eq!(fold_and_lowercase("Élève À L'ÉCOLE"), "eleve a l'ecole");
}
