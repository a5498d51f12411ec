// Accent folding and character classification.
//
// Stopword matching and stemming both compare words on their folded form
// ("Élève" and "eleve" are the same key), while the kept text is never folded.
// deunicode does the transliteration; this module only decides what counts
// as a letter for the scanners built on top of it.

use deunicode::{deunicode, deunicode_char};

/// Characters that, when they directly follow a removed stopword, are
/// removed along with it ("l'arbre" -> "arbre", "de chiens" -> "chiens").
pub const STOPWORD_SEPARATORS: &[char] = &['\'', '\u{2018}', '\u{2019}', ' '];

/// Fold a string to ASCII and lowercase it.
///
/// Idempotent: folding an already-folded string returns it unchanged.
pub fn fold_and_lowercase(s: &str) -> String {
    deunicode(s).to_lowercase()
}

/// How a single character behaves in a word scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Folds to exactly one ASCII letter ('a', 'É', 'ç', ...).
    Letter,
    /// Folds to nothing (combining accents). Only meaningful inside a word.
    Mark,
    /// Everything else: spaces, punctuation, digits, symbols.
    Boundary,
}

/// Classify a character by its folded form.
///
/// ASCII is classified directly: deunicode folds control characters such as
/// '\t' and '\n' to nothing, and they must still end a word.
pub fn classify(c: char) -> CharClass {
    if c.is_ascii() {
        return if c.is_ascii_alphabetic() {
            CharClass::Letter
        } else {
            CharClass::Boundary
        };
    }

    let Some(folded) = deunicode_char(c) else {
        return CharClass::Boundary;
    };

    let mut chars = folded.chars();
    match (chars.next(), chars.next()) {
        (None, _) => CharClass::Mark,
        (Some(f), None) if f.is_ascii_alphabetic() => CharClass::Letter,
        _ => CharClass::Boundary,
    }
}

/// True if the character is dropped together with a preceding stopword.
pub fn is_stopword_separator(c: char) -> bool {
    STOPWORD_SEPARATORS.contains(&c)
}

/// Replace every ASCII punctuation character with a space and split on
/// whitespace. Returns the surface words in order.
pub fn split_surface_words(doc: &str) -> Vec<&str> {
    doc.split(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_strips_accents_and_case() {
        assert_eq!(fold_and_lowercase("Élève Ça"), "eleve ca");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify('a'), CharClass::Letter);
        assert_eq!(classify('É'), CharClass::Letter);
        assert_eq!(classify('ç'), CharClass::Letter);
        assert_eq!(classify(' '), CharClass::Boundary);
        assert_eq!(classify('-'), CharClass::Boundary);
        assert_eq!(classify('7'), CharClass::Boundary);
        assert_eq!(classify('\t'), CharClass::Boundary);
        assert_eq!(classify('\n'), CharClass::Boundary);
        assert_eq!(classify('\r'), CharClass::Boundary);
        assert_eq!(classify('\u{a0}'), CharClass::Boundary);
        // Folds to two letters, so it cannot be part of a single-letter scan
        assert_eq!(classify('æ'), CharClass::Boundary);
    }

    #[test]
    fn test_split_surface_words() {
        assert_eq!(split_surface_words("super-chien"), vec!["super", "chien"]);
        assert_eq!(
            split_surface_words("  Combien   chiens? "),
            vec!["Combien", "chiens"]
        );
        assert!(split_surface_words("...").is_empty());
    }
}
