//! Regex heuristics shared by the style model builder and the reviewer.
//!
//! Sentence splitting differs between the two phases: the builder splits each
//! chunk on bare `.`/`!`/`?`, the reviewer splits the whole text after terminal
//! punctuation followed by whitespace. Both feed the same word counter.

use std::sync::LazyLock;

use regex::Regex;

/// `\b\w+\b` word tokens, used for term frequencies and terminology checks.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());

/// `\w+` runs, used for sentence length.
static WORD_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Auxiliary verb directly followed by an `-ed` token.
static PASSIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(is|was|were|be|been|being)\b\s+\w+ed\b").unwrap()
});

static CHUNK_SENTENCE_DELIM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]").unwrap());

/// Terminal punctuation plus the whitespace run that ends a sentence.
static SENTENCE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Iterates word tokens in their original casing.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    WORD_RE.find_iter(text).map(|m| m.as_str())
}

/// Number of `\w+` runs in `text`.
pub fn sentence_word_count(text: &str) -> usize {
    WORD_RUN_RE.find_iter(text).count()
}

pub fn is_passive(text: &str) -> bool {
    PASSIVE_RE.is_match(text)
}

/// Splits a chunk on `.`, `!` and `?`, dropping blank fragments.
pub fn chunk_sentences(chunk: &str) -> impl Iterator<Item = &str> {
    CHUNK_SENTENCE_DELIM_RE
        .split(chunk)
        .filter(|s| !s.trim().is_empty())
}

/// Splits free text into sentences, keeping the terminal punctuation on the
/// sentence and discarding the whitespace after it.
///
/// Mirrors a `(?<=[.!?])\s+` split: a trailing break yields a final empty
/// piece, and text without any break comes back as a single piece.
pub fn review_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK_RE.find_iter(text) {
        // The punctuation is a single ASCII byte.
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&text[start..]);
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_keep_original_case() {
        let found: Vec<_> = words("The Colour, the colour!").collect();
        assert_eq!(found, vec!["The", "Colour", "the", "colour"]);
    }

    #[test]
    fn test_sentence_word_count_ignores_punctuation() {
        assert_eq!(sentence_word_count("Press the button, then wait."), 5);
        assert_eq!(sentence_word_count("  ...  "), 0);
    }

    #[test]
    fn test_passive_detects_auxiliary_plus_ed() {
        assert!(is_passive("The button was pressed."));
        assert!(is_passive("Filters WERE REPLACED yearly"));
        assert!(is_passive("It has been installed"));
    }

    #[test]
    fn test_passive_requires_adjacent_ed_token() {
        assert!(!is_passive("Press the button."));
        assert!(!is_passive("This was a pressing matter"));
        // "this" must not count as "is".
        assert!(!is_passive("Install this updated driver"));
    }

    #[test]
    fn test_chunk_sentences_split_on_bare_punctuation() {
        let parts: Vec<_> = chunk_sentences("One two. Three! Four? ").collect();
        assert_eq!(parts, vec!["One two", " Three", " Four"]);
    }

    #[test]
    fn test_chunk_sentences_split_decimals() {
        // Build-time splitting is punctuation-only, so "1.5" breaks in two.
        let parts: Vec<_> = chunk_sentences("Set it to 1.5 volts").collect();
        assert_eq!(parts, vec!["Set it to 1", "5 volts"]);
    }

    #[test]
    fn test_review_sentences_keep_delimiters() {
        let parts = review_sentences("First one. Second one!  Third?");
        assert_eq!(parts, vec!["First one.", "Second one!", "Third?"]);
    }

    #[test]
    fn test_review_sentences_trailing_break_yields_empty_piece() {
        let parts = review_sentences("Done. ");
        assert_eq!(parts, vec!["Done.", ""]);
    }

    #[test]
    fn test_review_sentences_does_not_split_decimals() {
        let parts = review_sentences("Set it to 1.5 volts. Then wait.");
        assert_eq!(parts, vec!["Set it to 1.5 volts.", "Then wait."]);
    }

    #[test]
    fn test_review_sentences_empty_text() {
        assert_eq!(review_sentences(""), vec![""]);
    }
}
