//! Segmented text shared by every stage of an analysis.
//!
//! A [`SentenceSet`] is produced once per call and reused by the scorer, the
//! reading-time predictor and the embedding aggregator so they all agree on
//! what a "word" is.

use serde::{Deserialize, Serialize};

/// Ordered sentences, each an ordered sequence of tokens.
///
/// Punctuation marks are kept as separate tokens, so [`Self::token_count`]
/// counts them while [`Self::words`] skips them.
///
/// # Examples
///
/// ```
/// use reading_time::text::SentenceSet;
///
/// let set = SentenceSet::from(vec![vec!["Hallo", "Welt", "!"]]);
/// assert_eq!(set.sentence_count(), 1);
/// assert_eq!(set.token_count(), 3);
/// assert_eq!(set.words().collect::<Vec<_>>(), vec!["Hallo", "Welt"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentenceSet {
    sentences: Vec<Vec<String>>,
}

impl SentenceSet {
    /// Wrap already segmented sentences. Empty sentences are dropped.
    #[must_use]
    pub fn new(sentences: Vec<Vec<String>>) -> Self {
        Self {
            sentences: sentences.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }

    #[must_use]
    pub fn sentences(&self) -> &[Vec<String>] {
        &self.sentences
    }

    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Number of tokens across all sentences, punctuation included.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Vec::len).sum()
    }

    /// Every token in reading order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.sentences.iter().flatten().map(String::as_str)
    }

    /// Tokens that are not punctuation marks.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tokens().filter(|t| !is_punctuation(t))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl<S: Into<String>> From<Vec<Vec<S>>> for SentenceSet {
    fn from(sentences: Vec<Vec<S>>) -> Self {
        Self::new(
            sentences
                .into_iter()
                .map(|s| s.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

/// Returns `true` when `token` contains no letter or digit.
///
/// Such tokens are never hyphenated. Runs like `...` or `?!` count as
/// punctuation too.
///
/// # Examples
///
/// ```
/// use reading_time::text::is_punctuation;
///
/// assert!(is_punctuation("..."));
/// assert!(is_punctuation("«"));
/// assert!(!is_punctuation("z.B."));
/// ```
#[must_use]
pub fn is_punctuation(token: &str) -> bool {
    !token.chars().any(char::is_alphanumeric)
}

/// Length of `word` in characters rather than bytes.
#[must_use]
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(".", true)]
    #[case("...", true)]
    #[case("?!", true)]
    #[case("–", true)]
    #[case("Hund", false)]
    #[case("2026", false)]
    #[case("d.h.", false)]
    fn classifies_punctuation(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_punctuation(token), expected);
    }

    #[test]
    fn drops_empty_sentences() {
        let set = SentenceSet::from(vec![vec![], vec!["Ja", "."], vec![]]);
        assert_eq!(set.sentence_count(), 1);
        assert_eq!(set.token_count(), 2);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(char_len("schläft"), 7);
        assert_eq!("schläft".len(), 8);
    }
}
