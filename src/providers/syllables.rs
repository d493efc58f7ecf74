//! Syllable estimation through pattern-based hyphenation.
//!
//! [`StandardHyphenator`] wraps the Knuth–Liang dictionaries shipped with the
//! `hyphenation` crate. Hyphenation depends on the word and the language but
//! never on the surrounding text, so results are memoised in a
//! [`HyphenationCache`] keyed by `(language, word)`.

use std::{collections::HashMap, sync::Arc};

use hyphenation::{Hyphenator, Load, Standard};
use parking_lot::RwLock;
use thiserror::Error;

use crate::{
    error::ConfigurationError, language::Language, providers::TextProcessor,
    text::is_punctuation,
};

/// Errors returned by [`StandardHyphenator`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HyphenationError {
    /// Input was empty or whitespace only.
    #[error("input cannot be empty")]
    Empty,
    /// Input was a punctuation mark, which has no syllables.
    #[error("`{0}` is not a word")]
    NotAWord(String),
}

/// Process-wide memo of hyphenations, safe for concurrent reads and inserts.
///
/// Entries are grouped by language, so one cache may be shared by
/// hyphenators for different languages without mixing results. The cache is
/// unbounded: every distinct word stays until [`Self::clear`] is called.
#[derive(Debug, Default, Clone)]
pub struct HyphenationCache {
    entries: Arc<RwLock<HashMap<Language, HashMap<String, Arc<[String]>>>>>,
}

impl HyphenationCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, language: Language, word: &str) -> Option<Arc<[String]>> {
        self.entries
            .read()
            .get(&language)
            .and_then(|words| words.get(word))
            .cloned()
    }

    /// Store `fragments` unless another caller got there first, and return
    /// the cached entry.
    pub fn insert(
        &self,
        language: Language,
        word: &str,
        fragments: Arc<[String]>,
    ) -> Arc<[String]> {
        let mut entries = self.entries.write();
        let words = entries.entry(language).or_default();
        Arc::clone(words.entry(word.to_owned()).or_insert(fragments))
    }

    /// Number of cached words across all languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Dictionary-backed syllable estimator for one language.
///
/// # Examples
///
/// ```
/// use reading_time::{Language, providers::{syllables::StandardHyphenator, TextProcessor}};
///
/// let hyphenator = StandardHyphenator::new(Language::German1996).unwrap();
/// let fragments = hyphenator.process("Hund").unwrap();
/// assert_eq!(fragments, vec!["Hund"]);
/// ```
#[derive(Clone)]
pub struct StandardHyphenator {
    language: Language,
    dictionary: Arc<Standard>,
    cache: HyphenationCache,
}

impl std::fmt::Debug for StandardHyphenator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardHyphenator")
            .field("language", &self.language)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl StandardHyphenator {
    /// Load the embedded dictionary for `language` with a private cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Dictionary`] if the embedded dictionary
    /// cannot be deserialised.
    pub fn new(language: Language) -> Result<Self, ConfigurationError> {
        Self::with_cache(language, HyphenationCache::new())
    }

    /// Load the embedded dictionary for `language`, sharing `cache`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Dictionary`] if the embedded dictionary
    /// cannot be deserialised.
    pub fn with_cache(
        language: Language,
        cache: HyphenationCache,
    ) -> Result<Self, ConfigurationError> {
        let dictionary = Standard::from_embedded(language.dictionary())
            .map_err(|source| ConfigurationError::Dictionary { language, source })?;
        tracing::debug!(language = %language, "loaded hyphenation dictionary");
        Ok(Self {
            language,
            dictionary: Arc::new(dictionary),
            cache,
        })
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn cache(&self) -> &HyphenationCache {
        &self.cache
    }

    fn hyphenate(&self, word: &str) -> Arc<[String]> {
        if let Some(hit) = self.cache.get(self.language, word) {
            return hit;
        }
        let breaks = self.dictionary.hyphenate(word).breaks;
        let fragments: Arc<[String]> = split_at_breaks(word, &breaks).into();
        self.cache.insert(self.language, word, fragments)
    }
}

impl TextProcessor for StandardHyphenator {
    type Output = Vec<String>;
    type Error = HyphenationError;

    fn process(&self, input: &str) -> Result<Self::Output, Self::Error> {
        let word = input.trim();
        if word.is_empty() {
            return Err(HyphenationError::Empty);
        }
        if is_punctuation(word) {
            return Err(HyphenationError::NotAWord(word.to_owned()));
        }
        Ok(self.hyphenate(word).to_vec())
    }
}

/// Cut `word` at the byte offsets in `breaks`.
///
/// Offsets that are out of order or not on a character boundary are skipped,
/// so the result always concatenates back to `word`.
fn split_at_breaks(word: &str, breaks: &[usize]) -> Vec<String> {
    let mut fragments = Vec::with_capacity(breaks.len() + 1);
    let mut start = 0;
    for &at in breaks {
        if at <= start {
            continue;
        }
        if let Some(fragment) = word.get(start..at) {
            fragments.push(fragment.to_owned());
            start = at;
        }
    }
    if let Some(rest) = word.get(start..) {
        fragments.push(rest.to_owned());
    }
    fragments
}
