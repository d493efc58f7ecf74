//! Readability statistics and the two German readability formulas.
//!
//! [`TextStatistics`] is collected once from a [`SentenceSet`] and a
//! syllable counter. Both formulas read the same statistics:
//!
//! - Flesch reading ease (German calibration):
//!   `180 - ASL - 58.5 * ASW`, higher is easier.
//! - Wiener Sachtextformel (first variant), a school-grade estimate, higher is
//!   harder.
//!
//! `ASL` counts punctuation tokens, while all per-word rates use the
//! non-punctuation words only. Inputs without sentences or words yield an
//! [`UndefinedScore`] instead of a division by zero.

use serde::{Deserialize, Serialize};

use crate::{
    api::Readability,
    error::UndefinedScore,
    text::{SentenceSet, char_len},
};

const FLESCH_BASE: f64 = 180.0;
const FLESCH_SYLLABLE_WEIGHT: f64 = 58.5;

const WIENER_MANY_SYLLABLES: f64 = 0.1935;
const WIENER_SENTENCE_LENGTH: f64 = 0.1672;
const WIENER_LONG_WORDS: f64 = 0.1297;
const WIENER_ONE_SYLLABLE: f64 = 0.0327;
const WIENER_OFFSET: f64 = 0.875;

/// Words with at least this many syllables count as polysyllabic.
const MANY_SYLLABLES: usize = 3;
/// Words with more characters than this count as long.
const LONG_WORD_CHARS: usize = 6;

/// Syllable and length data for one non-punctuation word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStats {
    pub syllables: usize,
    pub chars: usize,
}

/// Counts gathered from one segmentation.
///
/// # Examples
///
/// ```
/// use reading_time::readability::{TextStatistics, WordStats};
///
/// let stats = TextStatistics::new(1, 3, vec![
///     WordStats { syllables: 1, chars: 3 },
///     WordStats { syllables: 2, chars: 5 },
/// ]);
/// let ease = stats.flesch_ease().unwrap();
/// assert!((ease - (180.0 - 3.0 - 58.5 * 1.5)).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub sentence_count: usize,
    /// Tokens across all sentences, punctuation included.
    pub token_count: usize,
    pub words: Vec<WordStats>,
}

impl TextStatistics {
    #[must_use]
    pub fn new(sentence_count: usize, token_count: usize, words: Vec<WordStats>) -> Self {
        Self {
            sentence_count,
            token_count,
            words,
        }
    }

    /// Gather statistics, asking `syllables` for the syllable count of every
    /// non-punctuation word. Punctuation tokens never reach `syllables`.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `syllables`.
    pub fn collect<F, E>(sentences: &SentenceSet, mut syllables: F) -> Result<Self, E>
    where
        F: FnMut(&str) -> Result<usize, E>,
    {
        let words = sentences
            .words()
            .map(|word| {
                syllables(word).map(|count| WordStats {
                    syllables: count.max(1),
                    chars: char_len(word),
                })
            })
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Self::new(
            sentences.sentence_count(),
            sentences.token_count(),
            words,
        ))
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Average tokens per sentence.
    ///
    /// # Errors
    ///
    /// Returns [`UndefinedScore::NoSentences`] when there is no sentence.
    #[expect(clippy::float_arithmetic, reason = "average of counts")]
    #[expect(clippy::cast_precision_loss, reason = "token counts fit in f64")]
    pub fn average_sentence_length(&self) -> Result<f64, UndefinedScore> {
        if self.sentence_count == 0 {
            return Err(UndefinedScore::NoSentences);
        }
        Ok(self.token_count as f64 / self.sentence_count as f64)
    }

    /// Average syllables per non-punctuation word.
    ///
    /// # Errors
    ///
    /// Returns [`UndefinedScore::NoWords`] when every token is punctuation.
    #[expect(clippy::float_arithmetic, reason = "average of counts")]
    #[expect(clippy::cast_precision_loss, reason = "syllable counts fit in f64")]
    pub fn average_syllables_per_word(&self) -> Result<f64, UndefinedScore> {
        let total: usize = self.words.iter().map(|w| w.syllables).sum();
        Ok(total as f64 / self.nonzero_word_count()?)
    }

    /// German Flesch reading ease.
    ///
    /// # Errors
    ///
    /// Returns an [`UndefinedScore`] for texts without sentences or words, or
    /// if the result is not finite.
    #[expect(clippy::float_arithmetic, reason = "readability formula")]
    pub fn flesch_ease(&self) -> Result<f64, UndefinedScore> {
        let asl = self.average_sentence_length()?;
        let asw = self.average_syllables_per_word()?;
        finite(FLESCH_BASE - asl - FLESCH_SYLLABLE_WEIGHT * asw)
    }

    /// First Wiener Sachtextformel.
    ///
    /// # Errors
    ///
    /// Returns an [`UndefinedScore`] for texts without sentences or words, or
    /// if the result is not finite.
    #[expect(clippy::float_arithmetic, reason = "readability formula")]
    pub fn wiener_index(&self) -> Result<f64, UndefinedScore> {
        let asl = self.average_sentence_length()?;
        let many = self.rate(|w| w.syllables >= MANY_SYLLABLES)?;
        let one = self.rate(|w| w.syllables == 1)?;
        let long = self.rate(|w| w.chars > LONG_WORD_CHARS)?;
        finite(
            WIENER_MANY_SYLLABLES * many * 100.0 + WIENER_SENTENCE_LENGTH * asl
                + WIENER_LONG_WORDS * long * 100.0
                - WIENER_ONE_SYLLABLE * one * 100.0
                - WIENER_OFFSET,
        )
    }

    /// Both scores at once.
    ///
    /// # Errors
    ///
    /// Returns the first [`UndefinedScore`] hit by either formula.
    pub fn readability(&self) -> Result<Readability, UndefinedScore> {
        Ok(Readability {
            flesch_ease: self.flesch_ease()?,
            wiener_index: self.wiener_index()?,
        })
    }

    /// Fraction of words matching `predicate`.
    #[expect(clippy::float_arithmetic, reason = "fraction of counts")]
    #[expect(clippy::cast_precision_loss, reason = "word counts fit in f64")]
    fn rate(&self, predicate: impl Fn(&WordStats) -> bool) -> Result<f64, UndefinedScore> {
        let matching = self.words.iter().filter(|w| predicate(w)).count();
        Ok(matching as f64 / self.nonzero_word_count()?)
    }

    #[expect(clippy::cast_precision_loss, reason = "word counts fit in f64")]
    fn nonzero_word_count(&self) -> Result<f64, UndefinedScore> {
        match self.words.len() {
            0 => Err(UndefinedScore::NoWords),
            n => Ok(n as f64),
        }
    }
}

fn finite(value: f64) -> Result<f64, UndefinedScore> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(UndefinedScore::NonFinite)
    }
}
