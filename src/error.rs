//! Error taxonomy shared across the crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{embedding::EmbeddingError, language::Language, speed::ReadingTimeError};

/// Boxed error returned by type-erased capabilities.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a readability score could not be computed for a text.
///
/// This is an expected outcome for empty or punctuation-only input, not a
/// failure. The analyzer reports it as
/// [`Analysis::Undefined`](crate::api::Analysis::Undefined).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedScore {
    /// The segmenter found no sentence at all.
    #[error("text contains no sentences")]
    NoSentences,
    /// Every token was a punctuation mark.
    #[error("text contains no words to score")]
    NoWords,
    /// A formula produced `NaN` or an infinity.
    #[error("score is not a finite number")]
    NonFinite,
}

/// Invalid start-up configuration. Fatal and never retried.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("unsupported language `{0}`: readability formulas are calibrated for German only")]
    UnsupportedLanguage(String),
    #[error("failed to load hyphenation dictionary for {language}: {source}")]
    Dictionary {
        language: Language,
        #[source]
        source: hyphenation::load::Error,
    },
    #[error("base reading speed must be finite and greater than zero, got {0}")]
    InvalidReadingSpeed(f64),
    #[error("invalid speed model: {0}")]
    InvalidSpeedModel(String),
    #[error("embedding capability probe failed: {0}")]
    EmbeddingProbe(#[source] EmbeddingError),
}

impl PartialEq for ConfigurationError {
    #[expect(clippy::float_cmp, reason = "speeds are echoed back unchanged")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UnsupportedLanguage(a), Self::UnsupportedLanguage(b))
            | (Self::InvalidSpeedModel(a), Self::InvalidSpeedModel(b)) => a == b,
            (Self::InvalidReadingSpeed(a), Self::InvalidReadingSpeed(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (Self::Dictionary { language: a, .. }, Self::Dictionary { language: b, .. }) => a == b,
            (Self::EmbeddingProbe(_), Self::EmbeddingProbe(_)) => true,
            _ => false,
        }
    }
}

/// Failure while analysing a single text.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("segmentation failed: {0}")]
    Segmentation(#[source] BoxError),
    #[error("hyphenation of `{word}` failed: {source}")]
    Hyphenation {
        word: String,
        #[source]
        source: BoxError,
    },
    #[error(transparent)]
    ReadingTime(#[from] ReadingTimeError),
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    #[error("an embedding was requested but no embedding capability is configured")]
    EmbeddingUnavailable,
    /// The content source produced no text; nothing was analysed.
    #[error("no content available to analyse")]
    ContentUnavailable,
}
