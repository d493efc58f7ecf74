//! Readability scoring and reading-time prediction for German text.
//! Re-exports public types and traits.

pub mod analyzer;
pub mod api;
pub mod classification;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod language;
pub mod providers;
pub mod readability;
pub mod speed;
pub mod text;

pub use analyzer::{Analyzer, AnalyzerBuilder};
pub use api::{AnalyzeOptions, Analysis, Prediction, Readability, ReadabilityFn, Trace};
pub use classification::{Classification, classify};
#[cfg(feature = "cli")]
pub use cli::ReadtimeArgs;
pub use config::{AnalyzerSettings, ExponentialSpeedConfig, SpeedConfig};
pub use embedding::{EmbeddingAggregator, EmbeddingError};
pub use error::{AnalyzeError, ConfigurationError, UndefinedScore};
pub use language::Language;
#[cfg(feature = "provider-api")]
pub use providers::{
    api_embedding::{ApiEmbedding, ApiEmbeddingError},
    content::HttpContentExtractor,
};
pub use providers::{
    EmbeddingProvider, Segmenter, SyllableEstimator, TextProcessor,
    segmenter::RegexSegmenter,
    syllables::{HyphenationCache, StandardHyphenator},
};
pub use readability::TextStatistics;
pub use speed::{
    ExponentialAdjustment, ReadingTime, SpeedAdjustment, Unadjusted, predict_reading_time,
};
pub use text::SentenceSet;

#[cfg(test)]
mod tests;
