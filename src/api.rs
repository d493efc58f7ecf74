use serde::{Deserialize, Serialize};

use crate::{classification::Classification, error::UndefinedScore, readability::TextStatistics};

/// The two readability scores of a text.
///
/// Both come from the same statistics but neither implies the other:
/// `flesch_ease` grows as text gets easier, `wiener_index` grows as it gets
/// harder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    pub flesch_ease: f64,
    pub wiener_index: f64,
}

/// Scores, label and reading time for a text with a defined score.
///
/// `embedding` is `None` unless it was requested. It is never a zero vector
/// standing in for "not computed".
///
/// # Examples
///
/// ```
/// use reading_time::api::Prediction;
/// use reading_time::Classification;
///
/// let p = Prediction {
///     flesch_ease: 95.0,
///     wiener_index: 1.2,
///     classification: Classification::VeryEasy,
///     reading_time_seconds: 3.5,
///     embedding: None,
/// };
/// let json = serde_json::to_value(&p).unwrap();
/// assert_eq!(json["classification"], "very easy");
/// assert!(json["embedding"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub flesch_ease: f64,
    pub wiener_index: f64,
    pub classification: Classification,
    pub reading_time_seconds: f64,
    pub embedding: Option<Vec<f32>>,
}

/// Outcome of analysing one text.
///
/// An undefined score is a normal outcome for empty or punctuation-only
/// input, so it is a variant here and not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis {
    Scored(Prediction),
    Undefined { reason: UndefinedScore },
}

impl Analysis {
    #[must_use]
    pub fn prediction(&self) -> Option<&Prediction> {
        match self {
            Self::Scored(prediction) => Some(prediction),
            Self::Undefined { .. } => None,
        }
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined { .. })
    }
}

/// Per-call options for [`ReadabilityFn::analyze`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    /// Baseline speed in words per minute. `None` uses the configured
    /// default.
    pub base_reading_speed: Option<f64>,
    /// Whether to compute the summed word embedding.
    pub want_embedding: bool,
}

impl AnalyzeOptions {
    #[must_use]
    pub fn with_reading_speed(mut self, speed: f64) -> Self {
        self.base_reading_speed = Some(speed);
        self
    }

    #[must_use]
    pub fn with_embedding(mut self, want: bool) -> Self {
        self.want_embedding = want;
        self
    }
}

/// Diagnostic trace for an analysis: the input, its statistics and the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub text: String,
    pub statistics: TextStatistics,
    pub analysis: Analysis,
}

/// Analyses text for readability and reading time.
pub trait ReadabilityFn {
    /// Error type returned when analysis fails.
    type Error: std::error::Error + Send + Sync;

    /// Analyse `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if a capability fails or the options are invalid. An
    /// undefined score is reported as [`Analysis::Undefined`], not as an error.
    fn analyze(&self, text: &str, options: &AnalyzeOptions) -> Result<Analysis, Self::Error>;

    /// Produce a diagnostic trace with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if trace generation fails.
    fn trace(&self, text: &str) -> Result<Trace, Self::Error>;
}
