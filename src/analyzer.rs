//! The readability and reading-time pipeline.
//!
//! An [`Analyzer`] is the context object built once at start-up. It owns the
//! language, the capabilities and the speed model, and is shared read-only by
//! every analysis call. Per call, the text is segmented exactly once and every
//! statistic, score and embedding is derived from that one segmentation.

use std::sync::Arc;

use crate::{
    api::{AnalyzeOptions, Analysis, Prediction, ReadabilityFn, Trace},
    classification::classify,
    config::AnalyzerSettings,
    embedding::EmbeddingAggregator,
    error::{AnalyzeError, ConfigurationError, UndefinedScore},
    language::Language,
    providers::{
        ErasedProcessor, TextProcessor,
        segmenter::RegexSegmenter,
        syllables::{HyphenationCache, StandardHyphenator},
    },
    readability::TextStatistics,
    speed::{ReadingTimeError, SpeedAdjustment, is_usable_speed, predict_reading_time},
    text::SentenceSet,
};

/// Readability analyzer for one configured language.
///
/// # Examples
///
/// ```
/// use reading_time::{Analyzer, AnalyzeOptions, Classification, ReadabilityFn};
///
/// let analyzer = Analyzer::builder().build().unwrap();
/// let analysis = analyzer
///     .analyze("Der Hund läuft. Die Katze schläft.", &AnalyzeOptions::default())
///     .unwrap();
/// let prediction = analysis.prediction().unwrap();
/// assert_eq!(prediction.classification, Classification::VeryEasy);
/// assert!(prediction.embedding.is_none());
/// ```
pub struct Analyzer {
    language: Language,
    base_reading_speed: f64,
    segmenter: Box<dyn ErasedProcessor<SentenceSet>>,
    syllables: Box<dyn ErasedProcessor<Vec<String>>>,
    speed: Arc<dyn SpeedAdjustment>,
    embedding: Option<EmbeddingAggregator>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("language", &self.language)
            .field("base_reading_speed", &self.base_reading_speed)
            .field("embedding", &self.embedding)
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::default()
    }

    /// Build an analyzer with the default capabilities for `settings`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the settings are invalid or the
    /// hyphenation dictionary cannot be loaded.
    pub fn new(settings: AnalyzerSettings) -> Result<Self, ConfigurationError> {
        Self::builder().with_settings(settings).build()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn base_reading_speed(&self) -> f64 {
        self.base_reading_speed
    }

    /// Dimensionality of the configured embedding capability, if any.
    #[must_use]
    pub fn embedding_dimension(&self) -> Option<usize> {
        self.embedding.as_ref().map(EmbeddingAggregator::dimension)
    }

    /// Analyse text produced by a content source.
    ///
    /// `None` means the source had nothing to offer. It is refused instead of
    /// being analysed as an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::ContentUnavailable`] for `None`, otherwise the
    /// errors of [`ReadabilityFn::analyze`].
    pub fn analyze_content(
        &self,
        content: Option<&str>,
        options: &AnalyzeOptions,
    ) -> Result<Analysis, AnalyzeError> {
        let text = content.ok_or(AnalyzeError::ContentUnavailable)?;
        self.analyze(text, options)
    }

    /// Summed embedding of the words in `text`.
    ///
    /// Text without words yields a zero vector.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::EmbeddingUnavailable`] if no embedding
    /// capability is configured, or a segmentation or embedding error.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, AnalyzeError> {
        let aggregator = self
            .embedding
            .as_ref()
            .ok_or(AnalyzeError::EmbeddingUnavailable)?;
        let sentences = self.segment(text)?;
        Ok(aggregator.aggregate(sentences.words())?)
    }

    fn segment(&self, text: &str) -> Result<SentenceSet, AnalyzeError> {
        self.segmenter
            .process_erased(text)
            .map_err(AnalyzeError::Segmentation)
    }

    fn measure(&self, text: &str) -> Result<(SentenceSet, TextStatistics), AnalyzeError> {
        let sentences = self.segment(text)?;
        let statistics = TextStatistics::collect(&sentences, |word| {
            self.syllables
                .process_erased(word)
                .map(|fragments| fragments.len())
                .map_err(|source| AnalyzeError::Hyphenation {
                    word: word.to_owned(),
                    source,
                })
        })?;
        tracing::debug!(
            sentences = statistics.sentence_count,
            tokens = statistics.token_count,
            words = statistics.word_count(),
            "collected text statistics"
        );
        Ok((sentences, statistics))
    }

    fn check_options(&self, options: &AnalyzeOptions) -> Result<f64, AnalyzeError> {
        let base = options
            .base_reading_speed
            .unwrap_or(self.base_reading_speed);
        if !is_usable_speed(base) {
            return Err(ReadingTimeError::InvalidBaseSpeed(base).into());
        }
        if options.want_embedding && self.embedding.is_none() {
            return Err(AnalyzeError::EmbeddingUnavailable);
        }
        Ok(base)
    }

    fn evaluate(
        &self,
        sentences: &SentenceSet,
        statistics: &TextStatistics,
        base_speed: f64,
        want_embedding: bool,
    ) -> Result<Analysis, AnalyzeError> {
        let readability = match statistics.readability() {
            Ok(readability) => readability,
            Err(reason) => {
                tracing::debug!(%reason, "score undefined");
                return Ok(Analysis::Undefined { reason });
            }
        };
        let classification = classify(readability.flesch_ease);
        let time = match predict_reading_time(
            statistics.token_count,
            self.speed.as_ref(),
            base_speed,
            readability.flesch_ease,
        ) {
            Ok(time) => time,
            Err(ReadingTimeError::NonFinite { word_count, speed }) => {
                tracing::debug!(word_count, speed, "reading time not finite");
                return Ok(Analysis::Undefined {
                    reason: UndefinedScore::NonFinite,
                });
            }
            Err(err) => return Err(err.into()),
        };
        let embedding = match (&self.embedding, want_embedding) {
            (Some(aggregator), true) => Some(aggregator.aggregate(sentences.words())?),
            (None, true) => return Err(AnalyzeError::EmbeddingUnavailable),
            (_, false) => None,
        };
        tracing::debug!(
            flesch_ease = readability.flesch_ease,
            wiener_index = readability.wiener_index,
            %classification,
            minutes = time.minutes(),
            "text scored"
        );
        Ok(Analysis::Scored(Prediction {
            flesch_ease: readability.flesch_ease,
            wiener_index: readability.wiener_index,
            classification,
            reading_time_seconds: time.seconds(),
            embedding,
        }))
    }
}

impl ReadabilityFn for Analyzer {
    type Error = AnalyzeError;

    fn analyze(&self, text: &str, options: &AnalyzeOptions) -> Result<Analysis, Self::Error> {
        let base = self.check_options(options)?;
        let (sentences, statistics) = self.measure(text)?;
        self.evaluate(&sentences, &statistics, base, options.want_embedding)
    }

    fn trace(&self, text: &str) -> Result<Trace, Self::Error> {
        let (sentences, statistics) = self.measure(text)?;
        let analysis = self.evaluate(&sentences, &statistics, self.base_reading_speed, false)?;
        Ok(Trace {
            text: text.to_owned(),
            statistics,
            analysis,
        })
    }
}

/// Assembles an [`Analyzer`], substituting default capabilities for the ones
/// not supplied.
#[derive(Default)]
pub struct AnalyzerBuilder {
    settings: AnalyzerSettings,
    segmenter: Option<Box<dyn ErasedProcessor<SentenceSet>>>,
    syllables: Option<Box<dyn ErasedProcessor<Vec<String>>>>,
    speed: Option<Arc<dyn SpeedAdjustment>>,
    embedding: Option<Box<dyn ErasedProcessor<Box<[f32]>>>>,
    cache: Option<HyphenationCache>,
}

impl std::fmt::Debug for AnalyzerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerBuilder")
            .field("settings", &self.settings)
            .field("embedding", &self.embedding.is_some())
            .finish_non_exhaustive()
    }
}

impl AnalyzerBuilder {
    #[must_use]
    pub fn with_settings(mut self, settings: AnalyzerSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.settings.language = language;
        self
    }

    #[must_use]
    pub fn with_base_reading_speed(mut self, speed: f64) -> Self {
        self.settings.base_reading_speed = speed;
        self
    }

    /// Replace the default [`RegexSegmenter`].
    #[must_use]
    pub fn with_segmenter<P>(mut self, segmenter: P) -> Self
    where
        P: TextProcessor<Output = SentenceSet> + Send + Sync + 'static,
    {
        self.segmenter = Some(Box::new(segmenter));
        self
    }

    /// Replace the default [`StandardHyphenator`]. The number of fragments
    /// returned per word is its syllable count.
    #[must_use]
    pub fn with_syllables<P>(mut self, estimator: P) -> Self
    where
        P: TextProcessor<Output = Vec<String>> + Send + Sync + 'static,
    {
        self.syllables = Some(Box::new(estimator));
        self
    }

    /// Override the speed model from the settings.
    #[must_use]
    pub fn with_speed<S>(mut self, speed: S) -> Self
    where
        S: SpeedAdjustment + 'static,
    {
        self.speed = Some(Arc::new(speed));
        self
    }

    /// Enable embeddings. The provider is probed in [`Self::build`].
    #[must_use]
    pub fn with_embedding<P>(mut self, provider: P) -> Self
    where
        P: TextProcessor<Output = Box<[f32]>> + Send + Sync + 'static,
    {
        self.embedding = Some(Box::new(provider));
        self
    }

    /// Share a hyphenation cache with other analyzers.
    ///
    /// Only the default [`StandardHyphenator`] uses the cache. It is ignored
    /// when [`Self::with_syllables`] supplies another estimator.
    #[must_use]
    pub fn with_cache(mut self, cache: HyphenationCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Validate the settings, load missing capabilities and probe the
    /// embedding provider.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] on invalid settings, a missing
    /// dictionary or a failed embedding probe.
    pub fn build(self) -> Result<Analyzer, ConfigurationError> {
        let settings = self.settings.validate()?;
        let speed = match self.speed {
            Some(speed) => speed,
            None => settings.speed.build()?,
        };
        let syllables: Box<dyn ErasedProcessor<Vec<String>>> = match (self.syllables, self.cache)
        {
            (Some(estimator), cache) => {
                if cache.is_some() {
                    tracing::debug!("custom syllable estimator set, hyphenation cache unused");
                }
                estimator
            }
            (None, cache) => Box::new(StandardHyphenator::with_cache(
                settings.language,
                cache.unwrap_or_default(),
            )?),
        };
        let segmenter: Box<dyn ErasedProcessor<SentenceSet>> = match self.segmenter {
            Some(segmenter) => segmenter,
            None => Box::new(RegexSegmenter),
        };
        let embedding = self
            .embedding
            .map(EmbeddingAggregator::from_boxed)
            .transpose()
            .map_err(ConfigurationError::EmbeddingProbe)?;
        tracing::info!(
            language = %settings.language,
            base_reading_speed = settings.base_reading_speed,
            embedding = embedding.is_some(),
            "analyzer ready"
        );
        Ok(Analyzer {
            language: settings.language,
            base_reading_speed: settings.base_reading_speed,
            segmenter,
            syllables,
            speed,
            embedding,
        })
    }
}
