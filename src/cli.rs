//! CLI argument types, layered configuration and the entry point of the
//! `readtime` binary.
//! Loads from CLI args, environment (prefix `READTIME_`), and optional config
//! files.

use std::{
    io::{Read, Write},
    path::PathBuf,
};

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use ortho_config::OrthoError;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    analyzer::Analyzer,
    api::{AnalyzeOptions, Analysis, ReadabilityFn},
    config::{AnalyzerSettings, SpeedConfig},
    error::{AnalyzeError, ConfigurationError},
    language::Language,
    providers::{
        api_embedding::{ApiEmbedding, ApiEmbeddingError},
        content::{ContentError, HttpContentExtractor},
    },
    speed::DEFAULT_READING_SPEED,
};

/// Environment variable holding the log filter, in `EnvFilter` syntax.
pub const LOG_ENV: &str = "READTIME_LOG";

/// Printed instead of scores when a text cannot be scored.
pub const UNDEFINED_MESSAGE: &str = "statistics unavailable for this input";

/// Command-line arguments for the `readtime` binary.
///
/// Values are loaded from command line arguments, environment variables
/// (prefixed with `READTIME_`), and an optional configuration file. Text is
/// read from `--text`, downloaded from `--url`, or taken from stdin.
///
/// # Examples
///
/// Parse flags directly:
/// ```
/// use reading_time::cli::ReadtimeArgs;
/// use ortho_config::OrthoConfig;
///
/// let args = ReadtimeArgs::load_from_iter(["readtime", "--json=true"])
///     .expect("load args from CLI iterator");
/// assert!(args.json);
/// ```
///
/// Load from a configuration file:
/// ```
/// use reading_time::cli::ReadtimeArgs;
/// use ortho_config::OrthoConfig;
/// use std::io::Write;
/// use tempfile::NamedTempFile;
///
/// let mut file = NamedTempFile::new().expect("create temp file");
/// writeln!(file, "reading_speed = 250.0").expect("write config");
/// let path = file.path().to_str().expect("path str");
/// let args = ReadtimeArgs::load_from_iter(["readtime", "--config-path", path])
///     .expect("load args from config path");
/// assert_eq!(args.reading_speed, Some(250.0));
/// ```
#[derive(Debug, Deserialize, ortho_config::OrthoConfig)]
#[ortho_config(prefix = "READTIME")]
pub struct ReadtimeArgs {
    /// Text to analyse.
    #[serde(default)]
    pub text: Option<String>,

    /// Web page whose paragraphs are analysed.
    #[serde(default)]
    pub url: Option<String>,

    /// Baseline reading speed in words per minute (default 200).
    #[serde(default)]
    pub reading_speed: Option<f64>,

    /// Text language, e.g. `de_DE` (default), `de-1901` or `de_CH`.
    #[serde(default)]
    pub language: Option<String>,

    /// Speed model: `exponential` (default) or `constant`.
    #[serde(default)]
    pub speed_strategy: Option<String>,

    /// Include the summed word embedding.
    #[ortho_config(default = false)]
    #[serde(default)]
    pub embed: bool,

    /// Endpoint of the embedding API, required with `--embed`.
    #[serde(default)]
    pub embedding_url: Option<String>,

    /// Bearer token for the embedding API.
    #[serde(default)]
    pub embedding_api_key: Option<String>,

    /// Print the analysis as JSON.
    #[ortho_config(default = false)]
    #[serde(default)]
    pub json: bool,

    /// Print the statistics behind the scores as JSON.
    #[ortho_config(default = false)]
    #[serde(default)]
    pub trace: bool,

    /// Optional path to a configuration file.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl ReadtimeArgs {
    /// Load configuration solely from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if any variable cannot be parsed.
    pub fn load_from_env() -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Env::prefixed("READTIME_"))
            .extract()
            .map_err(Into::into)
    }

    /// Load configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if the file cannot be read or parsed.
    pub fn load_from_config(path: &str) -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Toml::file(path))
            .extract()
            .map_err(Into::into)
    }

    /// Load configuration from environment variables and a file path.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if either source contains invalid values.
    pub fn load_from_env_and_config(path: &str) -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("READTIME_"))
            .extract()
            .map_err(Into::into)
    }

    /// Analyzer settings described by these arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] for an unsupported language, an
    /// unknown speed strategy or an unusable reading speed.
    pub fn settings(&self) -> Result<AnalyzerSettings, ConfigurationError> {
        let language = match &self.language {
            Some(code) => code.parse()?,
            None => Language::default(),
        };
        let speed = match self.speed_strategy.as_deref().map(str::trim) {
            None | Some("exponential") => SpeedConfig::default(),
            Some("constant") => SpeedConfig::Constant,
            Some(other) => {
                return Err(ConfigurationError::InvalidSpeedModel(format!(
                    "unknown speed strategy `{other}`"
                )));
            }
        };
        AnalyzerSettings {
            language,
            base_reading_speed: self.reading_speed.unwrap_or(DEFAULT_READING_SPEED),
            speed,
        }
        .validate()
    }
}

/// Errors reported by [`run`].
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Embedding(#[from] ApiEmbeddingError),
    #[error("--embed requires --embedding-url")]
    MissingEmbeddingUrl,
    #[error("--text and --url are mutually exclusive")]
    ConflictingInput,
    #[error("failed to read or write: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Install a stderr `tracing` subscriber filtered by [`LOG_ENV`].
///
/// Safe to call more than once.
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Analyse the text selected by `args` and write the report to `out`.
///
/// `input` is read only when neither `--text` nor `--url` is given.
///
/// # Errors
///
/// Returns a [`CliError`] for invalid configuration, unavailable content or a
/// failed analysis. An undefined score is not an error.
pub fn run(args: &ReadtimeArgs, input: &mut impl Read, out: &mut impl Write) -> Result<(), CliError> {
    let settings = args.settings()?;
    let analyzer = build_analyzer(args, settings)?;
    let content = load_content(args, settings.language, input)?;

    if args.trace {
        let text = content.ok_or(AnalyzeError::ContentUnavailable)?;
        let trace = analyzer.trace(&text)?;
        serde_json::to_writer_pretty(&mut *out, &trace)?;
        writeln!(out)?;
        return Ok(());
    }

    let options = AnalyzeOptions::default().with_embedding(args.embed);
    let analysis = analyzer.analyze_content(content.as_deref(), &options)?;
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &analysis)?;
        writeln!(out)?;
    } else {
        write_report(&analysis, out)?;
    }
    Ok(())
}

fn build_analyzer(args: &ReadtimeArgs, settings: AnalyzerSettings) -> Result<Analyzer, CliError> {
    let mut builder = Analyzer::builder().with_settings(settings);
    if args.embed {
        let url = args
            .embedding_url
            .as_deref()
            .ok_or(CliError::MissingEmbeddingUrl)?;
        builder = builder.with_embedding(ApiEmbedding::new(url, args.embedding_api_key.clone())?);
    }
    Ok(builder.build()?)
}

fn load_content(
    args: &ReadtimeArgs,
    language: Language,
    input: &mut impl Read,
) -> Result<Option<String>, CliError> {
    match (&args.text, &args.url) {
        (Some(_), Some(_)) => Err(CliError::ConflictingInput),
        (Some(text), None) => Ok(Some(text.clone())),
        (None, Some(url)) => {
            tracing::info!(%url, "fetching content");
            Ok(HttpContentExtractor::new()?.fetch_and_extract(url, Some(language))?)
        }
        (None, None) => {
            let mut text = String::new();
            input.read_to_string(&mut text)?;
            Ok(Some(text))
        }
    }
}

fn write_report(analysis: &Analysis, out: &mut impl Write) -> std::io::Result<()> {
    match analysis {
        Analysis::Undefined { reason } => writeln!(out, "{UNDEFINED_MESSAGE} ({reason})"),
        Analysis::Scored(prediction) => {
            writeln!(
                out,
                "Classification: {} ({})",
                prediction.classification,
                prediction.classification.german_label()
            )?;
            writeln!(out, "Flesch reading ease: {:.2}", prediction.flesch_ease)?;
            writeln!(out, "Wiener index: {:.2}", prediction.wiener_index)?;
            writeln!(out, "Reading time: {:.0} s", prediction.reading_time_seconds)?;
            if let Some(embedding) = &prediction.embedding {
                writeln!(out, "Embedding: {} dimensions", embedding.len())?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn args() -> ReadtimeArgs {
        ReadtimeArgs {
            text: None,
            url: None,
            reading_speed: None,
            language: None,
            speed_strategy: None,
            embed: false,
            embedding_url: None,
            embedding_api_key: None,
            json: false,
            trace: false,
            config_path: None,
        }
    }

    fn run_to_string(args: &ReadtimeArgs, stdin: &str) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(args, &mut stdin.as_bytes(), &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[rstest]
    fn defaults_resolve_to_german_exponential(args: ReadtimeArgs) {
        assert_eq!(args.settings(), Ok(AnalyzerSettings::default()));
    }

    #[rstest]
    #[case(Some("en"), None, None)]
    #[case(None, Some("linear"), None)]
    #[case(None, None, Some(-5.0))]
    fn invalid_settings_are_rejected(
        mut args: ReadtimeArgs,
        #[case] language: Option<&str>,
        #[case] strategy: Option<&str>,
        #[case] speed: Option<f64>,
    ) {
        args.language = language.map(str::to_owned);
        args.speed_strategy = strategy.map(str::to_owned);
        args.reading_speed = speed;
        assert!(args.settings().is_err());
    }

    #[rstest]
    fn reads_stdin_when_no_text_given(args: ReadtimeArgs) {
        let report = run_to_string(&args, "Der Hund läuft. Die Katze schläft.")
            .unwrap_or_else(|e| panic!("run: {e}"));
        assert!(report.starts_with("Classification: very easy (Sehr leicht)"));
        assert!(report.contains("Reading time: "));
    }

    #[rstest]
    fn undefined_score_is_reported(mut args: ReadtimeArgs) {
        args.text = Some("...".into());
        let report = run_to_string(&args, "").unwrap_or_else(|e| panic!("run: {e}"));
        assert!(report.starts_with(UNDEFINED_MESSAGE));
    }

    #[rstest]
    fn json_output_is_an_analysis(mut args: ReadtimeArgs) {
        args.text = Some("Der Hund läuft.".into());
        args.json = true;
        let report = run_to_string(&args, "").unwrap_or_else(|e| panic!("run: {e}"));
        let analysis: Analysis =
            serde_json::from_str(&report).unwrap_or_else(|e| panic!("parse json: {e}"));
        let prediction = analysis
            .prediction()
            .unwrap_or_else(|| panic!("expected a score"));
        assert!(prediction.embedding.is_none());
    }

    #[rstest]
    fn trace_output_lists_statistics(mut args: ReadtimeArgs) {
        args.text = Some("Der Hund läuft.".into());
        args.trace = true;
        let report = run_to_string(&args, "").unwrap_or_else(|e| panic!("run: {e}"));
        let json: serde_json::Value =
            serde_json::from_str(&report).unwrap_or_else(|e| panic!("parse json: {e}"));
        assert_eq!(json["statistics"]["sentence_count"], 1);
        assert_eq!(json["statistics"]["token_count"], 4);
    }

    #[rstest]
    fn embed_requires_url(mut args: ReadtimeArgs) {
        args.text = Some("Hund".into());
        args.embed = true;
        assert!(matches!(
            run_to_string(&args, ""),
            Err(CliError::MissingEmbeddingUrl)
        ));
    }

    #[rstest]
    fn text_and_url_conflict(mut args: ReadtimeArgs) {
        args.text = Some("Hund".into());
        args.url = Some("http://localhost/".into());
        assert!(matches!(
            run_to_string(&args, ""),
            Err(CliError::ConflictingInput)
        ));
    }
}
