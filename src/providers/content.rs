//! Fetch a web page and extract its readable paragraphs.
//!
//! Paragraphs inside `<article>` or `<main>` are preferred; pages without
//! either fall back to every `<p>`. A page declaring a `lang` that differs
//! from the expected language yields no content, as does a page without any
//! paragraph text.

use std::{sync::LazyLock, time::Duration};

use reqwest::blocking::Client;
use scraper::{Html, Selector};
use thiserror::Error;

use crate::language::Language;

/// Default time allowed for one page download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[expect(clippy::expect_used, reason = "selector is a valid constant")]
static MAIN_PARAGRAPHS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article p, main p").expect("valid selector"));

#[expect(clippy::expect_used, reason = "selector is a valid constant")]
static ALL_PARAGRAPHS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));

#[expect(clippy::expect_used, reason = "selector is a valid constant")]
static ROOT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("html").expect("valid selector"));

/// Error returned by [`HttpContentExtractor::fetch_and_extract`].
#[derive(Debug, Error)]
pub enum ContentError {
    /// The HTTP client could not be built, or the download failed.
    #[error("failed to fetch content: {0}")]
    Request(#[from] reqwest::Error),
}

/// Downloads pages and reduces them to paragraph text.
#[derive(Debug, Clone)]
pub struct HttpContentExtractor {
    client: Client,
}

impl HttpContentExtractor {
    /// Create an extractor with [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Request`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ContentError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create an extractor with a custom download timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Request`] if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ContentError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Download `url` and extract its text.
    ///
    /// Returns `Ok(None)` when the page has no usable text or its declared
    /// language contradicts `language_hint`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Request`] if the download fails or the server
    /// answers with an error status.
    pub fn fetch_and_extract(
        &self,
        url: &str,
        language_hint: Option<Language>,
    ) -> Result<Option<String>, ContentError> {
        let html = self.client.get(url).send()?.error_for_status()?.text()?;
        let text = extract(&html, language_hint);
        if text.is_none() {
            tracing::warn!(%url, "no readable content found");
        }
        Ok(text)
    }
}

/// Extract paragraph text from an HTML document.
///
/// Paragraphs are separated by a blank line and their inner whitespace is
/// collapsed.
///
/// # Examples
///
/// ```
/// use reading_time::providers::content::extract;
///
/// let html = "<html><body><nav><p>Menü</p></nav><main><p>Der  Hund.</p></main></body></html>";
/// assert_eq!(extract(html, None).as_deref(), Some("Der Hund."));
/// ```
#[must_use]
pub fn extract(html: &str, language_hint: Option<Language>) -> Option<String> {
    let document = Html::parse_document(html);
    let mismatch = language_hint
        .zip(declared_language(&document))
        .filter(|(expected, declared)| !matches_language(declared, *expected));
    if let Some((expected, declared)) = mismatch {
        tracing::debug!(%declared, %expected, "page language does not match");
        return None;
    }
    let main = paragraphs(&document, &MAIN_PARAGRAPHS);
    let chosen = if main.is_empty() {
        paragraphs(&document, &ALL_PARAGRAPHS)
    } else {
        main
    };
    (!chosen.is_empty()).then(|| chosen.join("\n\n"))
}

fn paragraphs(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|p| p.text().collect::<String>())
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
        .collect()
}

fn declared_language(document: &Html) -> Option<String> {
    document
        .select(&ROOT)
        .next()
        .and_then(|root| root.value().attr("lang"))
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_owned)
}

fn matches_language(declared: &str, expected: Language) -> bool {
    declared
        .split(['-', '_'])
        .next()
        .is_some_and(|primary| primary.eq_ignore_ascii_case(expected.primary_subtag()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn prefers_main_content() {
        let html = r"<html><body>
            <p>Cookie-Hinweis</p>
            <article><p>Der Hund läuft.</p><p>Die   Katze
            schläft.</p></article>
        </body></html>";
        assert_eq!(
            extract(html, None).as_deref(),
            Some("Der Hund läuft.\n\nDie Katze schläft.")
        );
    }

    #[test]
    fn falls_back_to_all_paragraphs() {
        let html = "<html><body><p>Erster Absatz.</p><div><p>Zweiter.</p></div></body></html>";
        assert_eq!(
            extract(html, None).as_deref(),
            Some("Erster Absatz.\n\nZweiter.")
        );
    }

    #[rstest]
    #[case("<html><body><div>Kein Absatz</div></body></html>")]
    #[case("<html><body><p>   </p></body></html>")]
    #[case("")]
    fn no_paragraphs_is_no_content(#[case] html: &str) {
        assert_eq!(extract(html, None), None);
    }

    #[rstest]
    #[case("de", true)]
    #[case("de-AT", true)]
    #[case("DE_ch", true)]
    #[case("en", false)]
    #[case("en-GB", false)]
    fn honours_language_hint(#[case] lang: &str, #[case] accepted: bool) {
        let html = format!("<html lang=\"{lang}\"><body><p>Text.</p></body></html>");
        assert_eq!(
            extract(&html, Some(Language::German1996)).is_some(),
            accepted
        );
    }

    #[test]
    fn undeclared_language_is_accepted() {
        let html = "<html><body><p>Text.</p></body></html>";
        assert!(extract(html, Some(Language::GermanSwiss)).is_some());
    }
}
