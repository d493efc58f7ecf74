//! Punctuation-based sentence and word segmentation for German text.
//!
//! Words are matched with Unicode-aware patterns; every punctuation mark
//! becomes its own token. A sentence ends after `.`, `!`, `?`, `…` (or runs
//! of them), unless the dot belongs to a known abbreviation or initialism.
//! A lone dot after a number (`3. Oktober`) or a single letter (`z. B.`) does
//! not end a sentence, and neither does a terminator followed by a lowercase
//! word. Closing quotes and brackets directly after a terminator stay with
//! the sentence they close.

use std::{convert::Infallible, sync::LazyLock};

use regex::Regex;

use crate::{providers::TextProcessor, text::SentenceSet};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::expect_used, reason = "pattern is constant and valid")]
    Regex::new(
        r"(?x)
          (?:\p{L}\.){2,}
        | \p{N}+(?:[.,:/]\p{N}+)+
        | [\p{L}\p{N}\p{M}]+(?:['’\-][\p{L}\p{N}\p{M}]+)*
        | \.{2,}
        | [!?]+
        | [^\s\p{L}\p{N}\p{M}]
        ",
    )
    .expect("valid regex")
});

/// Abbreviations whose trailing dot does not end a sentence, lowercase.
const ABBREVIATIONS: &[&str] = &[
    "abb", "abs", "bspw", "bzw", "ca", "dr", "etc", "evtl", "fr", "ggf", "hr", "inkl", "jh",
    "kap", "max", "min", "mio", "mrd", "nr", "prof", "sog", "st", "str", "tel", "usw", "vgl",
];

const CLOSING_MARKS: &[&str] = &["\"", "'", "»", "«", "“", "”", "‘", "’", ")", "]"];

/// Regex-driven segmenter for the configured German variants.
///
/// # Examples
///
/// ```
/// use reading_time::providers::{segmenter::RegexSegmenter, TextProcessor};
///
/// let set = RegexSegmenter.process("Der Hund läuft. Die Katze schläft.").unwrap();
/// assert_eq!(set.sentence_count(), 2);
/// assert_eq!(set.token_count(), 8);
/// ```
#[derive(Default, Debug, Clone, Copy)]
pub struct RegexSegmenter;

impl TextProcessor for RegexSegmenter {
    type Output = SentenceSet;
    type Error = Infallible;

    fn process(&self, input: &str) -> Result<Self::Output, Self::Error> {
        Ok(split_sentences(tokenize(input)))
    }
}

/// Split `text` into word and punctuation tokens.
///
/// # Examples
///
/// ```
/// use reading_time::providers::segmenter::tokenize;
///
/// assert_eq!(
///     tokenize("Dr. Weber kommt, z.B. heute..."),
///     vec!["Dr.", "Weber", "kommt", ",", "z.B.", "heute", "..."]
/// );
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while let Some(m) = TOKEN_RE.find_at(text, pos) {
        let mut end = m.end();
        if is_abbreviation(m.as_str()) && text.get(end..).is_some_and(|rest| rest.starts_with('.'))
        {
            end += 1;
        }
        if let Some(token) = text.get(m.start()..end) {
            tokens.push(token.to_owned());
        }
        pos = end;
    }
    tokens
}

fn split_sentences(tokens: Vec<String>) -> SentenceSet {
    let mut sentences = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut closed = false;
    for token in tokens {
        if closed && !CLOSING_MARKS.contains(&token.as_str()) {
            if !starts_lowercase(&token) {
                sentences.push(std::mem::take(&mut current));
            }
            closed = false;
        }
        if is_terminator(&token) && !is_ordinal_or_initial(current.last(), &token) {
            closed = true;
        }
        current.push(token);
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    SentenceSet::new(sentences)
}

fn is_abbreviation(word: &str) -> bool {
    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

fn is_terminator(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| matches!(c, '.' | '!' | '?' | '…'))
}

/// A lone dot after a number or a single letter marks an ordinal, a spaced
/// abbreviation or an initial.
fn is_ordinal_or_initial(previous: Option<&String>, token: &str) -> bool {
    if token != "." {
        return false;
    }
    previous.is_some_and(|p| {
        let mut chars = p.chars();
        let single_letter =
            chars.next().is_some_and(char::is_alphabetic) && chars.next().is_none();
        single_letter || (!p.is_empty() && p.chars().all(char::is_numeric))
    })
}

fn starts_lowercase(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_lowercase)
}
