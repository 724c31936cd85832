//! The transform stage library.
//!
//! Three of the five stages are regex substitutions and share
//! [`Substitute`]; counting and the sentence metric have their own types.

use super::stage::{Accumulator, TransformStage};
use crate::domain::{Repeat, Symbol};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::borrow::Cow;

static LINE_ENDINGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n]+").expect("Valid line ending regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Valid whitespace regex"));

// ASCII only: `\d` would also match other scripts' digits.
static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9]+").expect("Valid alphanumeric regex"));

/// Removes every carriage return and line feed.
pub fn strip_line_endings(text: &str) -> Cow<'_, str> {
    Substitute::line_endings().apply(text)
}

/// Collapses each run of whitespace into one space.
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    Substitute::whitespace().apply(text)
}

/// Replaces each run of ASCII letters and digits with one space.
pub fn redact_alphanumeric(text: &str) -> Cow<'_, str> {
    Substitute::alphanumeric().apply(text)
}

/// Regex substitution stage, optionally reporting its output as redacted
/// text.
#[derive(Debug, Clone)]
pub struct Substitute {
    name: &'static str,
    pattern: &'static Regex,
    replacement: &'static str,
    reports_redacted: bool,
}

impl Substitute {
    pub fn line_endings() -> Self {
        Self {
            name: "strip-line-endings",
            pattern: &LINE_ENDINGS,
            replacement: "",
            reports_redacted: false,
        }
    }

    pub fn whitespace() -> Self {
        Self {
            name: "collapse-whitespace",
            pattern: &WHITESPACE,
            replacement: " ",
            reports_redacted: false,
        }
    }

    pub fn alphanumeric() -> Self {
        Self {
            name: "redact-alphanumeric",
            pattern: &ALPHANUMERIC,
            replacement: " ",
            reports_redacted: true,
        }
    }

    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, NoExpand(self.replacement))
    }
}

impl TransformStage for Substitute {
    fn name(&self) -> &'static str {
        self.name
    }

    fn transform(&self, chunk: String, acc: &mut Accumulator) -> String {
        let out = match self.apply(&chunk) {
            Cow::Borrowed(_) => chunk,
            Cow::Owned(replaced) => replaced,
        };
        if self.reports_redacted {
            acc.report_redacted(&out);
        }
        out
    }
}

/// Counts recognized symbols and records every match.
///
/// Aggregate runs are scanned first, then every character. A character
/// inside an aggregate run is counted again on its own, so `"!!!"` adds one
/// to `!!!` and three to `!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationCounter;

impl TransformStage for PunctuationCounter {
    fn name(&self) -> &'static str {
        "count-punctuation"
    }

    fn transform(&self, chunk: String, acc: &mut Accumulator) -> String {
        for repeat in Repeat::ALL {
            let symbol = Symbol::Repeated(repeat);
            if !acc.mapping().contains(&symbol) {
                continue;
            }

            let matches: Vec<&str> = repeat
                .pattern()
                .find_iter(&chunk)
                .map(|m| m.as_str())
                .collect();
            if !matches.is_empty() {
                acc.record_match(symbol, matches.len() as u64, &matches);
            }
        }

        for c in chunk.chars() {
            if acc.mapping().contains(&Symbol::Mark(c)) {
                acc.record_char(c);
            }
        }

        chunk
    }
}

/// Reports words and sentence terminators of each chunk.
///
/// Terminators are `.`, `?` and `!`; words are the fields between single
/// spaces, so an empty chunk still holds one word.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceMetric;

impl SentenceMetric {
    /// `(words, sentences)` of one chunk.
    pub fn measure(chunk: &str) -> (u64, u64) {
        let sentences = chunk
            .chars()
            .filter(|c| matches!(c, '.' | '?' | '!'))
            .count();
        let words = chunk.split(' ').count();
        (words as u64, sentences as u64)
    }
}

impl TransformStage for SentenceMetric {
    fn name(&self) -> &'static str {
        "sentence-metric"
    }

    fn transform(&self, chunk: String, acc: &mut Accumulator) -> String {
        let (words, sentences) = Self::measure(&chunk);
        acc.report_sentences(words, sentences);
        chunk
    }
}
