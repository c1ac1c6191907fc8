//! Reading-time estimation.
//!
//! Two callers feed text in: full records (every textual field) and the older
//! single-string path. Both share one tokenizer, but they disagree on what a
//! word is: records need a letter or digit to survive punctuation stripping,
//! raw strings only need something to survive. The difference is carried by
//! [`WordRule`] so the two paths keep producing the counts they always have.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parser::normalize::normalize;
use crate::record::ContentRecord;

static LEADING_PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{P}+").unwrap());
static TRAILING_PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{P}+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordRule {
    /// Token must keep at least one alphanumeric char after punctuation is stripped.
    RequireAlphanumeric,
    /// Token must merely be non-empty after punctuation is stripped.
    NonEmpty,
}

/// Anything that can hand the estimator a block of text to count.
pub trait ReadingText {
    fn reading_text(&self) -> Cow<'_, str>;
    fn word_rule(&self) -> WordRule;
}

impl ReadingText for ContentRecord {
    fn reading_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.text_pieces().join(" "))
    }

    fn word_rule(&self) -> WordRule {
        WordRule::RequireAlphanumeric
    }
}

impl ReadingText for str {
    fn reading_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn word_rule(&self) -> WordRule {
        WordRule::NonEmpty
    }
}

impl ReadingText for String {
    fn reading_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn word_rule(&self) -> WordRule {
        WordRule::NonEmpty
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingTimeConfig {
    pub words_per_minute: f64,
    pub min_minutes: u32,
    pub max_minutes: u32,
}

impl Default for ReadingTimeConfig {
    fn default() -> Self {
        ReadingTimeConfig {
            words_per_minute: 200.0,
            min_minutes: 5,
            max_minutes: 25,
        }
    }
}

pub fn count_words(text: &str, rule: WordRule) -> usize {
    normalize(text)
        .split_whitespace()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(strip_punctuation)
        .filter(|t| match rule {
            WordRule::RequireAlphanumeric => t.chars().any(char::is_alphanumeric),
            WordRule::NonEmpty => !t.is_empty(),
        })
        .count()
}

pub fn minutes_for(word_count: usize, config: &ReadingTimeConfig) -> u32 {
    let raw = (word_count as f64 / config.words_per_minute).round();
    // Bounds may arrive unvalidated; order them so clamp cannot panic.
    let lo = config.min_minutes.min(config.max_minutes);
    let hi = config.min_minutes.max(config.max_minutes);
    // Saturating cast; NaN (zero speed, zero words) becomes 0 and clamps up.
    (raw as u32).clamp(lo, hi)
}

pub fn format_minutes(minutes: u32) -> String {
    format!("{} min read", minutes)
}

pub fn reading_minutes<T: ReadingText + ?Sized>(source: &T, config: &ReadingTimeConfig) -> u32 {
    let words = count_words(&source.reading_text(), source.word_rule());
    minutes_for(words, config)
}

pub fn estimate_reading_time_with<T: ReadingText + ?Sized>(
    source: &T,
    config: &ReadingTimeConfig,
) -> String {
    format_minutes(reading_minutes(source, config))
}

/// `"<n> min read"` at 200 words per minute, clamped to 5..=25.
pub fn estimate_reading_time<T: ReadingText + ?Sized>(source: &T) -> String {
    estimate_reading_time_with(source, &ReadingTimeConfig::default())
}

/// Trim Unicode punctuation (general category P) from both ends of a token.
/// Symbols such as `$`, `+` or `|` are not punctuation and stay.
fn strip_punctuation(token: &str) -> &str {
    let token = LEADING_PUNCT_RE.find(token).map_or(token, |m| &token[m.end()..]);
    TRAILING_PUNCT_RE.find(token).map_or(token, |m| &token[..m.start()])
}
