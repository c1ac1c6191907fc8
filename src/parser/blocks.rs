use serde::Serialize;
use tracing::trace;

const MAX_HEADING_CHARS: usize = 80;
const MIN_SHOUTED_CHARS: usize = 5;
const TITLE_CASE_RATIO: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum DisplayBlock {
    Heading(String),
    Body(String),
}

impl DisplayBlock {
    pub fn text(&self) -> &str {
        match self {
            DisplayBlock::Heading(t) | DisplayBlock::Body(t) => t,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, DisplayBlock::Heading(_))
    }
}

/// Precomputed view of a paragraph shared by every heading rule.
pub struct Candidate<'a> {
    pub text: &'a str,
    pub char_len: usize,
    pub words: Vec<&'a str>,
}

impl<'a> Candidate<'a> {
    pub fn new(text: &'a str) -> Self {
        Candidate {
            text,
            char_len: text.chars().count(),
            words: text.split_whitespace().collect(),
        }
    }
}

/// A rule either decides (`Some(verdict)`) or defers to the next one.
pub struct HeadingRule {
    pub name: &'static str,
    pub check: fn(&Candidate) -> Option<bool>,
}

/// Evaluated top to bottom; the first rule returning a verdict wins.
pub const HEADING_RULES: &[HeadingRule] = &[
    HeadingRule { name: "too_long", check: too_long },
    HeadingRule { name: "multi_line", check: multi_line },
    HeadingRule { name: "sentence_punctuation", check: sentence_punctuation },
    HeadingRule { name: "question", check: question },
    HeadingRule { name: "no_words", check: no_words },
    HeadingRule { name: "shouted", check: shouted },
    HeadingRule { name: "title_case", check: title_case },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingVerdict {
    pub is_heading: bool,
    /// `None` when no rule decided and the paragraph fell through to body.
    pub rule: Option<&'static str>,
}

pub fn classify_heading_verdict(paragraph: &str) -> HeadingVerdict {
    let candidate = Candidate::new(paragraph);
    for rule in HEADING_RULES {
        if let Some(is_heading) = (rule.check)(&candidate) {
            return HeadingVerdict {
                is_heading,
                rule: Some(rule.name),
            };
        }
    }
    HeadingVerdict {
        is_heading: false,
        rule: None,
    }
}

pub fn classify_heading(paragraph: &str) -> bool {
    classify_heading_verdict(paragraph).is_heading
}

/// Classify each paragraph in order. Nothing is dropped or merged.
pub fn build_blocks<S: AsRef<str>>(paragraphs: &[S]) -> Vec<DisplayBlock> {
    paragraphs
        .iter()
        .map(|p| {
            let text = p.as_ref();
            let verdict = classify_heading_verdict(text);
            trace!(rule = ?verdict.rule, heading = verdict.is_heading, "classified paragraph");
            if verdict.is_heading {
                DisplayBlock::Heading(text.to_string())
            } else {
                DisplayBlock::Body(text.to_string())
            }
        })
        .collect()
}

fn too_long(c: &Candidate) -> Option<bool> {
    (c.char_len > MAX_HEADING_CHARS).then_some(false)
}

fn multi_line(c: &Candidate) -> Option<bool> {
    c.text.contains('\n').then_some(false)
}

fn sentence_punctuation(c: &Candidate) -> Option<bool> {
    c.text.ends_with(['.', ',', ':']).then_some(false)
}

// Lowercase rhetorical questions land here too.
fn question(c: &Candidate) -> Option<bool> {
    c.text.ends_with('?').then_some(true)
}

fn no_words(c: &Candidate) -> Option<bool> {
    c.words.is_empty().then_some(false)
}

fn shouted(c: &Candidate) -> Option<bool> {
    let is_upper = c.text == c.text.to_uppercase();
    (is_upper && c.char_len > MIN_SHOUTED_CHARS && c.words.len() >= 2).then_some(true)
}

fn title_case(c: &Candidate) -> Option<bool> {
    let significant: Vec<&&str> = c.words.iter().filter(|w| w.chars().count() > 2).collect();
    if significant.is_empty() {
        return Some(false);
    }
    let capitalized = significant.iter().filter(|w| starts_uppercase(w)).count();
    let ratio = capitalized as f64 / significant.len() as f64;
    let first_upper = c.words.first().is_some_and(|w| starts_uppercase(w));

    (ratio >= TITLE_CASE_RATIO && c.char_len < MAX_HEADING_CHARS && first_upper).then_some(true)
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}
