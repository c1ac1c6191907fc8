use std::sync::LazyLock;

use regex::Regex;

use super::labels::is_label_line;

static EXCESS_NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Remove editorial label lines, leaving a paragraph break where a label sat
/// directly under text.
pub fn strip_labels(text: &str, labels: &[&str]) -> String {
    let mut kept: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if is_label_line(line, labels) {
            // Only the last retained line matters, no lookahead.
            if kept.last().is_some_and(|prev| !prev.trim().is_empty()) {
                kept.push("");
            }
            continue;
        }
        kept.push(line);
    }

    let joined = kept.join("\n");
    EXCESS_NEWLINES_RE
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}

/// Split text on blank-line separators into trimmed, non-empty paragraphs.
pub fn segment_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::labels::CANONICAL_MARKERS;
    use proptest::prelude::*;

    fn strip(text: &str) -> String {
        strip_labels(text, &CANONICAL_MARKERS)
    }

    #[test]
    fn label_at_start_leaves_no_blank() {
        assert_eq!(strip("HOW TO APPLY:\nDo the thing."), "Do the thing.");
    }

    #[test]
    fn label_under_text_becomes_break() {
        let out = strip("Intro line.\nCORE CONCEPT\nThe idea.");
        assert_eq!(out, "Intro line.\n\nThe idea.");
        assert_eq!(segment_paragraphs(&out), vec!["Intro line.", "The idea."]);
    }

    #[test]
    fn label_after_blank_adds_nothing() {
        let out = strip("Intro.\n\nORIENTATION\n\nBody.");
        assert_eq!(out, "Intro.\n\nBody.");
    }

    #[test]
    fn consecutive_labels_single_break() {
        let out = strip("Intro.\nORIENTATION\nCORE CONCEPT\nBody.");
        assert_eq!(out, "Intro.\n\nBody.");
    }

    #[test]
    fn only_labels() {
        assert_eq!(strip("ORIENTATION\nEXAMPLES:\n\nRELATED CONCEPTS"), "");
    }

    #[test]
    fn sentences_mentioning_labels_survive() {
        let text = "Orientation is about where you stand.\nExamples help.";
        assert_eq!(strip(text), text);
    }

    #[test]
    fn marker_word_with_full_stop_is_a_label() {
        // One trailing character after a marker still counts as a label line.
        assert_eq!(strip("Intro.\nexamples.\nframework.\nBody."), "Intro.\n\nBody.");
    }

    #[test]
    fn segment_basic() {
        let paras = segment_paragraphs("  First.  \n\n\n\nSecond\nstill second.\n\n   ");
        assert_eq!(paras, vec!["First.", "Second\nstill second."]);
    }

    #[test]
    fn segment_empty() {
        assert!(segment_paragraphs("").is_empty());
        assert!(segment_paragraphs(" \n\n \n\n").is_empty());
    }

    proptest! {
        #[test]
        fn segments_never_blank(text in "[a-z \n]{0,200}") {
            for p in segment_paragraphs(&text) {
                prop_assert!(!p.trim().is_empty());
                prop_assert_eq!(p.trim(), p.as_str());
            }
        }

        #[test]
        fn segments_keep_order(words in proptest::collection::vec("[a-z]{1,8}", 0..12)) {
            let text = words.join("\n\n");
            prop_assert_eq!(segment_paragraphs(&text), words);
        }

        // No marker begins with Q, so these lines can never be labels.
        #[test]
        fn strip_keeps_non_label_lines(lines in proptest::collection::vec("q[a-z]{0,11}( [a-z]{1,12}){0,4}\\.", 0..10)) {
            let text = lines.join("\n");
            let out = strip_labels(&text, &CANONICAL_MARKERS);
            prop_assert_eq!(out, text.trim().to_string());
        }
    }
}
