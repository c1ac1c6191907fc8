use std::sync::LazyLock;

/// Editorial section labels writers embed as standalone lines in article text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionLabel {
    Orientation,
    CoreConcept,
    Framework,
    Examples,
    HowToApply,
    WhenThisMattersMost,
    RelatedConcepts,
}

// Longer aliases first so loose matching reports the most specific marker.
const MARKERS: &[(&str, SectionLabel)] = &[
    ("ORIENTATION", SectionLabel::Orientation),
    ("CORE CONCEPT", SectionLabel::CoreConcept),
    ("FRAMEWORK OR BREAKDOWN", SectionLabel::Framework),
    ("FRAMEWORK", SectionLabel::Framework),
    ("EXAMPLES OR PATTERNS", SectionLabel::Examples),
    ("EXAMPLES", SectionLabel::Examples),
    ("HOW TO APPLY THIS INSIGHT", SectionLabel::HowToApply),
    ("HOW TO APPLY", SectionLabel::HowToApply),
    ("WHEN THIS MATTERS MOST:", SectionLabel::WhenThisMattersMost),
    ("WHEN THIS MATTERS MOST", SectionLabel::WhenThisMattersMost),
    ("RELATED CONCEPTS INSIDE THE APP", SectionLabel::RelatedConcepts),
    ("RELATED CONCEPTS", SectionLabel::RelatedConcepts),
];

/// Every canonical marker string, in table order.
pub static CANONICAL_MARKERS: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| MARKERS.iter().map(|(marker, _)| *marker).collect());

impl SectionLabel {
    pub const ALL: [SectionLabel; 7] = [
        SectionLabel::Orientation,
        SectionLabel::CoreConcept,
        SectionLabel::Framework,
        SectionLabel::Examples,
        SectionLabel::HowToApply,
        SectionLabel::WhenThisMattersMost,
        SectionLabel::RelatedConcepts,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionLabel::Orientation => "Orientation",
            SectionLabel::CoreConcept => "Core Concept",
            SectionLabel::Framework => "Framework or Breakdown",
            SectionLabel::Examples => "Examples or Patterns",
            SectionLabel::HowToApply => "How to Apply This Insight",
            SectionLabel::WhenThisMattersMost => "When This Matters Most",
            SectionLabel::RelatedConcepts => "Related Concepts Inside the App",
        }
    }

    pub fn markers(self) -> impl Iterator<Item = &'static str> {
        MARKERS
            .iter()
            .filter(move |(_, label)| *label == self)
            .map(|(marker, _)| *marker)
    }

    /// Case-insensitive lookup of a marker string.
    pub fn from_marker(marker: &str) -> Option<Self> {
        let upper = marker.trim().to_uppercase();
        MARKERS
            .iter()
            .find(|(m, _)| *m == upper)
            .map(|(_, label)| *label)
    }
}

/// Display title for a marker; unknown markers are capitalized word by word.
pub fn display_title(marker: &str) -> String {
    match SectionLabel::from_marker(marker) {
        Some(label) => label.title().to_string(),
        None => capitalize_words(marker.trim()),
    }
}

fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strict match used when stripping: the trimmed line equals a marker, a marker
/// plus one colon, or a marker followed by at most one extra character.
pub fn is_label_line(line: &str, labels: &[&str]) -> bool {
    let upper = line.trim().to_uppercase();
    if upper.is_empty() {
        return false;
    }
    let line_len = upper.chars().count();

    labels.iter().filter(|m| !m.trim().is_empty()).any(|marker| {
        let marker = marker.trim().to_uppercase();
        if upper == marker {
            return true;
        }
        if upper.strip_suffix(':') == Some(marker.as_str()) {
            return true;
        }
        upper.starts_with(&marker) && line_len <= marker.chars().count() + 1
    })
}

/// Loose match used by grouped sections: the uppercased line contains a marker
/// anywhere. Returns the first marker found in `labels` order.
pub fn find_label_in_line<'a>(line: &str, labels: &[&'a str]) -> Option<&'a str> {
    let upper = line.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }
    labels
        .iter()
        .copied()
        .filter(|m| !m.trim().is_empty())
        .find(|marker| upper.contains(&marker.trim().to_uppercase()))
}
