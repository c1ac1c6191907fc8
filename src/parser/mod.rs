pub mod blocks;
pub mod labels;
pub mod normalize;
pub mod paragraphs;
pub mod sections;

use serde::Serialize;
use tracing::debug;

use crate::reading_time::{estimate_reading_time_with, ReadingTimeConfig};
use crate::record::ContentRecord;
use blocks::DisplayBlock;
use labels::CANONICAL_MARKERS;
use sections::NamedSection;

#[derive(Debug, Clone, Serialize)]
pub struct StructuredContent {
    pub id: Option<String>,
    pub blocks: Vec<DisplayBlock>,
    pub sections: Vec<NamedSection>,
    pub reading_time: String,
}

/// Inline path: strip labels → paragraphs → heading/body blocks.
pub fn structure_text(text: &str) -> Vec<DisplayBlock> {
    let stripped = paragraphs::strip_labels(text, &CANONICAL_MARKERS);
    let paras = paragraphs::segment_paragraphs(&stripped);
    blocks::build_blocks(&paras)
}

/// Both block layouts plus the record-mode reading time for one record.
pub fn structure_record(record: &ContentRecord, config: &ReadingTimeConfig) -> StructuredContent {
    let blocks = structure_text(&record.content);
    let sections = sections::build_sections(&record.content, &CANONICAL_MARKERS);
    let reading_time = estimate_reading_time_with(record, config);

    debug!(
        id = record.id.as_deref().unwrap_or("-"),
        blocks = blocks.len(),
        headings = blocks.iter().filter(|b| b.is_heading()).count(),
        sections = sections.len(),
        %reading_time,
        "structured record"
    );

    StructuredContent {
        id: record.id.clone(),
        blocks,
        sections,
        reading_time,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
    }

    #[test]
    fn labels_never_reach_blocks() {
        let blocks = structure_text(&fixture("insight.txt"));
        assert!(!blocks.is_empty());
        for b in &blocks {
            for marker in CANONICAL_MARKERS.iter() {
                assert_ne!(b.text().to_uppercase().trim_end_matches(':'), *marker);
            }
        }
    }

    #[test]
    fn insight_inline_headings() {
        let blocks = structure_text(&fixture("insight.txt"));
        let headings: Vec<&str> = blocks
            .iter()
            .filter(|b| b.is_heading())
            .map(DisplayBlock::text)
            .collect();
        assert_eq!(headings, vec!["The Tower Card", "WHAT THE TOWER ASKS OF YOU", "Why does this keep happening?"]);
    }

    #[test]
    fn celtic_cross_plain_prose() {
        let text = fixture("celtic_cross.txt");
        let blocks = structure_text(&text);
        assert_eq!(blocks.len(), 5);
        assert_eq!(blocks[0], DisplayBlock::Heading("Reading the Celtic Cross".into()));
        assert!(blocks[1..].iter().all(|b| !b.is_heading()));

        let sections = sections::build_sections(&text, &CANONICAL_MARKERS);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "");
    }

    #[test]
    fn record_round_trip() {
        let record = ContentRecord {
            id: Some("tower".into()),
            content: fixture("insight.txt"),
            ..Default::default()
        };
        let out = structure_record(&record, &ReadingTimeConfig::default());
        assert_eq!(out.id.as_deref(), Some("tower"));
        assert_eq!(out.sections.len(), 6);
        assert_eq!(out.reading_time, "5 min read");
    }

    #[test]
    fn records_fixture() {
        let records: Vec<ContentRecord> = serde_json::from_str(&fixture("records.json")).unwrap();
        let config = ReadingTimeConfig::default();
        let out: Vec<StructuredContent> = records.iter().map(|r| structure_record(r, &config)).collect();

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].blocks[0], DisplayBlock::Heading("Reading the Celtic Cross".into()));
        assert_eq!(out[0].sections[0].title, "");

        let titles: Vec<&str> = out[1].sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Orientation", "Core Concept"]);
        assert_eq!(out[1].blocks.len(), 2);

        assert!(out[2].blocks.is_empty());
        assert!(out.iter().all(|o| o.reading_time == "5 min read"));
    }

    #[test]
    fn empty_record() {
        let out = structure_record(&ContentRecord::default(), &ReadingTimeConfig::default());
        assert!(out.blocks.is_empty());
        assert!(out.sections.is_empty());
        assert_eq!(out.reading_time, "5 min read");
    }
}
