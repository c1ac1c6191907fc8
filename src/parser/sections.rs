use serde::Serialize;

use super::labels::{display_title, find_label_in_line};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedSection {
    pub title: String,
    pub body: String,
}

/// Group lines under the label line preceding them.
///
/// Labels are matched loosely (the uppercased line only has to contain a
/// marker). Lines before the first label belong to no section and are dropped,
/// unless no label appears at all, in which case the whole text comes back as
/// a single untitled section.
pub fn build_sections(text: &str, labels: &[&str]) -> Vec<NamedSection> {
    let mut sections: Vec<NamedSection> = Vec::new();
    let mut current_title = String::new();
    let mut current_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(marker) = find_label_in_line(trimmed, labels) {
            flush_section(&mut sections, &current_title, &mut current_lines);
            current_title = display_title(marker);
            continue;
        }

        current_lines.push(trimmed);
    }
    flush_section(&mut sections, &current_title, &mut current_lines);

    if sections.is_empty() {
        let whole = text.trim();
        if !whole.is_empty() {
            sections.push(NamedSection {
                title: String::new(),
                body: whole.to_string(),
            });
        }
    }

    sections
}

fn flush_section(sections: &mut Vec<NamedSection>, title: &str, lines: &mut Vec<&str>) {
    let body = lines.join("\n\n").trim().to_string();
    lines.clear();

    if title.trim().is_empty() || body.is_empty() {
        return;
    }
    sections.push(NamedSection {
        title: title.to_string(),
        body,
    });
}

// ── Tests ──
