pub mod parser;
pub mod reading_time;
pub mod record;
pub mod settings;

pub use parser::blocks::{build_blocks, classify_heading, DisplayBlock};
pub use parser::labels::{SectionLabel, CANONICAL_MARKERS};
pub use parser::normalize::normalize;
pub use parser::paragraphs::{segment_paragraphs, strip_labels};
pub use parser::sections::{build_sections, NamedSection};
pub use reading_time::{estimate_reading_time, ReadingTimeConfig};
pub use record::ContentRecord;
