use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use prose_blocks::parser::{self, labels, paragraphs, sections, StructuredContent};
use prose_blocks::reading_time::{self, ReadingTimeConfig};
use prose_blocks::record::ContentRecord;
use prose_blocks::settings;

#[derive(Parser)]
#[command(name = "prose_blocks", about = "Turn editorial prose into display blocks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Heading/body blocks of a text file (stdin when no path)
    Blocks { path: Option<PathBuf> },
    /// Text with editorial label lines removed
    Strip { path: Option<PathBuf> },
    /// Label-grouped sections of a text file (stdin when no path)
    Sections { path: Option<PathBuf> },
    /// Estimated reading time of raw text
    ReadTime {
        path: Option<PathBuf>,
        /// Count words the way the single-string path always has
        #[arg(long)]
        legacy: bool,
    },
    /// Structure a JSON array of content records, one JSON line per record
    Process {
        input: PathBuf,
        /// Max records to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Override words per minute
        #[arg(long)]
        wpm: Option<f64>,
    },
    /// Show the section label table
    Labels,
}

impl Commands {
    fn uses_settings(&self) -> bool {
        matches!(self, Commands::ReadTime { .. } | Commands::Process { .. })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    // A bad PROSE_* variable must not break subcommands that never read it.
    let mut config = if cli.command.uses_settings() {
        settings::load()?
    } else {
        ReadingTimeConfig::default()
    };

    let result = match cli.command {
        Commands::Blocks { path } => {
            let text = read_input(path.as_deref())?;
            let blocks = parser::structure_text(&text);
            println!("{}", serde_json::to_string_pretty(&blocks)?);
            Ok(())
        }
        Commands::Strip { path } => {
            let text = read_input(path.as_deref())?;
            println!("{}", paragraphs::strip_labels(&text, &labels::CANONICAL_MARKERS));
            Ok(())
        }
        Commands::Sections { path } => {
            let text = read_input(path.as_deref())?;
            let sections = sections::build_sections(&text, &labels::CANONICAL_MARKERS);
            println!("{}", serde_json::to_string_pretty(&sections)?);
            Ok(())
        }
        Commands::ReadTime { path, legacy } => {
            let text = read_input(path.as_deref())?;
            let estimate = if legacy {
                reading_time::estimate_reading_time_with(text.as_str(), &config)
            } else {
                let record = ContentRecord {
                    content: text,
                    ..Default::default()
                };
                reading_time::estimate_reading_time_with(&record, &config)
            };
            println!("{}", estimate);
            Ok(())
        }
        Commands::Process { input, limit, wpm } => {
            if let Some(wpm) = wpm {
                config.words_per_minute = wpm;
                settings::validate(&config)?;
            }
            let mut records = read_records(&input)?;
            if let Some(n) = limit {
                records.truncate(n);
            }
            if records.is_empty() {
                eprintln!("No records in {}.", input.display());
                return Ok(());
            }
            eprintln!("Processing {} records...", records.len());
            let counts = process_records(&records, &config)?;
            counts.print();
            Ok(())
        }
        Commands::Labels => {
            for label in labels::SectionLabel::ALL {
                let markers: Vec<&str> = label.markers().collect();
                println!("{:<32} {}", label.title(), markers.join(" | "));
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn read_records(path: &Path) -> anyhow::Result<Vec<ContentRecord>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("decoding records in {}", path.display()))
}

struct ProcessCounts {
    records: usize,
    blocks: usize,
    headings: usize,
    sections: usize,
    untitled: usize,
}

impl ProcessCounts {
    fn add(&mut self, out: &StructuredContent) {
        self.records += 1;
        self.blocks += out.blocks.len();
        self.headings += out.blocks.iter().filter(|b| b.is_heading()).count();
        self.sections += out.sections.len();
        self.untitled += out.sections.iter().filter(|s| s.title.is_empty()).count();
    }

    fn print(&self) {
        eprintln!(
            "Structured {} records: {} blocks ({} headings), {} sections ({} untitled).",
            self.records, self.blocks, self.headings, self.sections, self.untitled,
        );
    }
}

fn process_records(
    records: &[ContentRecord],
    config: &ReadingTimeConfig,
) -> anyhow::Result<ProcessCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = ProcessCounts {
        records: 0,
        blocks: 0,
        headings: 0,
        sections: 0,
        untitled: 0,
    };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for chunk in records.chunks(500) {
        let results: Vec<StructuredContent> = chunk
            .par_iter()
            .map(|r| parser::structure_record(r, config))
            .collect();

        for item in &results {
            counts.add(item);
            serde_json::to_writer(&mut out, item)?;
            out.write_all(b"\n")?;
        }
        pb.inc(chunk.len() as u64);
    }

    out.flush()?;
    pb.finish_and_clear();
    Ok(counts)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Commands {
        let argv = std::iter::once("prose_blocks").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn only_estimating_commands_load_settings() {
        assert!(command(&["read-time"]).uses_settings());
        assert!(command(&["process", "records.json"]).uses_settings());
        for args in [&["labels"][..], &["strip"], &["blocks"], &["sections"]] {
            assert!(!command(args).uses_settings(), "{:?} loads settings", args);
        }
    }
}
