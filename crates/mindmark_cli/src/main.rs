//! Command-line front-end for the mindmark markdown codec.
//!
//! # Responsibility
//! - Normalize notebook files to canonical markdown.
//! - Print header-only renderings and JSON summaries for quick inspection.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mindmark_core::markdown::datetime::datetime_to_string;
use mindmark_core::{
    init_logging, render_header, render_outline, MarkdownRepresentation, Outline, Taxonomy,
    TaxonomyConfig,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mindmark", version, about = "Markdown notebook codec")]
struct Cli {
    /// JSON file with a taxonomy config (types, defaults, tags).
    #[arg(long, global = true)]
    taxonomy: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level used with --log-dir.
    #[arg(long, global = true, default_value = mindmark_core::default_log_level())]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a notebook and print its canonical markdown.
    Normalize { file: PathBuf },
    /// Print only the outline header and description.
    Header { file: PathBuf },
    /// Print a JSON summary of the parsed notebook.
    Inspect { file: PathBuf },
}

#[derive(Serialize)]
struct OutlineSummary<'a> {
    core_version: &'a str,
    key: &'a str,
    title: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    byte_size: u64,
    modified: String,
    modified_pretty: &'a str,
    importance: u8,
    urgency: u8,
    progress: u8,
    tags: Vec<&'a str>,
    notes: Vec<NoteSummary<'a>>,
}

#[derive(Serialize)]
struct NoteSummary<'a> {
    title: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    depth: u32,
    progress: u8,
    tags: Vec<&'a str>,
    description_lines: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&cli.log_level, log_dir).context("failed to initialize logging")?;
    }

    let taxonomy = load_taxonomy(cli.taxonomy.as_deref())?;
    let representation = MarkdownRepresentation::new(&taxonomy);

    match &cli.command {
        Command::Normalize { file } => {
            let outline = load_outline(&representation, file)?;
            print!("{}", render_outline(&outline));
        }
        Command::Header { file } => {
            let outline = load_outline(&representation, file)?;
            print!("{}", render_header(&outline));
        }
        Command::Inspect { file } => {
            let outline = load_outline(&representation, file)?;
            let summary = summarize(&outline);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn load_taxonomy(path: Option<&Path>) -> Result<Taxonomy> {
    let Some(path) = path else {
        return Ok(Taxonomy::new());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read taxonomy config {}", path.display()))?;
    let config: TaxonomyConfig = serde_json::from_str(&raw)
        .with_context(|| format!("invalid taxonomy config {}", path.display()))?;
    Taxonomy::from_config(&config)
        .with_context(|| format!("invalid taxonomy config {}", path.display()))
}

fn load_outline(representation: &MarkdownRepresentation<'_>, file: &Path) -> Result<Outline> {
    log::debug!("event=cli_load module=cli status=start");
    representation
        .outline_from_file(file)
        .with_context(|| format!("failed to load notebook {}", file.display()))
}

fn summarize(outline: &Outline) -> OutlineSummary<'_> {
    OutlineSummary {
        core_version: mindmark_core::core_version(),
        key: &outline.key,
        title: &outline.title,
        kind: outline.kind.name(),
        byte_size: outline.byte_size,
        modified: datetime_to_string(outline.modified),
        modified_pretty: &outline.modified_pretty,
        importance: outline.importance,
        urgency: outline.urgency,
        progress: outline.progress,
        tags: outline.tags().iter().map(|tag| tag.name()).collect(),
        notes: outline
            .notes()
            .iter()
            .map(|note| NoteSummary {
                title: &note.title,
                kind: note.kind.name(),
                depth: note.depth,
                progress: note.progress,
                tags: note.tags().iter().map(|tag| tag.name()).collect(),
                description_lines: note.description.len(),
            })
            .collect(),
    }
}
