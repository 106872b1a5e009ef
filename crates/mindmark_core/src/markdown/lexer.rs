//! Markdown lexer: raw text into a `SectionAst`.
//!
//! # Responsibility
//! - Split a document into heading sections with their body lines.
//! - Extract the `<!-- Metadata: ... -->` comment from heading text.
//!
//! # Invariants
//! - Lines inside fenced code blocks never start a section.
//! - Section depth is the heading level minus two, saturating at zero, so
//!   `#` and `##` both record depth 0.
//! - Any run of `#` is a heading, so every depth the renderer writes re-lexes.
//! - Lexing never fails; malformed metadata values leave fields at zero.

use crate::markdown::ast::{Metadata, Section, SectionAst};
use crate::markdown::datetime::string_to_datetime;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

const MAX_IMPORTANCE: u8 = 5;
const MAX_PROGRESS: u8 = 100;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#+)(?:[ \t]+(.*?))?[ \t]*$").expect("valid heading regex"));
static METADATA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?)[ \t]*<!--[ \t]*Metadata:(.*?)-->[ \t]*$").expect("valid metadata regex")
});
static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ ]{0,3}(`{3,}|~{3,})").expect("valid fence regex"));

/// Lexes `text` into sections.
///
/// Lines before the first heading become a leading untitled section unless
/// they are all blank.
pub fn lex(text: &str) -> SectionAst {
    let mut ast = SectionAst::default();
    let mut preamble: Vec<String> = Vec::new();
    let mut current: Option<Section> = None;
    let mut fence: Option<String> = None;

    for line in text.lines() {
        if let Some(marker) = fence_marker(line) {
            match fence.as_deref() {
                Some(open) if marker.starts_with(open) => fence = None,
                Some(_) => {}
                None => fence = Some(marker),
            }
        } else if fence.is_none() {
            if let Some(section) = heading(line) {
                if let Some(done) = current.replace(section) {
                    ast.push(done);
                } else if preamble.iter().any(|line| !line.trim().is_empty()) {
                    ast.push(Section::new(0, None).with_body(preamble.drain(..)));
                }
                continue;
            }
        }

        match current.as_mut() {
            Some(section) => section.body.push(line.to_string()),
            None => preamble.push(line.to_string()),
        }
    }

    match current {
        Some(section) => ast.push(section),
        None if preamble.iter().any(|line| !line.trim().is_empty()) => {
            ast.push(Section::new(0, None).with_body(preamble));
        }
        None => {}
    }

    debug!(
        "event=markdown_lex module=markdown status=ok sections={}",
        ast.len()
    );
    ast
}

fn fence_marker(line: &str) -> Option<String> {
    FENCE_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn heading(line: &str) -> Option<Section> {
    let caps = HEADING_RE.captures(line)?;
    let level = caps.get(1).map_or(1, |m| m.as_str().len()) as u32;
    let text = caps.get(2).map_or("", |m| m.as_str());

    let (title, metadata) = match METADATA_RE.captures(text) {
        Some(meta) => (
            meta.get(1).map_or("", |m| m.as_str()),
            Some(parse_metadata(meta.get(2).map_or("", |m| m.as_str()))),
        ),
        None => (text, None),
    };

    let title = Some(title.trim())
        .filter(|title| !title.is_empty())
        .map(str::to_string);

    Some(Section {
        depth: level.saturating_sub(2),
        title,
        metadata,
        body: Vec::new(),
    })
}

/// Parses the `key: value;` list inside a metadata comment.
///
/// Unknown keys are ignored.
pub fn parse_metadata(fields: &str) -> Metadata {
    let mut metadata = Metadata::default();
    for field in fields.split(';') {
        let Some((key, value)) = field.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "tags" => {
                metadata.tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "type" if !value.is_empty() => metadata.type_name = Some(value.to_string()),
            "created" => metadata.created = string_to_datetime(value).unwrap_or_default(),
            "modified" => metadata.modified = string_to_datetime(value).unwrap_or_default(),
            "read" => metadata.read = string_to_datetime(value).unwrap_or_default(),
            "revision" => metadata.revision = value.parse().unwrap_or_default(),
            "reads" => metadata.reads = value.parse().unwrap_or_default(),
            "importance" => metadata.importance = parse_rating(value),
            "urgency" => metadata.urgency = parse_rating(value),
            "progress" => metadata.progress = parse_percentage(value),
            _ => {}
        }
    }
    metadata
}

fn parse_rating(value: &str) -> u8 {
    let number = value.split('/').next().unwrap_or_default().trim();
    number
        .parse::<u8>()
        .map_or(0, |rating| rating.min(MAX_IMPORTANCE))
}

fn parse_percentage(value: &str) -> u8 {
    value
        .trim_end_matches('%')
        .trim()
        .parse::<u8>()
        .map_or(0, |percent| percent.min(MAX_PROGRESS))
}

#[cfg(test)]
mod tests {
    use super::{lex, parse_metadata};

    #[test]
    fn heading_levels_map_to_depth() {
        let ast = lex("# Top\n## Child\n### Grandchild\n");
        let depths: Vec<u32> = ast.sections().iter().map(|s| s.depth).collect();
        assert_eq!(depths, vec![0, 0, 1]);
        assert_eq!(ast.sections()[2].title.as_deref(), Some("Grandchild"));
    }

    #[test]
    fn metadata_comment_is_split_from_title() {
        let ast = lex(
            "# Plan <!-- Metadata: tags: a, b,; type: Grow; created: 2024-03-05 14:07:09; reads: 3; read: 2024-03-05 14:07:09; revision: 2; modified: 2024-03-05 14:07:09; importance: 4/5; urgency: 9/5; progress: 40%; -->\nbody\n",
        );
        let section = &ast.sections()[0];
        assert_eq!(section.title.as_deref(), Some("Plan"));
        let meta = section.metadata.as_ref().expect("metadata should be parsed");
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(meta.type_name.as_deref(), Some("Grow"));
        assert_eq!(meta.created, 1_709_647_629);
        assert_eq!(meta.reads, 3);
        assert_eq!(meta.revision, 2);
        assert_eq!(meta.importance, 4);
        assert_eq!(meta.urgency, 5);
        assert_eq!(meta.progress, 40);
        assert_eq!(section.body, vec!["body"]);
    }

    #[test]
    fn fenced_code_does_not_start_sections() {
        let ast = lex("# Doc\n```sh\n# not a heading\n```\n## Real\n");
        assert_eq!(ast.len(), 2);
        assert_eq!(ast.sections()[0].body, vec!["```sh", "# not a heading", "```"]);
    }

    #[test]
    fn empty_titles_are_absent() {
        let ast = lex("## ?\n##\n#hashtag line\n");
        assert_eq!(ast.len(), 2);
        assert_eq!(ast.sections()[0].title.as_deref(), Some("?"));
        assert_eq!(ast.sections()[1].title, None);
        assert_eq!(ast.sections()[1].body, vec!["#hashtag line"]);
    }

    #[test]
    fn headings_deeper_than_six_levels_are_sections() {
        let ast = lex("# Top\n####### Seventh\n########## Tenth\n");
        let depths: Vec<u32> = ast.sections().iter().map(|s| s.depth).collect();
        assert_eq!(depths, vec![0, 5, 8]);
        assert_eq!(ast.sections()[2].title.as_deref(), Some("Tenth"));
    }

    #[test]
    fn preamble_becomes_leading_section_unless_blank() {
        let ast = lex("intro text\n# Title\n");
        assert_eq!(ast.len(), 2);
        assert_eq!(ast.sections()[0].title, None);
        assert_eq!(ast.sections()[0].body, vec!["intro text"]);

        let ast = lex("\n\n# Title\n");
        assert_eq!(ast.len(), 1);
        assert_eq!(ast.sections()[0].title.as_deref(), Some("Title"));
    }

    #[test]
    fn empty_text_yields_empty_ast() {
        assert!(lex("").is_empty());
        assert!(lex("\n \n").is_empty());
    }

    #[test]
    fn malformed_values_default_to_zero() {
        let meta = parse_metadata(" reads: many; created: soon; progress: x%; shape: round;");
        assert_eq!(meta.reads, 0);
        assert_eq!(meta.created, 0);
        assert_eq!(meta.progress, 0);
        assert_eq!(meta.type_name, None);
    }
}
