//! Canonical markdown rendering for outlines and notes.
//!
//! Output is a pure function of the entity's fields. Field order inside the
//! metadata comment is fixed; existing documents depend on it.

use crate::markdown::datetime::datetime_to_string;
use crate::model::note::Note;
use crate::model::outline::Outline;
use crate::model::taxonomy::{EntityType, Tag};
use crate::model::Timestamp;
use std::sync::Arc;

/// Title written for untitled notes; read back as untitled by the note builder.
pub const TITLE_PLACEHOLDER: &str = "?";

const AVG_NOTE_SIZE: usize = 500;
const AVG_OUTLINE_SIZE: usize = 10 * AVG_NOTE_SIZE;

/// Renders the outline heading line and description only.
///
/// `None` renders as an empty string.
pub fn render_header<'a>(outline: impl Into<Option<&'a Outline>>) -> String {
    let mut md = String::new();
    if let Some(outline) = outline.into() {
        md.reserve(AVG_NOTE_SIZE * (outline.notes().len() + 1));
        push_header(&mut md, outline);
    }
    md
}

/// Renders the outline header followed by every note in order.
///
/// `None` renders as an empty string.
pub fn render_outline<'a>(outline: impl Into<Option<&'a Outline>>) -> String {
    let mut md = String::new();
    if let Some(outline) = outline.into() {
        md.reserve(AVG_OUTLINE_SIZE);
        push_header(&mut md, outline);
        for note in outline.notes() {
            push_note(&mut md, note);
        }
    }
    md
}

/// Renders one note block.
///
/// `None` renders as an empty string.
pub fn render_note<'a>(note: impl Into<Option<&'a Note>>) -> String {
    let mut md = String::new();
    if let Some(note) = note.into() {
        md.reserve(AVG_NOTE_SIZE);
        push_note(&mut md, note);
    }
    md
}

/// Joins tag names with `,`.
pub fn join_tags(tags: &[Arc<Tag>]) -> String {
    tags.iter()
        .map(|tag| tag.name())
        .collect::<Vec<_>>()
        .join(",")
}

struct MetadataLine<'a> {
    tags: &'a [Arc<Tag>],
    kind: &'a EntityType,
    created: Timestamp,
    reads: u32,
    read: Timestamp,
    revision: u32,
    modified: Timestamp,
    /// `(importance, urgency)`; outlines only.
    rating: Option<(u8, u8)>,
    progress: u8,
}

impl MetadataLine<'_> {
    fn push_to(&self, md: &mut String) {
        md.push_str(" <!-- Metadata:");
        if !self.tags.is_empty() {
            md.push_str(&format!(" tags: {};", join_tags(self.tags)));
        }
        md.push_str(&format!(
            " type: {}; created: {}; reads: {}; read: {}; revision: {}; modified: {};",
            self.kind.name(),
            datetime_to_string(self.created),
            self.reads,
            datetime_to_string(self.read),
            self.revision,
            datetime_to_string(self.modified),
        ));
        if let Some((importance, urgency)) = self.rating {
            md.push_str(&format!(
                " importance: {importance}/5; urgency: {urgency}/5;"
            ));
        }
        md.push_str(&format!(" progress: {}%; -->\n", self.progress));
    }
}

fn push_header(md: &mut String, outline: &Outline) {
    md.push_str("# ");
    md.push_str(outline.display_title());
    MetadataLine {
        tags: outline.tags(),
        kind: &outline.kind,
        created: outline.created,
        reads: outline.reads,
        read: outline.read,
        revision: outline.revision,
        modified: outline.modified,
        rating: Some((outline.importance, outline.urgency)),
        progress: outline.progress,
    }
    .push_to(md);
    push_description(md, &outline.description);
}

fn push_note(md: &mut String, note: &Note) {
    for _ in 0..=note.depth {
        md.push('#');
    }
    md.push_str("# ");
    if note.title.is_empty() {
        md.push_str(TITLE_PLACEHOLDER);
    } else {
        md.push_str(&note.title);
    }
    MetadataLine {
        tags: note.tags(),
        kind: &note.kind,
        created: note.created,
        reads: note.reads,
        read: note.read,
        revision: note.revision,
        modified: note.modified,
        rating: None,
        progress: note.progress,
    }
    .push_to(md);
    push_description(md, &note.description);
}

fn push_description(md: &mut String, description: &[String]) {
    for line in description {
        md.push_str(line);
        md.push('\n');
    }
}
