//! Outline and note builders over a consumed `SectionAst`.
//!
//! # Invariants
//! - The first section is always the outline header; the rest become notes
//!   in source order.
//! - Unknown or absent type names resolve to the registry default.
//! - Body lines are moved from sections into descriptions.
//! - A note titled `?` is untitled; the outline header keeps `?` verbatim.

use crate::markdown::ast::{Section, SectionAst};
use crate::markdown::lexer::lex;
use crate::model::note::Note;
use crate::model::outline::{Outline, OutlineId};
use crate::model::taxonomy::Taxonomy;
use crate::representation::render::TITLE_PLACEHOLDER;
use log::debug;

/// Markdown codec bound to one taxonomy registry.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRepresentation<'t> {
    taxonomy: &'t Taxonomy,
}

impl<'t> MarkdownRepresentation<'t> {
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &'t Taxonomy {
        self.taxonomy
    }

    /// Builds an outline from a whole document AST.
    ///
    /// An empty AST yields an outline with the default type and no notes.
    pub fn outline(&self, ast: SectionAst) -> Outline {
        let mut outline = Outline::new(self.taxonomy.default_outline_type());
        let mut sections = ast.into_iter();

        if let Some(header) = sections.next() {
            let Section {
                title,
                metadata,
                body,
                ..
            } = header;
            let metadata = metadata.unwrap_or_default();

            if let Some(title) = title.filter(|title| !title.is_empty()) {
                outline.title = title;
            }
            outline.kind = metadata
                .type_name
                .as_deref()
                .and_then(|name| self.taxonomy.outline_type(name))
                .unwrap_or_else(|| self.taxonomy.default_outline_type());
            outline.created = metadata.created;
            outline.modified = metadata.modified;
            outline.revision = metadata.revision;
            outline.read = metadata.read;
            outline.reads = metadata.reads;
            outline.importance = metadata.importance;
            outline.urgency = metadata.urgency;
            outline.progress = metadata.progress;
            for name in &metadata.tags {
                outline.add_tag(self.taxonomy.find_or_create_tag(name));
            }
            outline.description = body;
        }

        let owner = outline.id();
        for section in sections {
            outline.add_note(self.build_note(section, Some(owner)));
        }

        debug!(
            "event=outline_build module=representation status=ok notes={} tags={}",
            outline.notes().len(),
            outline.tags().len()
        );
        outline
    }

    /// Lexes `text` and builds an outline from it.
    pub fn outline_from_text(&self, text: &str) -> Outline {
        self.outline(lex(text))
    }

    /// Appends one note per section from `start` onwards to `outline`.
    ///
    /// Returns the last appended note, or `None` when nothing was appended.
    pub fn notes<'o>(
        &self,
        ast: SectionAst,
        start: usize,
        outline: &'o mut Outline,
    ) -> Option<&'o Note> {
        let owner = outline.id();
        let before = outline.notes().len();
        for section in ast.into_iter().skip(start) {
            outline.add_note(self.build_note(section, Some(owner)));
        }
        if outline.notes().len() == before {
            return None;
        }
        outline.notes().last()
    }

    /// Builds a standalone note from a fragment AST.
    ///
    /// Every section is built; the note from the last one is returned.
    pub fn note(&self, ast: SectionAst) -> Option<Note> {
        ast.into_iter()
            .map(|section| self.build_note(section, None))
            .last()
    }

    /// Lexes `text` and builds a standalone note from it.
    pub fn note_from_text(&self, text: &str) -> Option<Note> {
        self.note(lex(text))
    }

    fn build_note(&self, section: Section, owner: Option<OutlineId>) -> Note {
        let Section {
            depth,
            title,
            metadata,
            body,
        } = section;
        let metadata = metadata.unwrap_or_default();

        let kind = metadata
            .type_name
            .as_deref()
            .and_then(|name| self.taxonomy.note_type(name))
            .unwrap_or_else(|| self.taxonomy.default_note_type());
        let mut note = Note::new(kind, owner);
        if let Some(title) = title.filter(|title| title != TITLE_PLACEHOLDER) {
            note.title = title;
        }
        note.depth = depth;
        note.description = body;
        note.created = metadata.created;
        note.modified = metadata.modified;
        note.revision = metadata.revision;
        note.read = metadata.read;
        note.reads = metadata.reads;
        note.progress = metadata.progress;
        for name in &metadata.tags {
            note.add_tag(self.taxonomy.find_or_create_tag(name));
        }
        note
    }
}
