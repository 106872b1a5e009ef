//! Outline domain model.
//!
//! # Responsibility
//! - Hold document-level metadata and the ordered notes of one notebook file.
//! - Own every note exclusively; notes refer back via `OutlineId`.
//!
//! # Invariants
//! - `kind` is never absent; builders fall back to the registry default.
//! - `tags` contains registry-interned tags without duplicates.
//! - Notes are a flat sequence in source order; depth is data, not structure.

use crate::model::note::Note;
use crate::model::taxonomy::{EntityType, Tag};
use crate::model::Timestamp;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Stable in-process identity of an outline, used for note back-references.
pub type OutlineId = Uuid;

/// Document-level entity owning an ordered list of notes.
#[derive(Debug, Clone)]
pub struct Outline {
    id: OutlineId,
    pub title: String,
    pub kind: Arc<EntityType>,
    pub created: Timestamp,
    pub modified: Timestamp,
    pub read: Timestamp,
    pub revision: u32,
    pub reads: u32,
    /// 0-5.
    pub importance: u8,
    /// 0-5.
    pub urgency: u8,
    /// Percentage, 0-100.
    pub progress: u8,
    pub description: Vec<String>,
    /// Storage key (canonical file path). Set by the file entry point.
    pub key: String,
    /// Source size in bytes. Set by the file entry point.
    pub byte_size: u64,
    /// Human-readable `modified`. Set by the file entry point.
    pub modified_pretty: String,
    tags: Vec<Arc<Tag>>,
    notes: Vec<Note>,
}

impl Outline {
    /// Creates an empty outline with a freshly generated id.
    pub fn new(kind: Arc<EntityType>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            kind,
            created: 0,
            modified: 0,
            read: 0,
            revision: 0,
            reads: 0,
            importance: 0,
            urgency: 0,
            progress: 0,
            description: Vec::new(),
            key: String::new(),
            byte_size: 0,
            modified_pretty: String::new(),
            tags: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn id(&self) -> OutlineId {
        self.id
    }

    pub fn tags(&self) -> &[Arc<Tag>] {
        &self.tags
    }

    /// Adds an interned tag; returns `false` if it was already present.
    pub fn add_tag(&mut self, tag: Arc<Tag>) -> bool {
        if self.tags.iter().any(|existing| Arc::ptr_eq(existing, &tag)) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name() == name)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut [Note] {
        &mut self.notes
    }

    /// Appends a note and takes ownership of it.
    ///
    /// The note's back-reference is rewritten to this outline.
    pub fn add_note(&mut self, mut note: Note) -> &Note {
        note.set_outline(Some(self.id));
        self.notes.push(note);
        &self.notes[self.notes.len() - 1]
    }

    /// Removes and returns the note at `index`, clearing its back-reference.
    pub fn remove_note(&mut self, index: usize) -> Option<Note> {
        if index >= self.notes.len() {
            return None;
        }
        let mut note = self.notes.remove(index);
        note.set_outline(None);
        Some(note)
    }

    /// Title used in rendered headings: the title, or the key when empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.key
        } else {
            &self.title
        }
    }

    /// Fills properties that depend on file-system facts.
    ///
    /// - Empty title takes the file stem of `key`.
    /// - Zero `created`/`modified` take `file_modified`; zero `read` takes
    ///   `modified`.
    /// - Every note is completed against the outline's `modified`.
    pub fn complete_properties(&mut self, file_modified: Timestamp) {
        if self.title.is_empty() {
            if let Some(stem) = Path::new(&self.key).file_stem() {
                self.title = stem.to_string_lossy().into_owned();
            }
        }
        if self.created == 0 {
            self.created = file_modified;
        }
        if self.modified == 0 {
            self.modified = file_modified;
        }
        if self.read == 0 {
            self.read = self.modified;
        }

        let modified = self.modified;
        for note in &mut self.notes {
            note.complete_properties(modified);
        }
    }
}
