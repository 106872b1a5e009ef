//! Note domain model.
//!
//! # Invariants
//! - `kind` always points at a registry-owned type.
//! - `tags` holds registry-interned tags without duplicates.
//! - `outline` is a non-owning back-reference; the owning `Outline` is the
//!   only container of a note.

use crate::model::outline::OutlineId;
use crate::model::taxonomy::{EntityType, Tag};
use crate::model::Timestamp;
use std::sync::Arc;

/// Child entry of an outline, or a standalone fragment.
#[derive(Debug, Clone)]
pub struct Note {
    pub title: String,
    pub kind: Arc<EntityType>,
    /// Nesting below the outline heading; 0 renders as `##`.
    pub depth: u32,
    pub created: Timestamp,
    pub modified: Timestamp,
    pub read: Timestamp,
    pub revision: u32,
    pub reads: u32,
    /// Percentage, 0-100.
    pub progress: u8,
    pub description: Vec<String>,
    tags: Vec<Arc<Tag>>,
    outline: Option<OutlineId>,
}

impl Note {
    /// Creates an empty note of the given type.
    pub fn new(kind: Arc<EntityType>, outline: Option<OutlineId>) -> Self {
        Self {
            title: String::new(),
            kind,
            depth: 0,
            created: 0,
            modified: 0,
            read: 0,
            revision: 0,
            reads: 0,
            progress: 0,
            description: Vec::new(),
            tags: Vec::new(),
            outline,
        }
    }

    /// Returns the owning outline id, if any.
    pub fn outline(&self) -> Option<OutlineId> {
        self.outline
    }

    pub(crate) fn set_outline(&mut self, outline: Option<OutlineId>) {
        self.outline = outline;
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

    /// Fills zero timestamps from the owning outline's modification time.
    pub fn complete_properties(&mut self, outline_modified: Timestamp) {
        if self.created == 0 {
            self.created = outline_modified;
        }
        if self.modified == 0 {
            self.modified = outline_modified;
        }
        if self.read == 0 {
            self.read = outline_modified;
        }
    }
}
