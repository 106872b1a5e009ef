//! Section AST produced by the lexer and consumed once by the builders.
//!
//! # Invariants
//! - A `SectionAst` is moved into a builder; nothing keeps a second handle.
//! - Body lines are moved out of sections, never cloned.

use crate::model::Timestamp;

/// Metadata fields carried by the heading comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub type_name: Option<String>,
    pub created: Timestamp,
    pub modified: Timestamp,
    pub read: Timestamp,
    pub revision: u32,
    pub reads: u32,
    pub importance: u8,
    pub urgency: u8,
    pub progress: u8,
    pub tags: Vec<String>,
}

/// One heading and the lines below it up to the next heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub depth: u32,
    pub title: Option<String>,
    pub metadata: Option<Metadata>,
    pub body: Vec<String>,
}

impl Section {
    pub fn new(depth: u32, title: Option<String>) -> Self {
        Self {
            depth,
            title,
            metadata: None,
            body: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_body<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = lines.into_iter().map(Into::into).collect();
        self
    }
}

/// Ordered section sequence of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionAst {
    sections: Vec<Section>,
}

impl SectionAst {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }
}

impl IntoIterator for SectionAst {
    type Item = Section;
    type IntoIter = std::vec::IntoIter<Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}

impl FromIterator<Section> for SectionAst {
    fn from_iter<T: IntoIterator<Item = Section>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Section>> for SectionAst {
    fn from(sections: Vec<Section>) -> Self {
        Self::new(sections)
    }
}
