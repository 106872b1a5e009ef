//! Taxonomy registry: outline/note types and interned tags.
//!
//! # Responsibility
//! - Resolve type names to canonical `EntityType` entries.
//! - Expose the default outline/note types used when a name does not resolve.
//! - Intern tag names so that one name always maps to one `Tag` instance.
//!
//! # Invariants
//! - Every `Arc<Tag>` handed out for a name is the same allocation for the
//!   lifetime of the registry (`Arc::ptr_eq` holds).
//! - Default types are always members of their type tables.
//! - `find_or_create_tag` is serialized by an internal lock, so one registry
//!   can be shared between threads.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, PoisonError};

const DEFAULT_OUTLINE_TYPE: &str = "Outline";
const DEFAULT_NOTE_TYPE: &str = "Note";

const BUILTIN_OUTLINE_TYPES: &[&str] = &[
    DEFAULT_OUTLINE_TYPE,
    "Grow",
    "Book",
    "Learn",
    "Research",
    "Project",
    "Journal",
];

const BUILTIN_NOTE_TYPES: &[&str] = &[
    DEFAULT_NOTE_TYPE,
    "Action",
    "Idea",
    "Question",
    "Answer",
    "Conclusion",
    "Fact",
    "Definition",
    "Task",
    "Lesson",
    "Experience",
    "Example",
];

/// Interned tag. Compare by identity with `Arc::ptr_eq`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    name: String,
}

impl Tag {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Outline or note type entry owned by the registry.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EntityType {
    name: String,
}

impl EntityType {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Declarative registry content, loadable from JSON by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    pub outline_types: Vec<String>,
    pub note_types: Vec<String>,
    pub default_outline_type: String,
    pub default_note_type: String,
    /// Tags interned up front.
    pub tags: Vec<String>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            outline_types: BUILTIN_OUTLINE_TYPES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            note_types: BUILTIN_NOTE_TYPES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            default_outline_type: DEFAULT_OUTLINE_TYPE.to_string(),
            default_note_type: DEFAULT_NOTE_TYPE.to_string(),
            tags: Vec::new(),
        }
    }
}

/// Configuration errors raised by `Taxonomy::from_config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyConfigError {
    BlankTypeName,
    BlankTagName,
    UnknownDefaultOutlineType(String),
    UnknownDefaultNoteType(String),
}

impl Display for TaxonomyConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTypeName => write!(f, "type names must not be blank"),
            Self::BlankTagName => write!(f, "tag names must not be blank"),
            Self::UnknownDefaultOutlineType(name) => {
                write!(f, "default outline type `{name}` is not a declared outline type")
            }
            Self::UnknownDefaultNoteType(name) => {
                write!(f, "default note type `{name}` is not a declared note type")
            }
        }
    }
}

impl Error for TaxonomyConfigError {}

/// Shared registry of types and tags.
#[derive(Debug)]
pub struct Taxonomy {
    outline_types: BTreeMap<String, Arc<EntityType>>,
    note_types: BTreeMap<String, Arc<EntityType>>,
    default_outline_type: Arc<EntityType>,
    default_note_type: Arc<EntityType>,
    tags: Mutex<BTreeMap<String, Arc<Tag>>>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl Taxonomy {
    /// Creates a registry with the built-in type tables and no tags.
    pub fn new() -> Self {
        let outline_types = type_table(BUILTIN_OUTLINE_TYPES.iter().copied());
        let note_types = type_table(BUILTIN_NOTE_TYPES.iter().copied());
        let default_outline_type = Arc::clone(&outline_types[DEFAULT_OUTLINE_TYPE]);
        let default_note_type = Arc::clone(&note_types[DEFAULT_NOTE_TYPE]);
        Self {
            outline_types,
            note_types,
            default_outline_type,
            default_note_type,
            tags: Mutex::new(BTreeMap::new()),
        }
    }

    /// Builds a registry from declarative config.
    ///
    /// # Errors
    /// - Returns an error when a type or tag name is blank.
    /// - Returns an error when a default type is not in its table.
    pub fn from_config(config: &TaxonomyConfig) -> Result<Self, TaxonomyConfigError> {
        if config
            .outline_types
            .iter()
            .chain(config.note_types.iter())
            .any(|name| name.trim().is_empty())
        {
            return Err(TaxonomyConfigError::BlankTypeName);
        }
        if config.tags.iter().any(|name| name.trim().is_empty()) {
            return Err(TaxonomyConfigError::BlankTagName);
        }

        let outline_types = type_table(config.outline_types.iter().map(String::as_str));
        let note_types = type_table(config.note_types.iter().map(String::as_str));

        let default_outline_name = config.default_outline_type.trim();
        let default_outline_type = outline_types
            .get(default_outline_name)
            .cloned()
            .ok_or_else(|| {
                TaxonomyConfigError::UnknownDefaultOutlineType(default_outline_name.to_string())
            })?;
        let default_note_name = config.default_note_type.trim();
        let default_note_type = note_types
            .get(default_note_name)
            .cloned()
            .ok_or_else(|| {
                TaxonomyConfigError::UnknownDefaultNoteType(default_note_name.to_string())
            })?;

        let taxonomy = Self {
            outline_types,
            note_types,
            default_outline_type,
            default_note_type,
            tags: Mutex::new(BTreeMap::new()),
        };
        for tag in &config.tags {
            taxonomy.find_or_create_tag(tag.trim());
        }

        debug!(
            "event=taxonomy_load module=taxonomy status=ok outline_types={} note_types={} tags={}",
            taxonomy.outline_types.len(),
            taxonomy.note_types.len(),
            config.tags.len()
        );
        Ok(taxonomy)
    }

    /// Looks up an outline type by exact (trimmed) name.
    pub fn outline_type(&self, name: &str) -> Option<Arc<EntityType>> {
        self.outline_types.get(name.trim()).cloned()
    }

    /// Looks up a note type by exact (trimmed) name.
    pub fn note_type(&self, name: &str) -> Option<Arc<EntityType>> {
        self.note_types.get(name.trim()).cloned()
    }

    pub fn default_outline_type(&self) -> Arc<EntityType> {
        Arc::clone(&self.default_outline_type)
    }

    pub fn default_note_type(&self) -> Arc<EntityType> {
        Arc::clone(&self.default_note_type)
    }

    /// Returns the canonical tag for `name`, creating it on first use.
    pub fn find_or_create_tag(&self, name: &str) -> Arc<Tag> {
        let mut tags = self.tags.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(tag) = tags.get(name) {
            return Arc::clone(tag);
        }
        let tag = Arc::new(Tag {
            name: name.to_string(),
        });
        tags.insert(name.to_string(), Arc::clone(&tag));
        tag
    }

    /// Returns the canonical tag for `name` without creating it.
    pub fn find_tag(&self, name: &str) -> Option<Arc<Tag>> {
        self.tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Returns interned tag names sorted by name.
    pub fn tag_names(&self) -> Vec<String> {
        self.tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn outline_type_names(&self) -> Vec<&str> {
        self.outline_types.keys().map(String::as_str).collect()
    }

    pub fn note_type_names(&self) -> Vec<&str> {
        self.note_types.keys().map(String::as_str).collect()
    }
}

fn type_table<'a>(names: impl Iterator<Item = &'a str>) -> BTreeMap<String, Arc<EntityType>> {
    names
        .map(str::trim)
        .map(|name| {
            (
                name.to_string(),
                Arc::new(EntityType {
                    name: name.to_string(),
                }),
            )
        })
        .collect()
}
