//! Markdown representation of outlines and notes.
//!
//! # Responsibility
//! - Build outlines/notes from a consumed `SectionAst`.
//! - Render outlines/notes back to canonical markdown.
//! - Provide text and file entry points on top of the lexer.
//!
//! # Invariants
//! - `render_outline(outline_from_text(render_outline(o)))` equals
//!   `render_outline(o)` byte for byte.
//! - Expected edge cases (empty input, unknown types, missing titles) never
//!   produce errors; only I/O does.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod builder;
mod file;
pub mod render;

pub use builder::MarkdownRepresentation;
pub use render::{join_tags, render_header, render_note, render_outline};

pub type CodecResult<T> = Result<T, CodecError>;

/// Failures surfaced by the file entry points.
#[derive(Debug)]
pub enum CodecError {
    /// Backing file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}
