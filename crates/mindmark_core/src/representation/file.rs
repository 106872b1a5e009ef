//! File-level entry points.
//!
//! # Side effects
//! - Reads whole documents from disk before lexing.
//! - Emits `outline_load`/`note_load` logging events with duration and status.

use crate::markdown::datetime::{datetime_to_pretty, now};
use crate::markdown::lexer::lex;
use crate::model::note::Note;
use crate::model::outline::Outline;
use crate::model::Timestamp;
use crate::representation::builder::MarkdownRepresentation;
use crate::representation::{CodecError, CodecResult};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, UNIX_EPOCH};

impl MarkdownRepresentation<'_> {
    /// Loads an outline from a markdown file and stamps file bookkeeping.
    ///
    /// # Errors
    /// - Returns `CodecError::Io` when the file cannot be read as UTF-8 text.
    pub fn outline_from_file(&self, path: impl AsRef<Path>) -> CodecResult<Outline> {
        let path = path.as_ref();
        let started_at = Instant::now();

        let (text, file_size, file_modified) = match read_document(path) {
            Ok(read) => read,
            Err(err) => {
                error!(
                    "event=outline_load module=representation status=error duration_ms={} error_code=read_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        let mut outline = self.outline(lex(&text));
        outline.key = fs::canonicalize(path)
            .unwrap_or_else(|_| path.to_path_buf())
            .to_string_lossy()
            .into_owned();
        outline.byte_size = file_size;
        outline.complete_properties(file_modified);
        outline.modified_pretty = datetime_to_pretty(outline.modified, now());

        info!(
            "event=outline_load module=representation status=ok duration_ms={} bytes={} notes={}",
            started_at.elapsed().as_millis(),
            outline.byte_size,
            outline.notes().len()
        );
        Ok(outline)
    }

    /// Loads a single standalone note from a markdown fragment file.
    ///
    /// Returns `Ok(None)` when the file contains no sections.
    ///
    /// # Errors
    /// - Returns `CodecError::Io` when the file cannot be read as UTF-8 text.
    pub fn note_from_file(&self, path: impl AsRef<Path>) -> CodecResult<Option<Note>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
        let note = self.note_from_text(&text);
        info!(
            "event=note_load module=representation status=ok found={}",
            note.is_some()
        );
        Ok(note)
    }
}

fn read_document(path: &Path) -> CodecResult<(String, u64, Timestamp)> {
    let text = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    let metadata = fs::metadata(path).map_err(|source| io_error(path, source))?;
    let modified = metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |elapsed| {
            Timestamp::try_from(elapsed.as_secs()).unwrap_or(Timestamp::MAX)
        });
    Ok((text, metadata.len(), modified))
}

fn io_error(path: &Path, source: std::io::Error) -> CodecError {
    CodecError::Io {
        path: PathBuf::from(path),
        source,
    }
}
