//! Markdown codec for mindmark outlines.
//! Maps markdown with metadata comments to outlines/notes and back.

pub mod logging;
pub mod markdown;
pub mod model;
pub mod representation;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use markdown::ast::{Metadata, Section, SectionAst};
pub use markdown::lexer::lex;
pub use model::note::Note;
pub use model::outline::{Outline, OutlineId};
pub use model::taxonomy::{EntityType, Tag, Taxonomy, TaxonomyConfig, TaxonomyConfigError};
pub use model::Timestamp;
pub use representation::{
    join_tags, render_header, render_note, render_outline, CodecError, CodecResult,
    MarkdownRepresentation,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
