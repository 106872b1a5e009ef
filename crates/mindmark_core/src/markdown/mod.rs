//! Markdown source layer: section AST, lexer and timestamp helpers.
//!
//! # Responsibility
//! - Turn raw markdown into an owned `SectionAst` handed to the builders.
//! - Own the textual timestamp format of the metadata comment.

pub mod ast;
pub mod datetime;
pub mod lexer;
