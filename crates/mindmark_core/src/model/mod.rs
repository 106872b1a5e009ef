//! Domain model for outlines, notes and their taxonomy.
//!
//! # Responsibility
//! - Define the in-memory object graph produced by the markdown codec.
//! - Keep types and tags registry-owned; entities hold shared references.
//!
//! # Invariants
//! - An outline exclusively owns its notes.
//! - Every outline/note carries a type, falling back to the registry default.

pub mod note;
pub mod outline;
pub mod taxonomy;

/// Unix epoch seconds. Zero means "not set".
pub type Timestamp = i64;
