//! # Aweshore - note-taking backend
//!
//! REST handlers over a SQLite store of notes, tags, attachments, users,
//! note types and versioned notes.
//!
//! Aweshore provides:
//! - One explicitly constructed [`Database`] handle shared by every repository
//! - Uniform CRUD repositories behind the [`storage::Repository`] trait
//! - Association repositories for the note/tag, note/attachment and user/note links
//! - An offset-based pagination engine for the notes listing
//! - An axum HTTP server exposing all of the above as JSON

pub mod config;
pub mod model;
pub mod pagination;
pub mod server;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use model::{Attachment, Note, NoteType, Status, Tag, User, VersionedNote};
pub use pagination::{Page, PageMeta};
pub use storage::{Database, NoteStore, Repository};

/// Result type alias for Aweshore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Aweshore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed client input (bad id, bad body, non-positive page size)
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database connection lock poisoned")]
    LockPoisoned,
}

impl Error {
    pub fn not_found(label: &str, id: i64) -> Self {
        Error::NotFound(format!("{} {} not found", label, id))
    }
}
