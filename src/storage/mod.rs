//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - notes(id, title, content, note_type_id, created, updated, status)
//! - tags, attachments, users, note_types, versioned_notes
//! - notes_tags, notes_attachments, user_notes (join tables)
//!
//! Every entity table has a repository implementing [`Repository`]; the join
//! tables have association repositories in [`associations`].

pub mod associations;
pub mod attachments;
pub mod database;
pub mod note_types;
pub mod notes;
pub mod schema;
pub mod seed;
pub mod tags;
pub mod users;
pub mod versioned_notes;

pub use associations::{NotesAttachmentStore, NotesTagStore, UserNotesStore};
pub use attachments::AttachmentStore;
pub use database::{Database, DbStats};
pub use note_types::NoteTypeStore;
pub use notes::NoteStore;
pub use seed::seed_notes;
pub use tags::TagStore;
pub use users::UserStore;
pub use versioned_notes::VersionedNoteStore;

use crate::Result;
use crate::model::Status;

/// Uniform CRUD contract over one entity table.
///
/// `update` and `delete` succeed even when no row matches the id; the
/// affected-row count is only logged.
pub trait Repository: Clone + Send + Sync + 'static {
    type Entity: Send + 'static;

    /// Human-readable entity name used in messages ("Note", "Tag", ...)
    const LABEL: &'static str;

    /// Insert a row and return its store-assigned id.
    /// Timestamps are set to the current time; the entity's own values are ignored.
    fn create(&self, entity: &Self::Entity) -> Result<i64>;

    /// Fails with [`crate::Error::NotFound`] when no row has this id
    fn get_by_id(&self, id: i64) -> Result<Self::Entity>;

    /// All rows in ascending id order; empty when the table is
    fn get_all(&self) -> Result<Vec<Self::Entity>>;

    fn update(&self, id: i64, entity: &Self::Entity) -> Result<()>;

    fn delete(&self, id: i64) -> Result<()>;
}

/// Decode a status column, rejecting values outside `active`/`deleted`
pub(crate) fn status_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Status> {
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e: crate::Error| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Log writes that matched nothing. Callers still report success.
pub(crate) fn note_unmatched(label: &str, op: &str, id: i64, affected: usize) {
    if affected == 0 {
        tracing::debug!(entity = label, op, id, "statement matched no rows");
    }
}
