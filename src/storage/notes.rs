//! Note repository, including the three queries behind the paginated listing

use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use crate::model::Note;
use crate::pagination::PageSource;
use crate::{Error, Result};
use super::{Database, Repository, note_unmatched};

pub(crate) const NOTE_COLUMNS: &str = "id, title, content, created, updated";

#[derive(Clone)]
pub struct NoteStore {
    db: Database,
}

impl NoteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Count every row in `notes`, regardless of status
    pub fn count(&self) -> Result<i64> {
        self.db
            .with_conn(|conn| conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0)))
    }

    /// Id of the row at `offset` in ascending id order.
    ///
    /// Re-scans from the start of the table on every call.
    pub fn id_at_offset(&self, offset: i64) -> Result<Option<i64>> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT id FROM notes ORDER BY id LIMIT 1 OFFSET ?1",
                [offset],
                |row| row.get(0),
            )
            .optional()
        })
    }

    /// Up to `limit` notes with `id >= lower_bound`, ascending
    pub fn page_from(&self, lower_bound: i64, limit: i64) -> Result<Vec<Note>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {} FROM notes WHERE id >= ?1 ORDER BY id LIMIT ?2",
                NOTE_COLUMNS
            ))?;
            let notes = stmt.query_map([lower_bound, limit], row_to_note)?.collect();
            notes
        })
    }
}

impl Repository for NoteStore {
    type Entity = Note;
    const LABEL: &'static str = "Note";

    fn create(&self, note: &Note) -> Result<i64> {
        let now = Utc::now();
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO notes (title, content, created, updated) VALUES (?1, ?2, ?3, ?4)",
                params![note.title, note.content, now, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn get_by_id(&self, id: i64) -> Result<Note> {
        self.db
            .with_conn(|conn| {
                conn.query_row(
                    &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
                    [id],
                    row_to_note,
                )
                .optional()
            })?
            .ok_or_else(|| Error::not_found(Self::LABEL, id))
    }

    fn get_all(&self) -> Result<Vec<Note>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {} FROM notes ORDER BY id", NOTE_COLUMNS))?;
            let notes = stmt.query_map([], row_to_note)?.collect();
            notes
        })
    }

    fn update(&self, id: i64, note: &Note) -> Result<()> {
        let affected = self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE notes SET title = ?1, content = ?2, updated = ?3 WHERE id = ?4",
                params![note.title, note.content, Utc::now(), id],
            )
        })?;
        note_unmatched(Self::LABEL, "update", id, affected);
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<()> {
        let affected = self
            .db
            .with_conn(|conn| conn.execute("DELETE FROM notes WHERE id = ?1", [id]))?;
        note_unmatched(Self::LABEL, "delete", id, affected);
        Ok(())
    }
}

impl PageSource for NoteStore {
    type Item = Note;

    fn count(&self) -> Result<i64> {
        NoteStore::count(self)
    }

    fn id_at_offset(&self, offset: i64) -> Result<Option<i64>> {
        NoteStore::id_at_offset(self, offset)
    }

    fn fetch_from(&self, lower_bound: i64, limit: i64) -> Result<Vec<Note>> {
        self.page_from(lower_bound, limit)
    }
}

/// Helper to convert a row selected with [`NOTE_COLUMNS`] to a Note
pub(crate) fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created: row.get(3)?,
        updated: row.get(4)?,
    })
}
