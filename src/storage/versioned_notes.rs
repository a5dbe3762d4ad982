use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use crate::model::VersionedNote;
use crate::{Error, Result};
use super::{Database, Repository, note_unmatched, status_column};

const VERSIONED_NOTE_COLUMNS: &str =
    "id, title, content, note_type_id, note_id, created, updated, status";

#[derive(Clone)]
pub struct VersionedNoteStore {
    db: Database,
}

impl VersionedNoteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Revisions of one note, oldest first
    pub fn for_note(&self, note_id: i64) -> Result<Vec<VersionedNote>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM versioned_notes WHERE note_id = ?1 ORDER BY id",
                VERSIONED_NOTE_COLUMNS
            ))?;
            let versions = stmt.query_map([note_id], row_to_versioned_note)?.collect();
            versions
        })
    }
}

impl Repository for VersionedNoteStore {
    type Entity = VersionedNote;
    const LABEL: &'static str = "Versioned note";

    fn create(&self, version: &VersionedNote) -> Result<i64> {
        let now = Utc::now();
        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO versioned_notes (title, content, note_type_id, note_id, created, updated, status)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    version.title,
                    version.content,
                    version.note_type_id,
                    version.note_id,
                    now,
                    now,
                    version.status.as_str(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn get_by_id(&self, id: i64) -> Result<VersionedNote> {
        self.db
            .with_conn(|conn| {
                conn.query_row(
                    &format!("SELECT {} FROM versioned_notes WHERE id = ?1", VERSIONED_NOTE_COLUMNS),
                    [id],
                    row_to_versioned_note,
                )
                .optional()
            })?
            .ok_or_else(|| Error::not_found(Self::LABEL, id))
    }

    fn get_all(&self) -> Result<Vec<VersionedNote>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM versioned_notes ORDER BY id",
                VERSIONED_NOTE_COLUMNS
            ))?;
            let versions = stmt.query_map([], row_to_versioned_note)?.collect();
            versions
        })
    }

    fn update(&self, id: i64, version: &VersionedNote) -> Result<()> {
        let affected = self.db.with_conn(|conn| {
            conn.execute(
                r#"
                UPDATE versioned_notes
                SET title = ?1, content = ?2, note_type_id = ?3, note_id = ?4, updated = ?5, status = ?6
                WHERE id = ?7
                "#,
                params![
                    version.title,
                    version.content,
                    version.note_type_id,
                    version.note_id,
                    Utc::now(),
                    version.status.as_str(),
                    id,
                ],
            )
        })?;
        note_unmatched(Self::LABEL, "update", id, affected);
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<()> {
        let affected = self
            .db
            .with_conn(|conn| conn.execute("DELETE FROM versioned_notes WHERE id = ?1", [id]))?;
        note_unmatched(Self::LABEL, "delete", id, affected);
        Ok(())
    }
}

fn row_to_versioned_note(row: &rusqlite::Row) -> rusqlite::Result<VersionedNote> {
    Ok(VersionedNote {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        note_type_id: row.get(3)?,
        note_id: row.get(4)?,
        created: row.get(5)?,
        updated: row.get(6)?,
        status: status_column(row, 7)?,
    })
}
