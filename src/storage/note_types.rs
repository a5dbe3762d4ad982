use rusqlite::{OptionalExtension, params};
use crate::model::NoteType;
use crate::{Error, Result};
use super::{Database, Repository, note_unmatched, status_column};

const NOTE_TYPE_COLUMNS: &str = "id, type_name, description, status";

/// Repository for the `note_types` lookup table. Rows carry no timestamps.
#[derive(Clone)]
pub struct NoteTypeStore {
    db: Database,
}

impl NoteTypeStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Repository for NoteTypeStore {
    type Entity = NoteType;
    const LABEL: &'static str = "Note type";

    fn create(&self, note_type: &NoteType) -> Result<i64> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO note_types (type_name, description, status) VALUES (?1, ?2, ?3)",
                params![note_type.type_name, note_type.description, note_type.status.as_str()],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn get_by_id(&self, id: i64) -> Result<NoteType> {
        self.db
            .with_conn(|conn| {
                conn.query_row(
                    &format!("SELECT {} FROM note_types WHERE id = ?1", NOTE_TYPE_COLUMNS),
                    [id],
                    row_to_note_type,
                )
                .optional()
            })?
            .ok_or_else(|| Error::not_found(Self::LABEL, id))
    }

    fn get_all(&self) -> Result<Vec<NoteType>> {
        self.db.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {} FROM note_types ORDER BY id", NOTE_TYPE_COLUMNS))?;
            let note_types = stmt.query_map([], row_to_note_type)?.collect();
            note_types
        })
    }

    fn update(&self, id: i64, note_type: &NoteType) -> Result<()> {
        let affected = self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE note_types SET type_name = ?1, description = ?2, status = ?3 WHERE id = ?4",
                params![
                    note_type.type_name,
                    note_type.description,
                    note_type.status.as_str(),
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
            .with_conn(|conn| conn.execute("DELETE FROM note_types WHERE id = ?1", [id]))?;
        note_unmatched(Self::LABEL, "delete", id, affected);
        Ok(())
    }
}

fn row_to_note_type(row: &rusqlite::Row) -> rusqlite::Result<NoteType> {
    Ok(NoteType {
        id: row.get(0)?,
        type_name: row.get(1)?,
        description: row.get(2)?,
        status: status_column(row, 3)?,
    })
}
