use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use crate::model::Tag;
use crate::{Error, Result};
use super::{Database, Repository, note_unmatched, status_column};

pub(crate) const TAG_COLUMNS: &str = "id, tag_name, created, updated, status";

#[derive(Clone)]
pub struct TagStore {
    db: Database,
}

impl TagStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Repository for TagStore {
    type Entity = Tag;
    const LABEL: &'static str = "Tag";

    fn create(&self, tag: &Tag) -> Result<i64> {
        let now = Utc::now();
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tags (tag_name, created, updated, status) VALUES (?1, ?2, ?3, ?4)",
                params![tag.tag_name, now, now, tag.status.as_str()],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn get_by_id(&self, id: i64) -> Result<Tag> {
        self.db
            .with_conn(|conn| {
                conn.query_row(
                    &format!("SELECT {} FROM tags WHERE id = ?1", TAG_COLUMNS),
                    [id],
                    row_to_tag,
                )
                .optional()
            })?
            .ok_or_else(|| Error::not_found(Self::LABEL, id))
    }

    fn get_all(&self) -> Result<Vec<Tag>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {} FROM tags ORDER BY id", TAG_COLUMNS))?;
            let tags = stmt.query_map([], row_to_tag)?.collect();
            tags
        })
    }

    fn update(&self, id: i64, tag: &Tag) -> Result<()> {
        let affected = self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE tags SET tag_name = ?1, updated = ?2, status = ?3 WHERE id = ?4",
                params![tag.tag_name, Utc::now(), tag.status.as_str(), id],
            )
        })?;
        note_unmatched(Self::LABEL, "update", id, affected);
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<()> {
        let affected = self
            .db
            .with_conn(|conn| conn.execute("DELETE FROM tags WHERE id = ?1", [id]))?;
        note_unmatched(Self::LABEL, "delete", id, affected);
        Ok(())
    }
}

/// Helper to convert a row selected with [`TAG_COLUMNS`] to a Tag
pub(crate) fn row_to_tag(row: &rusqlite::Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        tag_name: row.get(1)?,
        created: row.get(2)?,
        updated: row.get(3)?,
        status: status_column(row, 4)?,
    })
}
