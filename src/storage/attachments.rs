use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use crate::model::Attachment;
use crate::{Error, Result};
use super::{Database, Repository, note_unmatched, status_column};

pub(crate) const ATTACHMENT_COLUMNS: &str = "id, title, file_link, created, updated, status";

#[derive(Clone)]
pub struct AttachmentStore {
    db: Database,
}

impl AttachmentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Repository for AttachmentStore {
    type Entity = Attachment;
    const LABEL: &'static str = "Attachment";

    fn create(&self, attachment: &Attachment) -> Result<i64> {
        let now = Utc::now();
        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO attachments (title, file_link, created, updated, status)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    attachment.title,
                    attachment.file_link,
                    now,
                    now,
                    attachment.status.as_str(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn get_by_id(&self, id: i64) -> Result<Attachment> {
        self.db
            .with_conn(|conn| {
                conn.query_row(
                    &format!("SELECT {} FROM attachments WHERE id = ?1", ATTACHMENT_COLUMNS),
                    [id],
                    row_to_attachment,
                )
                .optional()
            })?
            .ok_or_else(|| Error::not_found(Self::LABEL, id))
    }

    fn get_all(&self) -> Result<Vec<Attachment>> {
        self.db.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {} FROM attachments ORDER BY id", ATTACHMENT_COLUMNS))?;
            let attachments = stmt.query_map([], row_to_attachment)?.collect();
            attachments
        })
    }

    fn update(&self, id: i64, attachment: &Attachment) -> Result<()> {
        let affected = self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE attachments SET title = ?1, file_link = ?2, updated = ?3, status = ?4 WHERE id = ?5",
                params![
                    attachment.title,
                    attachment.file_link,
                    Utc::now(),
                    attachment.status.as_str(),
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
            .with_conn(|conn| conn.execute("DELETE FROM attachments WHERE id = ?1", [id]))?;
        note_unmatched(Self::LABEL, "delete", id, affected);
        Ok(())
    }
}

pub(crate) fn row_to_attachment(row: &rusqlite::Row) -> rusqlite::Result<Attachment> {
    Ok(Attachment {
        id: row.get(0)?,
        title: row.get(1)?,
        file_link: row.get(2)?,
        created: row.get(3)?,
        updated: row.get(4)?,
        status: status_column(row, 5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_crud() {
        let store = AttachmentStore::new(Database::open_in_memory().unwrap());

        let id = store
            .create(&Attachment::new("receipt", "files/receipt.pdf"))
            .unwrap();
        let attachment = store.get_by_id(id).unwrap();
        assert_eq!(attachment.file_link, "files/receipt.pdf");
        assert!(attachment.created.timestamp() > 0);

        store
            .update(id, &Attachment::new("receipt v2", "files/receipt-2.pdf"))
            .unwrap();
        assert_eq!(store.get_by_id(id).unwrap().title, "receipt v2");

        store.delete(id).unwrap();
        assert!(store.get_all().unwrap().is_empty());
    }
}
