//! Association repositories for the many-to-many join tables
//!
//! Links are plain rows: nothing checks that either side exists, and deleting
//! a note, tag, attachment or user does not remove its links.

use chrono::Utc;
use rusqlite::params;
use crate::model::{Attachment, Note, NotesAttachment, NotesTag, Tag, User, UserNote};
use crate::Result;
use super::Database;
use super::attachments::{ATTACHMENT_COLUMNS, row_to_attachment};
use super::notes::{NOTE_COLUMNS, row_to_note};
use super::tags::{TAG_COLUMNS, row_to_tag};
use super::users::{USER_COLUMNS, row_to_user};

/// Prefix every column in a comma-separated list with a table alias
fn qualified(alias: &str, columns: &str) -> String {
    columns
        .split(", ")
        .map(|c| format!("{}.{}", alias, c))
        .collect::<Vec<_>>()
        .join(", ")
}

// ========== Notes <-> Tags ==========

#[derive(Clone)]
pub struct NotesTagStore {
    db: Database,
}

impl NotesTagStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Fails with a storage error if the pair is already linked
    pub fn link(&self, note_id: i64, tag_id: i64) -> Result<NotesTag> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO notes_tags (note_id, tag_id) VALUES (?1, ?2)",
                [note_id, tag_id],
            )
        })?;
        Ok(NotesTag { note_id, tag_id })
    }

    pub fn unlink(&self, note_id: i64, tag_id: i64) -> Result<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "DELETE FROM notes_tags WHERE note_id = ?1 AND tag_id = ?2",
                [note_id, tag_id],
            )
        })?;
        Ok(())
    }

    pub fn tags_for_note(&self, note_id: i64) -> Result<Vec<Tag>> {
        let sql = format!(
            "SELECT {} FROM tags t INNER JOIN notes_tags nt ON t.id = nt.tag_id WHERE nt.note_id = ?1 ORDER BY t.id",
            qualified("t", TAG_COLUMNS)
        );
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let tags = stmt.query_map([note_id], row_to_tag)?.collect();
            tags
        })
    }

    pub fn notes_for_tag(&self, tag_id: i64) -> Result<Vec<Note>> {
        let sql = format!(
            "SELECT {} FROM notes n INNER JOIN notes_tags nt ON n.id = nt.note_id WHERE nt.tag_id = ?1 ORDER BY n.id",
            qualified("n", NOTE_COLUMNS)
        );
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let notes = stmt.query_map([tag_id], row_to_note)?.collect();
            notes
        })
    }
}

// ========== Notes <-> Attachments ==========

#[derive(Clone)]
pub struct NotesAttachmentStore {
    db: Database,
}

impl NotesAttachmentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn link(&self, note_id: i64, attachment_id: i64) -> Result<NotesAttachment> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO notes_attachments (note_id, attachment_id) VALUES (?1, ?2)",
                [note_id, attachment_id],
            )
        })?;
        Ok(NotesAttachment { note_id, attachment_id })
    }

    pub fn unlink(&self, note_id: i64, attachment_id: i64) -> Result<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "DELETE FROM notes_attachments WHERE note_id = ?1 AND attachment_id = ?2",
                [note_id, attachment_id],
            )
        })?;
        Ok(())
    }

    pub fn attachments_for_note(&self, note_id: i64) -> Result<Vec<Attachment>> {
        let sql = format!(
            "SELECT {} FROM attachments a INNER JOIN notes_attachments na ON a.id = na.attachment_id WHERE na.note_id = ?1 ORDER BY a.id",
            qualified("a", ATTACHMENT_COLUMNS)
        );
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let attachments = stmt.query_map([note_id], row_to_attachment)?.collect();
            attachments
        })
    }

    pub fn notes_for_attachment(&self, attachment_id: i64) -> Result<Vec<Note>> {
        let sql = format!(
            "SELECT {} FROM notes n INNER JOIN notes_attachments na ON n.id = na.note_id WHERE na.attachment_id = ?1 ORDER BY n.id",
            qualified("n", NOTE_COLUMNS)
        );
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let notes = stmt.query_map([attachment_id], row_to_note)?.collect();
            notes
        })
    }
}

// ========== Users <-> Notes ==========

#[derive(Clone)]
pub struct UserNotesStore {
    db: Database,
}

impl UserNotesStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Link a note to a user, stamping the link with the current time
    pub fn link(&self, user_id: i64, note_id: i64) -> Result<UserNote> {
        let created_at = Utc::now();
        let id = self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO user_notes (user_id, note_id, created_at) VALUES (?1, ?2, ?3)",
                params![user_id, note_id, created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        Ok(UserNote {
            id,
            user_id,
            note_id,
            created_at,
        })
    }

    pub fn unlink(&self, user_id: i64, note_id: i64) -> Result<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "DELETE FROM user_notes WHERE user_id = ?1 AND note_id = ?2",
                [user_id, note_id],
            )
        })?;
        Ok(())
    }

    pub fn notes_for_user(&self, user_id: i64) -> Result<Vec<Note>> {
        let sql = format!(
            "SELECT {} FROM notes n INNER JOIN user_notes un ON n.id = un.note_id WHERE un.user_id = ?1 ORDER BY n.id",
            qualified("n", NOTE_COLUMNS)
        );
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let notes = stmt.query_map([user_id], row_to_note)?.collect();
            notes
        })
    }

    pub fn users_for_note(&self, note_id: i64) -> Result<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM users u INNER JOIN user_notes un ON u.id = un.user_id WHERE un.note_id = ?1 ORDER BY u.id",
            qualified("u", USER_COLUMNS)
        );
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let users = stmt.query_map([note_id], row_to_user)?.collect();
            users
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::storage::{AttachmentStore, NoteStore, Repository, TagStore, UserStore};

    struct Fixture {
        notes: NoteStore,
        tags: TagStore,
        attachments: AttachmentStore,
        users: UserStore,
        db: Database,
    }

    fn fixture() -> Fixture {
        let db = Database::open_in_memory().unwrap();
        Fixture {
            notes: NoteStore::new(db.clone()),
            tags: TagStore::new(db.clone()),
            attachments: AttachmentStore::new(db.clone()),
            users: UserStore::new(db.clone()),
            db,
        }
    }

    #[test]
    fn test_qualified_columns() {
        assert_eq!(qualified("t", "id, tag_name"), "t.id, t.tag_name");
    }

    #[test]
    fn test_notes_tags_both_directions() {
        let f = fixture();
        let links = NotesTagStore::new(f.db.clone());

        let n1 = f.notes.create(&Note::new("one", "")).unwrap();
        let n2 = f.notes.create(&Note::new("two", "")).unwrap();
        let work = f.tags.create(&Tag::new("work")).unwrap();
        let home = f.tags.create(&Tag::new("home")).unwrap();

        links.link(n1, work).unwrap();
        links.link(n1, home).unwrap();
        links.link(n2, work).unwrap();

        let tags: Vec<String> = links.tags_for_note(n1).unwrap().into_iter().map(|t| t.tag_name).collect();
        assert_eq!(tags, vec!["work", "home"]);

        let notes: Vec<i64> = links.notes_for_tag(work).unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(notes, vec![n1, n2]);

        links.unlink(n1, work).unwrap();
        assert_eq!(links.notes_for_tag(work).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_link_is_storage_error() {
        let f = fixture();
        let links = NotesTagStore::new(f.db.clone());
        links.link(1, 1).unwrap();
        assert!(matches!(links.link(1, 1), Err(Error::Storage(_))));
    }

    #[test]
    fn test_delete_does_not_cascade_to_links() {
        let f = fixture();
        let links = NotesTagStore::new(f.db.clone());

        let note = f.notes.create(&Note::new("doomed", "")).unwrap();
        let tag = f.tags.create(&Tag::new("t")).unwrap();
        links.link(note, tag).unwrap();

        f.notes.delete(note).unwrap();

        // the join row survives; the lookup simply finds no note to join
        assert!(links.notes_for_tag(tag).unwrap().is_empty());
        assert_eq!(f.db.stats().unwrap().count("notes_tags"), Some(1));
    }

    #[test]
    fn test_notes_attachments_both_directions() {
        let f = fixture();
        let links = NotesAttachmentStore::new(f.db.clone());

        let note = f.notes.create(&Note::new("trip", "")).unwrap();
        let photo = f.attachments.create(&Attachment::new("photo", "img/1.jpg")).unwrap();

        let row = links.link(note, photo).unwrap();
        assert_eq!(row, NotesAttachment { note_id: note, attachment_id: photo });

        assert_eq!(links.attachments_for_note(note).unwrap()[0].file_link, "img/1.jpg");
        assert_eq!(links.notes_for_attachment(photo).unwrap()[0].title, "trip");

        links.unlink(note, photo).unwrap();
        assert!(links.attachments_for_note(note).unwrap().is_empty());
    }

    #[test]
    fn test_user_notes_both_directions() {
        let f = fixture();
        let links = UserNotesStore::new(f.db.clone());

        let user = f.users.create(&User::new("ada", "ada@example.com", "pw")).unwrap();
        let note = f.notes.create(&Note::new("mine", "")).unwrap();

        let row = links.link(user, note).unwrap();
        assert!(row.id > 0);
        assert_eq!(row.user_id, user);

        assert_eq!(links.notes_for_user(user).unwrap()[0].id, note);
        assert_eq!(links.users_for_note(note).unwrap()[0].username, "ada");

        links.unlink(user, note).unwrap();
        assert!(links.notes_for_user(user).unwrap().is_empty());
    }
}
