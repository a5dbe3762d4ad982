use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use crate::model::User;
use crate::{Error, Result};
use super::{Database, Repository, note_unmatched, status_column};

pub(crate) const USER_COLUMNS: &str = "id, username, email, password, created, updated, status";

#[derive(Clone)]
pub struct UserStore {
    db: Database,
}

impl UserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Repository for UserStore {
    type Entity = User;
    const LABEL: &'static str = "User";

    fn create(&self, user: &User) -> Result<i64> {
        let now = Utc::now();
        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO users (username, email, password, created, updated, status)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![user.username, user.email, user.password, now, now, user.status.as_str()],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn get_by_id(&self, id: i64) -> Result<User> {
        self.db
            .with_conn(|conn| {
                conn.query_row(
                    &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                    [id],
                    row_to_user,
                )
                .optional()
            })?
            .ok_or_else(|| Error::not_found(Self::LABEL, id))
    }

    fn get_all(&self) -> Result<Vec<User>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))?;
            let users = stmt.query_map([], row_to_user)?.collect();
            users
        })
    }

    fn update(&self, id: i64, user: &User) -> Result<()> {
        let affected = self.db.with_conn(|conn| {
            conn.execute(
                r#"
                UPDATE users SET username = ?1, email = ?2, password = ?3, updated = ?4, status = ?5
                WHERE id = ?6
                "#,
                params![
                    user.username,
                    user.email,
                    user.password,
                    Utc::now(),
                    user.status.as_str(),
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
            .with_conn(|conn| conn.execute("DELETE FROM users WHERE id = ?1", [id]))?;
        note_unmatched(Self::LABEL, "delete", id, affected);
        Ok(())
    }
}

pub(crate) fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        created: row.get(4)?,
        updated: row.get(5)?,
        status: status_column(row, 6)?,
    })
}
