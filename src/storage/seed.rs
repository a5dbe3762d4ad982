//! Bulk loader for random notes, for exercising pagination on large tables

use chrono::Utc;
use rand::Rng;
use rusqlite::params;
use crate::{Error, Result};
use super::Database;

const TITLE_LEN: usize = 10;
const CONTENT_LEN: usize = 200;
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const LETTERS_AND_SPACE: &[u8] = b"abcdefghijklmnopqrstuvwxyz ";

fn random_text(rng: &mut impl Rng, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Insert `count` random notes, committing every `batch_size` rows.
///
/// `on_batch` is called after each commit with the number of rows it added.
/// Returns the number of notes inserted.
pub fn seed_notes(
    db: &Database,
    count: usize,
    batch_size: usize,
    mut on_batch: impl FnMut(usize),
) -> Result<usize> {
    if batch_size == 0 {
        return Err(Error::Validation("batch size must be positive".into()));
    }

    let mut rng = rand::thread_rng();
    let mut inserted = 0;

    while inserted < count {
        let batch = batch_size.min(count - inserted);
        let rows: Vec<(String, String)> = (0..batch)
            .map(|_| {
                (
                    random_text(&mut rng, LETTERS, TITLE_LEN),
                    random_text(&mut rng, LETTERS_AND_SPACE, CONTENT_LEN),
                )
            })
            .collect();

        db.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare_cached(
                    "INSERT INTO notes (title, content, created, updated) VALUES (?1, ?2, ?3, ?4)",
                )?;
                let now = Utc::now();
                for (title, content) in &rows {
                    stmt.execute(params![title, content, now, now])?;
                }
            }
            tx.commit()
        })?;

        inserted += batch;
        tracing::debug!(inserted, count, "Seed batch committed");
        on_batch(batch);
    }

    Ok(inserted)
}
