use super::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved revision of a note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionedNote {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub note_type_id: i64,
    pub note_id: i64,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: Status,
}

#[cfg(test)]
impl VersionedNote {
    /// Snapshot `note` as a revision of the given type
    pub fn of(note: &super::Note, note_type_id: i64) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            note_type_id,
            note_id: note.id,
            ..Default::default()
        }
    }
}
