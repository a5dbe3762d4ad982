//! Rows of the many-to-many join tables

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesTag {
    pub note_id: i64,
    pub tag_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesAttachment {
    pub note_id: i64,
    pub attachment_id: i64,
}

/// Ownership link between a user and a note, stamped when created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNote {
    pub id: i64,
    pub user_id: i64,
    pub note_id: i64,
    pub created_at: DateTime<Utc>,
}
