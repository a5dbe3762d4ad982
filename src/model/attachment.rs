use super::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file reference; the file itself lives wherever `file_link` points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attachment {
    pub id: i64,
    pub title: String,
    pub file_link: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: Status,
}

impl Attachment {
    pub fn new(title: impl Into<String>, file_link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            file_link: file_link.into(),
            ..Default::default()
        }
    }
}
