use super::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tag that can be linked to any number of notes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub tag_name: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: Status,
}

impl Tag {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Default::default()
        }
    }
}
