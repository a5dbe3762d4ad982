use super::Status;
use serde::{Deserialize, Serialize};

/// Lookup row classifying notes. Row 1 is seeded at schema creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoteType {
    pub id: i64,
    pub type_name: String,
    pub description: String,
    pub status: Status,
}

impl NoteType {
    pub fn new(type_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: description.into(),
            ..Default::default()
        }
    }
}
