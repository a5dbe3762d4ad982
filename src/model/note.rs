//! Note - the paginated entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note record.
///
/// `id` is assigned by the store and strictly increases with insertion order,
/// which is what lets the listing treat `ORDER BY id` as a stable sequence.
/// Request bodies deserialize into this type too; absent fields fall back to
/// their defaults and the store overwrites `id` and both timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }
}
