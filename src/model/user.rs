use super::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account.
///
/// `password` is accepted in request bodies and stored as given, but never
/// written back out in responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: Status,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }
}
