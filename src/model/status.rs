//! Soft-delete status shared by every status-bearing table.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Row status stored as text and constrained to `active` / `deleted`.
///
/// Nothing in the listing path filters on it; it is carried so that clients
/// can mark rows without physically removing them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Deleted,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Deleted => "deleted",
        }
    }

    pub fn all() -> &'static [Status] {
        &[Status::Active, Status::Deleted]
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(Status::Active),
            "deleted" => Ok(Status::Deleted),
            _ => {
                let expected: Vec<&str> = Status::all().iter().map(Status::as_str).collect();
                Err(Error::Validation(format!(
                    "Unknown status: {} (expected one of {})",
                    s,
                    expected.join(", ")
                )))
            }
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in Status::all() {
            let parsed: Status = status.as_str().parse().unwrap();
            assert_eq!(*status, parsed);
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!(matches!("archived".parse::<Status>(), Err(Error::Validation(_))));
        // stored values are lowercase only
        assert!("Active".parse::<Status>().is_err());
    }

    #[test]
    fn test_unknown_status_message_lists_choices() {
        let err = "archived".parse::<Status>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown status: archived (expected one of active, deleted)"
        );
    }

    #[test]
    fn test_status_defaults_to_active() {
        assert_eq!(Status::default(), Status::Active);
        let json = serde_json::to_string(&Status::Deleted).unwrap();
        assert_eq!(json, "\"deleted\"");
    }
}
