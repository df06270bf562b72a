//! Session-related types.
//!
//! Types persisted by the session gate for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Username the session was opened with.
    pub username: String,
    /// When the session was opened. Absent in records written before it was tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_in_at: Option<DateTime<Utc>>,
}

/// Persisted authentication state.
///
/// A record is only honoured when `is_authenticated` is set and a user is
/// present; anything else is treated as signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub is_authenticated: bool,
    pub user: Option<CurrentUser>,
}

impl SessionRecord {
    /// A signed-in record for `username`.
    #[must_use]
    pub fn signed_in(username: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            user: Some(CurrentUser {
                username: username.into(),
                signed_in_at: Some(Utc::now()),
            }),
        }
    }

    /// The user, if the record describes a valid signed-in session.
    #[must_use]
    pub fn active_user(&self) -> Option<&CurrentUser> {
        if self.is_authenticated {
            self.user.as_ref()
        } else {
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_in_is_active() {
        let record = SessionRecord::signed_in("admin");
        assert_eq!(record.active_user().unwrap().username, "admin");
    }

    #[test]
    fn test_inconsistent_records_are_inactive() {
        let no_user = SessionRecord {
            is_authenticated: true,
            user: None,
        };
        assert!(no_user.active_user().is_none());

        let not_authenticated = SessionRecord {
            is_authenticated: false,
            user: Some(CurrentUser {
                username: "admin".to_string(),
                signed_in_at: None,
            }),
        };
        assert!(not_authenticated.active_user().is_none());
    }

    #[test]
    fn test_reads_record_without_timestamp() {
        let json = r#"{"isAuthenticated": true, "user": {"username": "admin"}}"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        let user = record.active_user().unwrap();
        assert_eq!(user.username, "admin");
        assert!(user.signed_in_at.is_none());
    }
}
