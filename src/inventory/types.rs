//! Data structures flowing through the key inventory pipeline.
//!
//! Provider responses are mapped into these types at the adapter boundary
//! so the pipeline never touches SDK types directly.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::utils::time::format_create_date;

/// Status value IAM reports for usable keys
pub const ACTIVE_STATUS: &str = "Active";

/// Short-lived credentials returned by a role assumption.
///
/// Lives for one account's processing window and is never written anywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: Option<DateTime<Utc>>,
}

impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// One page of `ListUsers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPage {
    pub user_names: Vec<String>,
    /// Continuation marker; `None` on the last page
    pub next_marker: Option<String>,
}

/// Key metadata as returned by `ListAccessKeys`, any status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKeyMetadata {
    pub user_name: String,
    pub access_key_id: String,
    /// "Active" or "Inactive" (kept verbatim)
    pub status: String,
    pub create_date: DateTime<Utc>,
}

impl AccessKeyMetadata {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

/// An active key found in one account, before the account id is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveKey {
    pub user_name: String,
    pub access_key_id: String,
    pub status: String,
    /// Already formatted as `YYYY-MM-DD HH:MM:SS`
    pub create_date: String,
}

impl ActiveKey {
    pub fn from_metadata(key: &AccessKeyMetadata) -> Self {
        Self {
            user_name: key.user_name.clone(),
            access_key_id: key.access_key_id.clone(),
            status: key.status.clone(),
            create_date: format_create_date(&key.create_date),
        }
    }

    pub fn into_record(self, account_id: &str) -> AccessKeyRecord {
        AccessKeyRecord {
            user_name: self.user_name,
            access_key_id: self.access_key_id,
            status: self.status,
            create_date: self.create_date,
            account_id: account_id.to_string(),
        }
    }
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessKeyRecord {
    pub user_name: String,
    pub access_key_id: String,
    pub status: String,
    pub create_date: String,
    pub account_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = TemporaryCredentials {
            access_key_id: "ASIAEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI".to_string(),
            session_token: "FwoGZXIvYXdzE".to_string(),
            expiration: None,
        };
        let text = format!("{:?}", creds);
        assert!(text.contains("ASIAEXAMPLE"));
        assert!(!text.contains("wJalrXUtnFEMI"));
        assert!(!text.contains("FwoGZXIvYXdzE"));
    }

    #[test]
    fn test_active_key_into_record() {
        let key = AccessKeyMetadata {
            user_name: "alice".to_string(),
            access_key_id: "AKIAALICE1".to_string(),
            status: "Active".to_string(),
            create_date: Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap(),
        };
        assert!(key.is_active());

        let record = ActiveKey::from_metadata(&key).into_record("111111111111");
        assert_eq!(record.create_date, "2023-01-02 03:04:05");
        assert_eq!(record.account_id, "111111111111");
        assert_eq!(record.user_name, "alice");
    }

    #[test]
    fn test_status_match_is_exact() {
        let key = AccessKeyMetadata {
            user_name: "bob".to_string(),
            access_key_id: "AKIABOB".to_string(),
            status: "active".to_string(),
            create_date: Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap(),
        };
        assert!(!key.is_active());
    }
}
