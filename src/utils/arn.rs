//! Role ARN construction and validation of the identifiers that go into it.

use crate::error::ConfigError;

/// Build the ARN of `role_name` in `account_id`.
pub fn role_arn(account_id: &str, role_name: &str) -> String {
    format!("arn:aws:iam::{}:role/{}", account_id, role_name)
}

pub fn validate_account_id(account_id: &str) -> Result<(), ConfigError> {
    if account_id.len() == 12 && account_id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidAccountId(account_id.to_string()))
    }
}

/// Role names may carry a path prefix (`ops/auditor`). The 64 character
/// limit applies to the final segment only; empty segments are rejected.
pub fn validate_role_name(role_name: &str) -> Result<(), ConfigError> {
    if role_name.is_empty() {
        return Err(ConfigError::MissingRoleName);
    }

    let invalid = || ConfigError::InvalidRoleName(role_name.to_string());
    let segments: Vec<&str> = role_name.split('/').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(invalid());
    }
    if !segments.iter().all(|segment| segment.chars().all(is_name_char)) {
        return Err(invalid());
    }
    match segments.last() {
        Some(name) if name.len() <= 64 => Ok(()),
        _ => Err(invalid()),
    }
}

pub fn validate_session_name(session_name: &str) -> Result<(), ConfigError> {
    let len = session_name.len();
    if (2..=64).contains(&len) && session_name.chars().all(is_name_char) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSessionName(session_name.to_string()))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '=' | ',' | '.' | '@' | '_' | '-')
}
