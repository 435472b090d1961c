//! Error types shared across the pipeline.
//!
//! Only role assumption failures are recovered from (the account is skipped).
//! Everything else travels as `anyhow::Error` and ends the run.

use thiserror::Error;

/// Why temporary credentials could not be obtained for an account.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleAssumptionError {
    /// No base identity could be resolved from the profile or default chain.
    #[error("no base credentials available: {0}")]
    MissingCredentials(String),

    /// A base identity was found but is missing its access key or secret.
    #[error("incomplete base credentials: {0}")]
    PartialCredentials(String),

    /// STS answered and refused the request.
    #[error("AssumeRole rejected ({code}): {message}")]
    Rejected { code: String, message: String },

    /// The request never produced a service response.
    #[error("AssumeRole request failed: {0}")]
    Transport(String),

    /// STS answered without a credentials block.
    #[error("AssumeRole response did not contain credentials")]
    EmptyResponse,
}

/// Problems with a [`ReportConfig`](crate::config::ReportConfig), detected
/// before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid account id '{0}': expected 12 digits")]
    InvalidAccountId(String),

    #[error("role name is required (use --role-name or set role_name in the config file)")]
    MissingRoleName,

    #[error("invalid role name '{0}': expected [path/]name with segments from [A-Za-z0-9+=,.@_-] and a name of at most 64 characters")]
    InvalidRoleName(String),

    #[error("invalid session name '{0}': expected 2-64 characters from [A-Za-z0-9+=,.@_-]")]
    InvalidSessionName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_includes_code() {
        let err = RoleAssumptionError::Rejected {
            code: "AccessDenied".to_string(),
            message: "not authorized to perform sts:AssumeRole".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("AccessDenied"));
        assert!(text.contains("sts:AssumeRole"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidAccountId("1234".to_string());
        assert_eq!(err.to_string(), "invalid account id '1234': expected 12 digits");
    }
}
