//! Run configuration.
//!
//! A [`ReportConfig`] carries everything one report run needs: the target
//! accounts, the role to assume in each of them, and where to write the CSV.
//! It is assembled by the CLI, optionally starting from a JSON file:
//!
//! ```json
//! {
//!   "accounts": ["111111111111", "222222222222"],
//!   "role_name": "auditor",
//!   "report_name": "keys.csv",
//!   "session_name": "AssumeRoleSession",
//!   "profile": "security",
//!   "region": "us-east-1"
//! }
//! ```
//!
//! Only `accounts` and `role_name` are required in the file; CLI arguments
//! override whatever the file sets.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::utils::arn::{validate_account_id, validate_role_name, validate_session_name};

pub const DEFAULT_REPORT_NAME: &str = "boto_credentials.csv";
pub const DEFAULT_SESSION_NAME: &str = "AssumeRoleSession";

fn default_report_name() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_NAME)
}

fn default_session_name() -> String {
    DEFAULT_SESSION_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub role_name: String,
    #[serde(default = "default_report_name")]
    pub report_name: PathBuf,
    #[serde(default = "default_session_name")]
    pub session_name: String,
    /// Named profile for the base identity; default chain when unset
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

/// Values supplied on the command line; `None`/empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub accounts: Vec<String>,
    pub role_name: Option<String>,
    pub report_name: Option<PathBuf>,
    pub session_name: Option<String>,
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl ReportConfig {
    pub fn new(accounts: Vec<String>, role_name: impl Into<String>) -> Self {
        Self {
            accounts,
            role_name: role_name.into(),
            report_name: default_report_name(),
            session_name: default_session_name(),
            profile: None,
            region: None,
        }
    }

    /// Load a configuration file (JSON).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Build the final configuration from an optional file plus CLI values.
    pub fn resolve(config_file: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::new(Vec::new(), String::new()),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if !overrides.accounts.is_empty() {
            self.accounts = overrides.accounts;
        }
        if let Some(role_name) = overrides.role_name {
            self.role_name = role_name;
        }
        if let Some(report_name) = overrides.report_name {
            self.report_name = report_name;
        }
        if let Some(session_name) = overrides.session_name {
            self.session_name = session_name;
        }
        if overrides.profile.is_some() {
            self.profile = overrides.profile;
        }
        if overrides.region.is_some() {
            self.region = overrides.region;
        }
    }

    /// Check identifiers before anything is sent to AWS. An empty account
    /// list is valid and yields a header-only report.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_role_name(&self.role_name)?;
        validate_session_name(&self.session_name)?;
        for account_id in &self.accounts {
            validate_account_id(account_id)?;
        }
        Ok(())
    }
}
