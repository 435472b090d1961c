//! In-memory stand-ins for STS and IAM used by the integration tests.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use aws_key_audit::error::RoleAssumptionError;
use aws_key_audit::inventory::types::{AccessKeyMetadata, TemporaryCredentials, UserPage};
use aws_key_audit::inventory::{DirectoryFactory, IdentityDirectory, RoleAssumer};
use aws_key_audit::utils::time::CREATE_DATE_FORMAT;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One account's users (split into pages) and their keys.
#[derive(Debug, Clone, Default)]
pub struct FakeAccount {
    pub pages: Vec<Vec<String>>,
    pub keys: HashMap<String, Vec<AccessKeyMetadata>>,
    /// Users whose key lookup fails
    pub broken_users: HashSet<String>,
}

impl FakeAccount {
    pub fn with_page(mut self, users: &[&str]) -> Self {
        self.pages
            .push(users.iter().map(|u| (*u).to_string()).collect());
        self
    }

    pub fn with_key(mut self, user: &str, key_id: &str, status: &str) -> Self {
        self.keys
            .entry(user.to_string())
            .or_default()
            .push(key(user, key_id, status));
        self
    }
}

pub fn key(user: &str, key_id: &str, status: &str) -> AccessKeyMetadata {
    AccessKeyMetadata {
        user_name: user.to_string(),
        access_key_id: key_id.to_string(),
        status: status.to_string(),
        create_date: Utc.with_ymd_and_hms(2023, 5, 17, 9, 30, 15).unwrap(),
    }
}

/// Read a `CreateDate` report value back into a UTC timestamp.
pub fn parse_create_date(value: &str) -> Result<DateTime<Utc>> {
    Ok(NaiveDateTime::parse_from_str(value, CREATE_DATE_FORMAT)?.and_utc())
}

/// Issues credentials whose access key id encodes the account, unless the
/// account is listed in `denied`.
#[derive(Default)]
pub struct FakeAssumer {
    pub denied: HashSet<String>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeAssumer {
    pub fn denying(accounts: &[&str]) -> Self {
        Self {
            denied: accounts.iter().map(|a| (*a).to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

fn account_from_arn(role_arn: &str) -> String {
    role_arn.split(':').nth(4).unwrap_or_default().to_string()
}

#[async_trait]
impl RoleAssumer for FakeAssumer {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials, RoleAssumptionError> {
        self.calls
            .lock()
            .unwrap()
            .push((role_arn.to_string(), session_name.to_string()));

        let account_id = account_from_arn(role_arn);
        if self.denied.contains(&account_id) {
            return Err(RoleAssumptionError::Rejected {
                code: "AccessDenied".to_string(),
                message: format!("not authorized to perform sts:AssumeRole on {}", role_arn),
            });
        }

        Ok(TemporaryCredentials {
            access_key_id: format!("ASIA{}", account_id),
            secret_access_key: "secret".to_string(),
            session_token: "token".to_string(),
            expiration: None,
        })
    }
}

/// Hands out a directory for whichever account the credentials belong to.
#[derive(Default)]
pub struct FakeFactory {
    pub accounts: HashMap<String, FakeAccount>,
}

impl FakeFactory {
    pub fn with_account(mut self, account_id: &str, account: FakeAccount) -> Self {
        self.accounts.insert(account_id.to_string(), account);
        self
    }
}

impl DirectoryFactory for FakeFactory {
    type Directory = FakeDirectory;

    fn scoped_directory(&self, credentials: &TemporaryCredentials) -> FakeDirectory {
        let account_id = credentials.access_key_id.trim_start_matches("ASIA");
        FakeDirectory {
            account: self.accounts.get(account_id).cloned().unwrap_or_default(),
        }
    }
}

pub struct FakeDirectory {
    account: FakeAccount,
}

#[async_trait]
impl IdentityDirectory for FakeDirectory {
    async fn list_users(&self, marker: Option<&str>) -> Result<UserPage> {
        let index = match marker {
            None => 0,
            Some(m) => m
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| anyhow!("invalid marker {}", m))?,
        };

        let user_names = self.account.pages.get(index).cloned().unwrap_or_default();
        let next_marker = if index + 1 < self.account.pages.len() {
            Some(format!("page-{}", index + 1))
        } else {
            None
        };

        Ok(UserPage {
            user_names,
            next_marker,
        })
    }

    async fn list_access_keys(&self, user_name: &str) -> Result<Vec<AccessKeyMetadata>> {
        if self.account.broken_users.contains(user_name) {
            return Err(anyhow!("NoSuchEntity: user {} not found", user_name));
        }
        Ok(self.account.keys.get(user_name).cloned().unwrap_or_default())
    }
}
