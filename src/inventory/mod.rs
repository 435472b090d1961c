//! Cross-account access key inventory.
//!
//! The pipeline runs four stages for every account, in order:
//!
//! 1. [`role`] - assume the audit role and obtain temporary credentials
//! 2. [`DirectoryFactory`] - bind an IAM client to those credentials
//! 3. [`lister`] - page through users and keep their active keys
//! 4. [`report`] - flatten every account's keys into one CSV file
//!
//! The provider is reached only through the traits below, so the pipeline can
//! be driven by the AWS SDK adapters in [`crate::aws_api`] or by in-memory
//! fakes in tests.

pub mod lister;
pub mod report;
pub mod role;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;

use crate::error::RoleAssumptionError;
use types::{AccessKeyMetadata, TemporaryCredentials, UserPage};

/// Exchanges the base identity for credentials scoped to one role.
#[async_trait]
pub trait RoleAssumer: Send + Sync {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials, RoleAssumptionError>;
}

/// Read-only view of one account's IAM users and keys.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Fetch one page of users, starting at `marker` (first page when `None`).
    async fn list_users(&self, marker: Option<&str>) -> Result<UserPage>;

    /// Fetch the key metadata of a single user.
    async fn list_access_keys(&self, user_name: &str) -> Result<Vec<AccessKeyMetadata>>;
}

/// Builds an [`IdentityDirectory`] bound to temporary credentials.
///
/// Expiry is not checked here; expired credentials fail on first use.
pub trait DirectoryFactory {
    type Directory: IdentityDirectory;

    fn scoped_directory(&self, credentials: &TemporaryCredentials) -> Self::Directory;
}
