//! AWS SDK adapters for the inventory traits.
//!
//! - [`StsRoleAssumer`] - `sts:AssumeRole` with an explicit base identity
//! - [`ScopedIamFactory`] - IAM clients bound to assumed-role credentials
//! - [`IamDirectory`] - `iam:ListUsers` / `iam:ListAccessKeys`
//!
//! The base identity is resolved once, up front, from the selected profile or
//! the default provider chain, and handed to the STS client explicitly.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::Credentials;
use aws_sdk_iam::operation::list_users::ListUsersOutput;
use aws_sdk_iam::types::AccessKeyMetadata as IamKeyMetadata;
use aws_sdk_iam::Client as IamClient;
use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sts::Client as StsClient;
use std::time::SystemTime;
use tracing::{debug, warn};

use crate::config::ReportConfig;
use crate::error::RoleAssumptionError;
use crate::inventory::types::{AccessKeyMetadata, TemporaryCredentials, UserPage};
use crate::inventory::{DirectoryFactory, IdentityDirectory, RoleAssumer};
use crate::utils::time::from_epoch;

const PROVIDER_NAME: &str = "aws_key_audit";

/// Load the shared SDK configuration for the selected profile and region.
pub async fn load_sdk_config(profile: Option<&str>, region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }

    loader.load().await
}

/// Resolve the base identity carried by `config`.
pub async fn resolve_base_credentials(
    config: &SdkConfig,
) -> Result<Credentials, RoleAssumptionError> {
    let provider = config.credentials_provider().ok_or_else(|| {
        RoleAssumptionError::MissingCredentials("no credentials provider configured".to_string())
    })?;

    let credentials = provider.provide_credentials().await.map_err(|err| {
        RoleAssumptionError::MissingCredentials(DisplayErrorContext(&err).to_string())
    })?;

    check_complete(&credentials)?;
    Ok(credentials)
}

fn check_complete(credentials: &Credentials) -> Result<(), RoleAssumptionError> {
    if credentials.access_key_id().is_empty() {
        return Err(RoleAssumptionError::PartialCredentials(
            "access key id is empty".to_string(),
        ));
    }
    if credentials.secret_access_key().is_empty() {
        return Err(RoleAssumptionError::PartialCredentials(
            "secret access key is empty".to_string(),
        ));
    }
    Ok(())
}

/// `sts:AssumeRole` backed by an explicit base identity.
#[derive(Debug, Clone)]
pub struct StsRoleAssumer {
    client: Result<StsClient, RoleAssumptionError>,
}

impl StsRoleAssumer {
    /// Use `credentials` as the base identity.
    pub fn with_credentials(config: &SdkConfig, credentials: Credentials) -> Self {
        let sts_config = aws_sdk_sts::config::Builder::from(config)
            .credentials_provider(credentials)
            .build();
        Self {
            client: Ok(StsClient::from_conf(sts_config)),
        }
    }

    /// Resolve the base identity from `config`.
    ///
    /// When nothing can be resolved the assumer is still built; every call then
    /// fails with the resolution error so each account is skipped and logged.
    pub async fn from_config(config: &SdkConfig) -> Self {
        match resolve_base_credentials(config).await {
            Ok(credentials) => Self::with_credentials(config, credentials),
            Err(err) => {
                warn!(error = %err, "Base identity unavailable");
                Self { client: Err(err) }
            }
        }
    }
}

#[async_trait]
impl RoleAssumer for StsRoleAssumer {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials, RoleAssumptionError> {
        let client = self.client.as_ref().map_err(Clone::clone)?;

        let output = client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|err| match err {
                SdkError::ServiceError(context) => {
                    let service_err = context.err();
                    RoleAssumptionError::Rejected {
                        code: service_err.code().unwrap_or("Unknown").to_string(),
                        message: service_err.message().unwrap_or_default().to_string(),
                    }
                }
                other => RoleAssumptionError::Transport(DisplayErrorContext(&other).to_string()),
            })?;

        let credentials = output
            .credentials()
            .ok_or(RoleAssumptionError::EmptyResponse)?;
        let expiration = credentials.expiration();

        Ok(TemporaryCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
            expiration: from_epoch(expiration.secs(), expiration.subsec_nanos()),
        })
    }
}

/// Builds IAM clients that inherit region and retry settings from the base
/// configuration but sign with assumed-role credentials.
#[derive(Debug, Clone)]
pub struct ScopedIamFactory {
    base: SdkConfig,
}

impl ScopedIamFactory {
    pub fn new(base: SdkConfig) -> Self {
        Self { base }
    }
}

impl DirectoryFactory for ScopedIamFactory {
    type Directory = IamDirectory;

    fn scoped_directory(&self, credentials: &TemporaryCredentials) -> IamDirectory {
        debug!("Creating IAM client with assumed role credentials");
        let provider = Credentials::new(
            &credentials.access_key_id,
            &credentials.secret_access_key,
            Some(credentials.session_token.clone()),
            credentials.expiration.map(SystemTime::from),
            PROVIDER_NAME,
        );
        let iam_config = aws_sdk_iam::config::Builder::from(&self.base)
            .credentials_provider(provider)
            .build();

        IamDirectory {
            client: IamClient::from_conf(iam_config),
        }
    }
}

/// IAM calls made with one account's scoped credentials.
#[derive(Debug, Clone)]
pub struct IamDirectory {
    client: IamClient,
}

#[async_trait]
impl IdentityDirectory for IamDirectory {
    async fn list_users(&self, marker: Option<&str>) -> Result<UserPage> {
        let output = self
            .client
            .list_users()
            .set_marker(marker.map(str::to_string))
            .send()
            .await
            .map_err(|err| anyhow!("{}", DisplayErrorContext(&err)))
            .context("Failed to call iam:ListUsers")?;

        Ok(user_page(&output))
    }

    async fn list_access_keys(&self, user_name: &str) -> Result<Vec<AccessKeyMetadata>> {
        let output = self
            .client
            .list_access_keys()
            .user_name(user_name)
            .send()
            .await
            .map_err(|err| anyhow!("{}", DisplayErrorContext(&err)))
            .with_context(|| format!("Failed to call iam:ListAccessKeys for {}", user_name))?;

        output
            .access_key_metadata()
            .iter()
            .map(|key| key_metadata(user_name, key))
            .collect()
    }
}

/// Map one `ListUsers` response; the marker only counts on a truncated page.
fn user_page(output: &ListUsersOutput) -> UserPage {
    let next_marker = if output.is_truncated() {
        output.marker().map(str::to_string)
    } else {
        None
    };

    UserPage {
        user_names: output
            .users()
            .iter()
            .map(|user| user.user_name().to_string())
            .collect(),
        next_marker,
    }
}

fn key_metadata(user_name: &str, key: &IamKeyMetadata) -> Result<AccessKeyMetadata> {
    let access_key_id = key
        .access_key_id()
        .context("ListAccessKeys response missing AccessKeyId")?
        .to_string();
    let created = key
        .create_date()
        .and_then(|dt| from_epoch(dt.secs(), dt.subsec_nanos()))
        .with_context(|| format!("Access key {} has no CreateDate", access_key_id))?;

    Ok(AccessKeyMetadata {
        user_name: key.user_name().unwrap_or(user_name).to_string(),
        access_key_id,
        status: key
            .status()
            .map(|status| status.as_str().to_string())
            .unwrap_or_default(),
        create_date: created,
    })
}

/// Build the production adapters for `config`.
pub async fn connect(config: &ReportConfig) -> (StsRoleAssumer, ScopedIamFactory) {
    let sdk_config = load_sdk_config(config.profile.as_deref(), config.region.as_deref()).await;
    let assumer = StsRoleAssumer::from_config(&sdk_config).await;
    (assumer, ScopedIamFactory::new(sdk_config))
}
