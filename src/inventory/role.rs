//! Role assumption for a single target account.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::types::TemporaryCredentials;
use super::RoleAssumer;
use crate::utils::arn::role_arn;
use crate::utils::time::duration_human;

/// Assume `role_name` in `account_id`.
///
/// Returns `None` when the role cannot be assumed; the failure is logged and
/// the caller skips the account. No retry is attempted.
pub async fn assume_account_role<A: RoleAssumer + ?Sized>(
    assumer: &A,
    account_id: &str,
    role_name: &str,
    session_name: &str,
) -> Option<TemporaryCredentials> {
    let arn = role_arn(account_id, role_name);
    info!(account_id, role_arn = %arn, "Assuming role");

    match assumer.assume_role(&arn, session_name).await {
        Ok(credentials) => {
            info!(account_id, "Role assumed successfully");
            if let Some(expiration) = credentials.expiration {
                debug!(
                    account_id,
                    expires_in = %duration_human(&Utc::now(), &expiration),
                    "Temporary credentials issued"
                );
            }
            Some(credentials)
        }
        Err(err) => {
            warn!(account_id, role_arn = %arn, error = %err, "Error assuming role, skipping account");
            None
        }
    }
}
