//! Active access key report across accounts.
//!
//! Assumes the audit role in every configured account, lists the IAM users
//! there, and writes one CSV row per active access key.
//!
//! # Usage
//!
//! ```bash
//! # Two accounts, default output file (boto_credentials.csv)
//! aws-key-audit report 111111111111 222222222222 --role-name auditor
//!
//! # Accounts and role from a config file, custom output path
//! aws-key-audit report --config accounts.json --output keys.csv
//!
//! # Base identity from a named profile
//! aws-key-audit report 111111111111 --role-name auditor --profile security
//! ```
//!
//! # Output
//!
//! CSV with header `UserName,AccessKeyId,Status,CreateDate,AccountId`, one row
//! per active key, in the order accounts and users were visited. The file is
//! overwritten on every run.
//!
//! # Failure handling
//!
//! An account whose role cannot be assumed is logged and left out of the
//! report; the run still succeeds. Listing and file errors end the run.

use anyhow::Result;
use tracing::{info, info_span, Instrument};

use crate::aws_api;
use crate::config::ReportConfig;
use crate::inventory::lister::list_active_keys;
use crate::inventory::report::write_report;
use crate::inventory::role::assume_account_role;
use crate::inventory::types::AccessKeyRecord;
use crate::inventory::{DirectoryFactory, RoleAssumer};

/// Records gathered from every account that could be reached.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub records: Vec<AccessKeyRecord>,
    pub processed_accounts: Vec<String>,
    pub skipped_accounts: Vec<String>,
}

/// Outcome of a full report run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub processed_accounts: Vec<String>,
    pub skipped_accounts: Vec<String>,
    pub rows_written: usize,
}

/// Walk the configured accounts in order and collect their active keys.
pub async fn aggregate_accounts<A, F>(
    assumer: &A,
    factory: &F,
    config: &ReportConfig,
) -> Result<Aggregate>
where
    A: RoleAssumer + ?Sized,
    F: DirectoryFactory + ?Sized,
{
    info!(accounts = config.accounts.len(), "Aggregating data from multiple accounts");
    let mut aggregate = Aggregate::default();

    for account_id in &config.accounts {
        let span = info_span!("account", account_id = %account_id);
        let keys = async {
            let credentials = assume_account_role(
                assumer,
                account_id,
                &config.role_name,
                &config.session_name,
            )
            .await?;

            let directory = factory.scoped_directory(&credentials);
            info!("Listing IAM users with active access keys");
            Some(list_active_keys(&directory).await)
        }
        .instrument(span)
        .await;

        match keys {
            Some(keys) => {
                let keys = keys?;
                info!(account_id = %account_id, active_keys = keys.len(), "Account processed");
                aggregate
                    .records
                    .extend(keys.into_iter().map(|key| key.into_record(account_id)));
                aggregate.processed_accounts.push(account_id.clone());
            }
            None => aggregate.skipped_accounts.push(account_id.clone()),
        }
    }

    Ok(aggregate)
}

/// Aggregate every account and write the report file.
pub async fn generate<A, F>(assumer: &A, factory: &F, config: &ReportConfig) -> Result<RunSummary>
where
    A: RoleAssumer + ?Sized,
    F: DirectoryFactory + ?Sized,
{
    let aggregate = aggregate_accounts(assumer, factory, config).await?;
    write_report(&aggregate.records, &config.report_name)?;

    Ok(RunSummary {
        processed_accounts: aggregate.processed_accounts,
        skipped_accounts: aggregate.skipped_accounts,
        rows_written: aggregate.records.len(),
    })
}

/// Run the report against AWS.
pub async fn run(config: &ReportConfig) -> Result<()> {
    info!("Starting the IAM users report generation process");

    let (assumer, factory) = aws_api::connect(config).await;
    let summary = generate(&assumer, &factory, config).await?;

    info!(
        processed = summary.processed_accounts.len(),
        skipped = summary.skipped_accounts.len(),
        rows = summary.rows_written,
        "IAM users report generation process completed"
    );
    if !summary.skipped_accounts.is_empty() {
        info!(accounts = ?summary.skipped_accounts, "Accounts left out of the report");
    }

    Ok(())
}
