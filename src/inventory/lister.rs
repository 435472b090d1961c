//! Active key enumeration within one account.
//!
//! Users are paged with the provider's opaque marker; each user then costs one
//! `ListAccessKeys` call. Only keys whose status is exactly `Active` survive.
//! A marker the provider has already handed out ends the run with an error.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use tracing::debug;

use super::types::ActiveKey;
use super::IdentityDirectory;

/// List every active access key visible through `directory`, in discovery order.
pub async fn list_active_keys<D: IdentityDirectory + ?Sized>(directory: &D) -> Result<Vec<ActiveKey>> {
    let mut active_keys = Vec::new();
    let mut marker: Option<String> = None;
    let mut seen_markers: HashSet<String> = HashSet::new();
    let mut users_seen = 0usize;
    let mut pages = 0usize;

    loop {
        let page = directory
            .list_users(marker.as_deref())
            .await
            .context("Failed to list IAM users")?;
        pages += 1;

        for user_name in &page.user_names {
            users_seen += 1;
            let keys = directory
                .list_access_keys(user_name)
                .await
                .with_context(|| format!("Failed to list access keys for user {}", user_name))?;

            active_keys.extend(
                keys.iter()
                    .filter(|key| key.is_active())
                    .map(ActiveKey::from_metadata),
            );
        }

        match page.next_marker {
            Some(next) => {
                if !seen_markers.insert(next.clone()) {
                    bail!("ListUsers returned repeated marker {}", next);
                }
                marker = Some(next);
            }
            None => break,
        }
    }

    debug!(
        pages,
        users = users_seen,
        active_keys = active_keys.len(),
        "Finished listing users"
    );

    Ok(active_keys)
}
