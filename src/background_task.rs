use tokio::sync::mpsc;

use crate::repositories::sqlx_repo::SqlxProfileRepo;
use crate::use_cases::provisioning::{AccountCreated, ProfileProvisioner};

/// Consumes account-created events and provisions profile rows. Runs
/// with its own repository handle under the service identity; the new
/// user's token is never involved.
pub async fn start_provisioner_task(
    profile_repo: SqlxProfileRepo,
    mut events: mpsc::Receiver<AccountCreated>,
) {
    let provisioner = ProfileProvisioner::new(profile_repo);

    while let Some(event) = events.recv().await {
        if let Err(e) = provisioner.handle(&event).await {
            tracing::error!(
                "Profile provisioning failed for account {}: {}",
                event.account_id,
                e
            );
        }
    }

    tracing::info!("Account event channel closed, provisioner stopping");
}
