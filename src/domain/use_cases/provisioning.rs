use uuid::Uuid;

use crate::domain::ownership::Actor;
use crate::entities::profile::ProfileInsert;
use crate::errors::AppError;
use crate::repositories::profile::ProfileRepository;

/// Internal event emitted once per successful registration. The
/// consumer runs under the service identity, never the new user's.
#[derive(Debug, Clone)]
pub struct AccountCreated {
    pub account_id: Uuid,
    pub email: String,
    pub username: Option<String>,
}

/// Explicit signup metadata wins; otherwise the email local part. An
/// email with no "@" keeps the whole string as the username (matching
/// the upstream behavior; logged so operators can spot it).
pub fn derive_username(username: Option<&str>, email: &str) -> String {
    match username {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => {
            if !email.contains('@') {
                tracing::warn!("Email {:?} has no '@'; using it whole as username", email);
            }
            email.split('@').next().unwrap_or(email).to_string()
        }
    }
}

pub struct ProfileProvisioner<R>
where
    R: ProfileRepository,
{
    pub profile_repo: R,
}

impl<R> ProfileProvisioner<R>
where
    R: ProfileRepository,
{
    pub fn new(profile_repo: R) -> Self {
        ProfileProvisioner { profile_repo }
    }

    /// Provisions the profile row for an account-created event. The
    /// insert is idempotent, so replayed events cannot create a second
    /// row. Returns whether a row was created.
    pub async fn handle(&self, event: &AccountCreated) -> Result<bool, AppError> {
        let username = derive_username(event.username.as_deref(), &event.email);
        let profile = ProfileInsert::new(event.account_id, username);

        let created = self
            .profile_repo
            .create_profile(&Actor::Service, &profile)
            .await?;

        if created {
            tracing::info!("Provisioned profile for account {}", event.account_id);
        } else {
            tracing::info!(
                "Profile for account {} already exists, skipping",
                event.account_id
            );
        }

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_username_wins() {
        assert_eq!(
            derive_username(Some("bob123"), "robert@example.com"),
            "bob123"
        );
    }

    #[test]
    fn falls_back_to_the_email_local_part() {
        assert_eq!(derive_username(None, "alice@example.com"), "alice");
        assert_eq!(derive_username(Some("  "), "alice@example.com"), "alice");
    }

    #[test]
    fn local_part_stops_at_the_first_at_sign() {
        assert_eq!(derive_username(None, "a@b@example.com"), "a");
    }

    #[test]
    fn email_without_at_is_used_whole() {
        assert_eq!(derive_username(None, "not-an-email"), "not-an-email");
    }
}
