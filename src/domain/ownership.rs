use uuid::Uuid;

use crate::errors::AppError;

/// Identity a data access runs under. `Service` is reserved for internal
/// consumers (profile provisioning, maintenance tasks) and never derives
/// from an end user's token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    User(Uuid),
    Service,
}

impl Actor {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Actor::User(id) => Some(*id),
            Actor::Service => None,
        }
    }
}

/// The single ownership predicate behind every project operation:
/// permitted iff the acting identity owns the row. Every repository
/// entry point calls this before touching data, so a denial never has
/// partial effects.
pub fn ensure_owner(actor: &Actor, owner_id: &Uuid) -> Result<(), AppError> {
    match actor {
        Actor::Service => Ok(()),
        Actor::User(id) if id == owner_id => Ok(()),
        Actor::User(_) => Err(AppError::ForbiddenAccess),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_passes() {
        let owner = Uuid::new_v4();
        assert!(ensure_owner(&Actor::User(owner), &owner).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let result = ensure_owner(&Actor::User(other), &owner);
        assert!(matches!(result, Err(AppError::ForbiddenAccess)));
    }

    #[test]
    fn service_identity_bypasses_the_check() {
        let owner = Uuid::new_v4();
        assert!(ensure_owner(&Actor::Service, &owner).is_ok());
    }
}
