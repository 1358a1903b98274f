use uuid::Uuid;
use validator::Validate;

use crate::domain::ownership::Actor;
use crate::entities::profile::{Profile, UpdateProfile};
use crate::errors::AppError;
use crate::repositories::profile::ProfileRepository;

pub struct ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub profile_repo: R,
}

impl<R> ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub fn new(profile_repo: R) -> Self {
        ProfileHandler { profile_repo }
    }

    pub async fn me(&self, actor: &Actor) -> Result<Profile, AppError> {
        let id = actor.user_id().ok_or(AppError::UnauthorizedAccess)?;
        self.profile_repo.get_profile(actor, &id).await
    }

    pub async fn update_me(&self, actor: &Actor, request: UpdateProfile) -> Result<Profile, AppError> {
        request.validate()?;

        let id: Uuid = actor.user_id().ok_or(AppError::UnauthorizedAccess)?;
        self.profile_repo
            .update_profile(actor, &id, &request.username)
            .await
    }
}
