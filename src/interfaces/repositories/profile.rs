use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::ownership::{ensure_owner, Actor},
    entities::profile::{Profile, ProfileInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxProfileRepo,
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Idempotent: a second insert for the same account is a no-op.
    /// Returns whether a row was actually created.
    async fn create_profile(&self, actor: &Actor, profile: &ProfileInsert) -> Result<bool, AppError>;
    async fn get_profile(&self, actor: &Actor, id: &Uuid) -> Result<Profile, AppError>;
    async fn update_profile(&self, actor: &Actor, id: &Uuid, username: &str) -> Result<Profile, AppError>;
}

impl SqlxProfileRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProfileRepo { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn create_profile(&self, actor: &Actor, profile: &ProfileInsert) -> Result<bool, AppError> {
        ensure_owner(actor, &profile.id)?;

        let result = sqlx::query(
            r#"INSERT INTO profiles (id, username, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING"#,
        )
        .bind(profile.id)
        .bind(&profile.username)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_profile(&self, actor: &Actor, id: &Uuid) -> Result<Profile, AppError> {
        ensure_owner(actor, id)?;

        sqlx::query_as(
            "SELECT id, username, created_at, updated_at FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    async fn update_profile(&self, actor: &Actor, id: &Uuid, username: &str) -> Result<Profile, AppError> {
        ensure_owner(actor, id)?;

        sqlx::query_as(
            r#"UPDATE profiles SET username = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, created_at, updated_at"#,
        )
        .bind(id)
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }
}
