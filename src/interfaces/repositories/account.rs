use async_trait::async_trait;
use uuid::Uuid;
use std::borrow::Cow;

use crate::{
    entities::account::{Account, AccountInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxAccountRepo,
};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn account_exists(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;
    async fn get_account_by_id(&self, id: &Uuid) -> Result<Option<Account>, AppError>;
    async fn create_account(&self, account: &AccountInsert) -> Result<Uuid, AppError>;
}

impl SqlxAccountRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxAccountRepo { pool }
    }
}

#[async_trait]
impl AccountRepository for SqlxAccountRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn account_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)"
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(exists)
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as(
            r#"SELECT id, email, username, password_hash, created_at, updated_at
            FROM accounts WHERE email = $1"#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get_account_by_id(&self, id: &Uuid) -> Result<Option<Account>, AppError> {
        sqlx::query_as(
            r#"SELECT id, email, username, password_hash, created_at, updated_at
            FROM accounts WHERE id = $1"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn create_account(&self, account: &AccountInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO accounts (
                id,
                email,
                username,
                password_hash,
                created_at,
                updated_at
            )
            VALUES (gen_random_uuid(), $1, $2, $3, $4, $5) RETURNING id
            "#
        )
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .bind(account.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            match e {
                sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                    AppError::Conflict("Account with this email already exists".to_string())
                }
                _ => AppError::from(e),
            }
        })?;

        Ok(id)
    }
}
