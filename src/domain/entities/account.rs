use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;

use crate::domain::password::validate_password_strength;

/// Application-side mirror of an identity-provider account. Profile rows
/// are provisioned from the creation event, never written here.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct AccountInsert {
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAccount {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Optional signup metadata; wins over the email local part when the
    /// profile row is provisioned.
    #[validate(length(min = 3, max = 64, message = "Must be 3-64 characters"))]
    pub username: Option<String>,

    #[validate(
        length(min = 8, message = "Must be at least 8 characters"),
        custom(
            function = "validate_password_strength",
            message = "Must include uppercase, number, and symbol"
        )
    )]
    pub password: String,
}

impl NewAccount {
    pub fn prepare_for_insert(&self, password_hash: String) -> AccountInsert {
        AccountInsert {
            email: self.email.clone(),
            username: self.username.clone(),
            password_hash,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginAccount {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct NewAccountResponse {
    pub id: Uuid,
    pub message: String,
}
