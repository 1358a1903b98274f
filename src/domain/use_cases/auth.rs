use tokio::sync::mpsc;
use uuid::Uuid;
use validator::Validate;

use crate::entities::token::AuthResponse;
use crate::entities::account::{Account, LoginAccount, NewAccount, NewAccountResponse};
use crate::errors::{AppError, AuthError};
use crate::interfaces::repositories::account::AccountRepository;
use crate::auth::password::{hash_password, verify_password};
use crate::repositories::token::TokenService;
use crate::use_cases::provisioning::AccountCreated;

pub struct AuthHandler<R, T>
where
    R: AccountRepository,
    T: TokenService,
{
    pub account_repo: R,
    pub token_service: T,
    events: mpsc::Sender<AccountCreated>,
}

impl<R, T> AuthHandler<R, T>
where
    R: AccountRepository,
    T: TokenService,
{
    pub fn new(account_repo: R, token_service: T, events: mpsc::Sender<AccountCreated>) -> Self {
        AuthHandler {
            account_repo,
            token_service,
            events,
        }
    }

    /// Registers a new account after validation and password hashing,
    /// then emits the account-created event the profile provisioner
    /// consumes.
    pub async fn register(&self, request: NewAccount) -> Result<NewAccountResponse, AppError> {
        request.validate()?;

        let hashed_password = hash_password(&request.password)?;
        let account_insert = request.prepare_for_insert(hashed_password);

        let account_id = self.account_repo.create_account(&account_insert).await?;

        let event = AccountCreated {
            account_id,
            email: account_insert.email.clone(),
            username: account_insert.username.clone(),
        };
        if let Err(e) = self.events.send(event).await {
            // The account exists either way; a lost event only delays
            // the profile row until the operator replays it.
            tracing::error!("Failed to queue account-created event: {}", e);
        }

        Ok(NewAccountResponse {
            id: account_id,
            message: "Account created successfully".to_string(),
        })
    }

    /// Logs in by validating credentials and generating JWTs.
    pub async fn login(&self, request: LoginAccount) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let account = self.account_repo.get_account_by_email(&request.email)
            .await
            .map_err(|_e| AuthError::WrongCredentials)?
            .ok_or_else(|| AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &account.password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&account)?;

        tracing::info!("Account logged in successfully");
        Ok(response)
    }

    pub fn create_auth_response(&self, account: &Account) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(account)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        let refresh_token = self.token_service.create_refresh_jwt(&account.id)
            .map_err(|e| {
                tracing::warn!("Failed to create refresh JWT: {}", e);
                AuthError::TokenCreation
            })?;
        Ok(AuthResponse::new(access_token, refresh_token))
    }

    /// Refreshes the access token using the refresh token.
    pub async fn refresh_token(&self, token: &str) -> Result<AuthResponse, AuthError> {
        let decoded = self.token_service.decode_refresh_jwt(token)?;
        let account_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AuthError::InvalidUserId)?;

        let account = self.account_repo.get_account_by_id(&account_id)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        self.create_auth_response(&account)
    }
}
