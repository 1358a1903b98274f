use jsonwebtoken::TokenData;
use uuid::Uuid;

use crate::entities::account::Account;
use crate::entities::token::{Claims, RefreshClaims};
use crate::errors::AuthError;

pub trait TokenService: Send + Sync {
    fn create_jwt(&self, account: &Account) -> Result<String, AuthError>;
    fn create_refresh_jwt(&self, account_id: &Uuid) -> Result<String, AuthError>;
    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;
    fn decode_refresh_jwt(&self, token: &str) -> Result<TokenData<RefreshClaims>, AuthError>;
}
