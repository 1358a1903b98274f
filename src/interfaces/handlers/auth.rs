use actix_web::{post, web, HttpResponse, Responder};
use actix_web::error::ResponseError;

use crate::entities::account::{LoginAccount, NewAccount};
use crate::entities::token::RefreshTokenRequest;
use crate::AppState;

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    account: web::Json<NewAccount>
) -> impl Responder {
    match state.auth_handler.register(account.into_inner()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    account: web::Json<LoginAccount>
) -> impl Responder {
    match state.auth_handler.login(account.into_inner()).await {
        Ok(auth_response) => HttpResponse::Ok().json(auth_response),
        Err(e) => e.error_response(),
    }
}

#[post("/refresh-token")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> impl Responder {
    match state.auth_handler.refresh_token(&request.refresh_token).await {
        Ok(auth_response) => HttpResponse::Ok().json(auth_response),
        Err(e) => e.error_response(),
    }
}
