use actix_web::error::ResponseError;
use actix_web::{get, put, web, HttpResponse, Responder};

use crate::entities::profile::UpdateProfile;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

#[get("/me")]
pub async fn get_my_profile(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> impl Responder {
    let actor = match claims.actor() {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    match state.profile_handler.me(&actor).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => e.to_http_response(),
    }
}

#[put("/me")]
pub async fn update_my_profile(
    state: web::Data<AppState>,
    claims: AuthClaims,
    request: web::Json<UpdateProfile>,
) -> impl Responder {
    let actor = match claims.actor() {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    match state.profile_handler.update_me(&actor, request.into_inner()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => e.to_http_response(),
    }
}
