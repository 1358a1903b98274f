use actix_web::{get, web, HttpResponse, Responder};

use crate::repositories::account::AccountRepository;
use crate::AppState;

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let database = match state.auth_handler.account_repo.check_connection().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::error!("Health check database probe failed: {}", e);
            "down"
        }
    };

    let status = if database == "up" { "Ok" } else { "Degraded" };

    HttpResponse::Ok().json(serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}
