use actix_web::web;

use crate::handlers::home::home;
use crate::handlers::system::health_check;

mod auth;
mod json_error;
mod profiles;
mod projects;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .service(health_check)
            .configure(auth::config_routes)
            .configure(projects::config_routes)
            .configure(profiles::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
