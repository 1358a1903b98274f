use actix_web::web;

use crate::handlers::profiles;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profiles")
            .service(profiles::get_my_profile)
            .service(profiles::update_my_profile)
    );
}
