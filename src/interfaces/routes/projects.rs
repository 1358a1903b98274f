use actix_web::web;

use crate::handlers::projects;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // "/search" is registered before "/{project_id}" so it never gets
    // captured as a path parameter.
    cfg.service(
        web::scope("/projects")
            .service(projects::create_project)
            .service(projects::list_projects)
            .service(projects::search_projects)
            .service(projects::get_project)
            .service(projects::update_project)
            .service(projects::delete_project)
    );
}
