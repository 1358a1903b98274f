use actix_web::error::ResponseError;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::project::{NewProject, ProjectChanges};
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[post("")]
pub async fn create_project(
    state: web::Data<AppState>,
    claims: AuthClaims,
    project: web::Json<NewProject>,
) -> impl Responder {
    let actor = match claims.actor() {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    match state.project_handler.create(&actor, project.into_inner()).await {
        Ok(id) => HttpResponse::Created().json(serde_json::json!({
            "id": id,
            "message": "Project created successfully"
        })),
        Err(e) => e.to_http_response(),
    }
}

#[get("")]
pub async fn list_projects(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> impl Responder {
    let actor = match claims.actor() {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    match state.project_handler.list(&actor).await {
        Ok(projects) => HttpResponse::Ok().json(projects),
        Err(e) => e.to_http_response(),
    }
}

#[get("/search")]
pub async fn search_projects(
    state: web::Data<AppState>,
    claims: AuthClaims,
    params: web::Query<SearchParams>,
) -> impl Responder {
    let actor = match claims.actor() {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    match state.project_handler.search(&actor, &params.q).await {
        Ok(hits) => HttpResponse::Ok().json(hits),
        Err(e) => e.to_http_response(),
    }
}

#[get("/{project_id}")]
pub async fn get_project(
    state: web::Data<AppState>,
    claims: AuthClaims,
    project_id: web::Path<Uuid>,
) -> impl Responder {
    let actor = match claims.actor() {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    match state.project_handler.get(&actor, &project_id).await {
        Ok(project) => HttpResponse::Ok().json(project),
        Err(e) => e.to_http_response(),
    }
}

#[put("/{project_id}")]
pub async fn update_project(
    state: web::Data<AppState>,
    claims: AuthClaims,
    project_id: web::Path<Uuid>,
    changes: web::Json<ProjectChanges>,
) -> impl Responder {
    let actor = match claims.actor() {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    match state.project_handler.update(&actor, &project_id, changes.into_inner()).await {
        Ok(project) => HttpResponse::Ok().json(project),
        Err(e) => e.to_http_response(),
    }
}

#[delete("/{project_id}")]
pub async fn delete_project(
    state: web::Data<AppState>,
    claims: AuthClaims,
    project_id: web::Path<Uuid>,
) -> impl Responder {
    let actor = match claims.actor() {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    match state.project_handler.delete(&actor, &project_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.to_http_response(),
    }
}
