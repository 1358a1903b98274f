use uuid::Uuid;
use validator::Validate;

use crate::domain::ownership::Actor;
use crate::entities::project::{NewProject, Project, ProjectChanges, ProjectHit};
use crate::errors::AppError;
use crate::repositories::project::ProjectRepository;

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    /// Creates a project owned by the acting user. The repository
    /// derives the search vector from the candidate row as part of the
    /// insert.
    pub async fn create(&self, actor: &Actor, request: NewProject) -> Result<Uuid, AppError> {
        request.validate()?;

        let owner = actor.user_id().ok_or(AppError::UnauthorizedAccess)?;
        let insert = request.prepare_for_insert(owner);

        self.project_repo.create_project(actor, &insert).await
    }

    pub async fn get(&self, actor: &Actor, id: &Uuid) -> Result<Project, AppError> {
        self.project_repo.get_project(actor, id).await
    }

    pub async fn list(&self, actor: &Actor) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects(actor).await
    }

    pub async fn update(&self, actor: &Actor, id: &Uuid, changes: ProjectChanges) -> Result<Project, AppError> {
        changes.validate()?;
        self.project_repo.update_project(actor, id, &changes).await
    }

    pub async fn delete(&self, actor: &Actor, id: &Uuid) -> Result<(), AppError> {
        self.project_repo.delete_project(actor, id).await
    }

    /// Ranked search over the acting user's projects; title matches
    /// outrank description matches, which outrank technology tags.
    pub async fn search(&self, actor: &Actor, query: &str) -> Result<Vec<ProjectHit>, AppError> {
        self.project_repo.search_projects(actor, query).await
    }
}
