use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::ownership::{ensure_owner, Actor},
    domain::search::to_tsquery,
    entities::project::{Project, ProjectChanges, ProjectHit, ProjectInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

const PROJECT_COLUMNS: &str =
    "id, user_id, title, description, technologies, configuration, created_at, updated_at";

/// Every method checks the ownership predicate before touching data.
/// Inserts and updates recompute the weighted search vector from the
/// row's final text fields and persist it in the same statement, so the
/// stored vector can never go stale relative to the row.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create_project(&self, actor: &Actor, project: &ProjectInsert) -> Result<Uuid, AppError>;
    async fn get_project(&self, actor: &Actor, id: &Uuid) -> Result<Project, AppError>;
    async fn list_projects(&self, actor: &Actor) -> Result<Vec<Project>, AppError>;
    async fn update_project(&self, actor: &Actor, id: &Uuid, changes: &ProjectChanges) -> Result<Project, AppError>;
    async fn delete_project(&self, actor: &Actor, id: &Uuid) -> Result<(), AppError>;
    async fn search_projects(&self, actor: &Actor, query: &str) -> Result<Vec<ProjectHit>, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, actor: &Actor, project: &ProjectInsert) -> Result<Uuid, AppError> {
        ensure_owner(actor, &project.user_id)?;

        let search = project.search_vector().to_tsvector();

        let id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO projects (
                id,
                user_id,
                title,
                description,
                technologies,
                configuration,
                search,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7::tsvector, $8, $9) RETURNING id
            "#,
        )
        .bind(project.id)
        .bind(project.user_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.technologies)
        .bind(&project.configuration)
        .bind(&search)
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(id)
    }

    async fn get_project(&self, actor: &Actor, id: &Uuid) -> Result<Project, AppError> {
        let project: Project = sqlx::query_as(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        ensure_owner(actor, &project.user_id)?;

        Ok(project)
    }

    async fn list_projects(&self, actor: &Actor) -> Result<Vec<Project>, AppError> {
        let projects = match actor.user_id() {
            Some(user_id) => {
                sqlx::query_as(&format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at DESC"
                ))
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(AppError::from)?;

        Ok(projects)
    }

    async fn update_project(&self, actor: &Actor, id: &Uuid, changes: &ProjectChanges) -> Result<Project, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let existing: Project = sqlx::query_as(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        ensure_owner(actor, &existing.user_id)?;

        let merged = changes.apply(&existing);
        let search = merged.search_vector().to_tsvector();

        let updated: Project = sqlx::query_as(&format!(
            r#"UPDATE projects SET
                title = $2,
                description = $3,
                technologies = $4,
                configuration = $5,
                search = $6::tsvector,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&merged.title)
        .bind(&merged.description)
        .bind(&merged.technologies)
        .bind(&merged.configuration)
        .bind(&search)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;

        Ok(updated)
    }

    async fn delete_project(&self, actor: &Actor, id: &Uuid) -> Result<(), AppError> {
        let owner: Option<Uuid> = sqlx::query_scalar("SELECT user_id FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        let owner = owner.ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
        ensure_owner(actor, &owner)?;

        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn search_projects(&self, actor: &Actor, query: &str) -> Result<Vec<ProjectHit>, AppError> {
        // The query runs through the same tokenizer as the stored
        // vectors; nothing left after stop words means no hits.
        let tsquery = match to_tsquery(query) {
            Some(q) => q,
            None => return Ok(Vec::new()),
        };

        let hits = match actor.user_id() {
            Some(user_id) => {
                sqlx::query_as(&format!(
                    r#"SELECT {PROJECT_COLUMNS}, ts_rank(search, $2::tsquery) AS rank
                    FROM projects
                    WHERE user_id = $1 AND search @@ $2::tsquery
                    ORDER BY rank DESC, created_at DESC"#
                ))
                .bind(user_id)
                .bind(&tsquery)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    r#"SELECT {PROJECT_COLUMNS}, ts_rank(search, $1::tsquery) AS rank
                    FROM projects
                    WHERE search @@ $1::tsquery
                    ORDER BY rank DESC, created_at DESC"#
                ))
                .bind(&tsquery)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(AppError::from)?;

        Ok(hits)
    }
}
