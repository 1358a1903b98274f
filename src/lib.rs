use sqlx::PgPool;
use tokio::sync::mpsc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, ownership, search, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db};

use auth::jwt::JwtService;
use repositories::sqlx_repo::{SqlxAccountRepo, SqlxProfileRepo, SqlxProjectRepo};
use use_cases::auth::AuthHandler;
use use_cases::profiles::ProfileHandler;
use use_cases::projects::ProjectHandler;
use use_cases::provisioning::AccountCreated;

pub type AppAuthHandler = AuthHandler<SqlxAccountRepo, JwtService>;
pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo>;
pub type AppProfileHandler = ProfileHandler<SqlxProfileRepo>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub project_handler: AppProjectHandler,
    pub profile_handler: AppProfileHandler,
}

impl AppState {
    pub fn new(
        config: &settings::AppConfig,
        pool: PgPool,
        events: mpsc::Sender<AccountCreated>,
    ) -> Self {
        let jwt_service = JwtService::new(config);
        let account_repo = SqlxAccountRepo::new(pool.clone());
        let auth_handler = AuthHandler::new(account_repo, jwt_service, events);

        AppState {
            auth_handler,
            project_handler: ProjectHandler::new(SqlxProjectRepo::new(pool.clone())),
            profile_handler: ProfileHandler::new(SqlxProfileRepo::new(pool)),
        }
    }
}
