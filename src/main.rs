use actix_cors::Cors;
use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use tokio::sync::mpsc;
use tracing_actix_web::TracingLogger;

use showcase_api::{
    background_task::start_provisioner_task,
    constants::ACCOUNT_EVENT_QUEUE_DEPTH,
    db::postgres::create_pool,
    graceful_shutdown::shutdown_signal,
    middlewares::auth::AuthMiddleware,
    repositories::sqlx_repo::SqlxProfileRepo,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = create_pool(&config.database_url)
        .await
        .expect("Failed to create database connection pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let (events_tx, events_rx) = mpsc::channel(ACCOUNT_EVENT_QUEUE_DEPTH);

    let app_state = web::Data::new(
        AppState::new(&config, pool.clone(), events_tx)
    );

    tokio::spawn(start_provisioner_task(
        SqlxProfileRepo::new(pool.clone()),
        events_rx,
    ));

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "Starting Showcase API v{} on {}",
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_origins = config.cors_origins();
    let worker_count = config.worker_count;

    let server = HttpServer::new(move || {
        let cors = if cors_origins.iter().any(|o| o == "*") {
            Cors::permissive()
        } else {
            cors_origins.iter().fold(
                Cors::default().allow_any_method().allow_any_header(),
                |cors, origin| cors.allowed_origin(origin),
            )
        };

        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(AuthMiddleware)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
