use std::sync::Arc;

use axum::extract::Request;
use axum::ServiceExt;
use migration::{Migrator, MigratorTrait};
use tracing::info;

use configs::AppConfig;
use service::users::repo::seaorm::SeaOrmUserRepository;
use service::users::UserRepository;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

/// Connect, migrate, then serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    cfg.validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;

    let repo: Arc<dyn UserRepository> = Arc::new(SeaOrmUserRepository::new(db));
    let state = AppState::new(repo, cfg.is_production());
    let app = routes::build_app(state);

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, env = %cfg.server.env, "listening");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
