use std::net::SocketAddr;

use anyhow::Context;
use cams_service::bootstrap::initialize_admin_user;
use cams_service::state::AppState;
use cams_service::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &APP_CONFIG.log_level);

    tracing::info!("Starting application...");

    let db = Database::connect(&APP_CONFIG.database_url)
        .await
        .context("Failed to connect to database")?;

    if APP_CONFIG.run_migrations {
        tracing::info!("Running migrations...");
        Migrator::up(&db, None)
            .await
            .context("Failed to run migrations")?;
    }

    if let Err(e) = initialize_admin_user(&db, &APP_CONFIG).await {
        tracing::error!("Failed to initialize admin user: {e:#}");
        tracing::warn!("Continuing without admin user initialization...");
    }

    let state = AppState::from_config(db, &APP_CONFIG);
    let app = app::create_app(state, &APP_CONFIG);

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    let listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {http_address}"))?;

    tracing::info!("HTTP server listening on {}", &http_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server stopped")?;

    Ok(())
}
