use anyhow::Context;
use cams_service::config::{APP_CONFIG, DEFAULT_ADMIN_NAME};
use cams_service::repositories::UserRepository;
use cams_service::utils::tracing::init_standard_tracing;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

/// Creates the configured admin, or resets an existing account with that
/// email to ADMIN with the configured password.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &APP_CONFIG.log_level);

    let db = Database::connect(&APP_CONFIG.database_url)
        .await
        .context("Failed to connect to database")?;

    if APP_CONFIG.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("Failed to run migrations")?;
    }

    let admin = UserRepository::new(&db)
        .upsert_admin(
            DEFAULT_ADMIN_NAME,
            &APP_CONFIG.admin_email,
            &APP_CONFIG.admin_password,
            APP_CONFIG.password_hash_cost,
        )
        .await
        .context("Failed to upsert admin user")?;

    tracing::info!(user_id = %admin.user_id, email = %admin.email, "Admin user ready");

    Ok(())
}
