use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::config::{Config, DEFAULT_ADMIN_NAME};
use crate::repositories::UserRepository;

/// Creates the configured admin account on first start.
pub async fn initialize_admin_user(db: &DatabaseConnection, config: &Config) -> Result<()> {
    let created = UserRepository::new(db)
        .ensure_admin(
            DEFAULT_ADMIN_NAME,
            &config.admin_email,
            &config.admin_password,
            config.password_hash_cost,
        )
        .await
        .context("Failed to initialize admin user")?;

    if created {
        tracing::info!(email = %config.admin_email, "Admin user created");
        tracing::warn!("Please change the default admin password after first login");
    } else {
        tracing::info!("Admin user already exists, skipping initialization");
    }

    Ok(())
}
