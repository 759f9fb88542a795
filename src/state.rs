use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::jwt::JwtManager;

/// Handles shared by every request. The database pool is injected here
/// instead of living in a global.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt: JwtManager,
    pub password_hash_cost: u32,
    pub app_env: String,
}

impl AppState {
    pub fn new(db: DatabaseConnection, jwt: JwtManager, password_hash_cost: u32) -> Self {
        Self {
            db,
            jwt,
            password_hash_cost,
            app_env: "local".to_string(),
        }
    }

    pub fn from_config(db: DatabaseConnection, config: &Config) -> Self {
        let jwt = JwtManager::new(&config.jwt_secret, config.jwt_expires_in_seconds);
        Self {
            db,
            jwt,
            password_hash_cost: config.password_hash_cost,
            app_env: config.app_env.clone(),
        }
    }
}
