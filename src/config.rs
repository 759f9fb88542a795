use clap::Parser;
use once_cell::sync::Lazy;

pub const TOKEN_TYPE: &str = "Bearer";
pub const DEFAULT_ADMIN_NAME: &str = "System Administrator";

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_BATCH_YEAR: i32 = 2000;
pub const MAX_BATCH_YEAR: i32 = 2100;
pub const SEMESTERS_PER_YEAR: i32 = 2;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true, action = clap::ArgAction::Set)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value_t = 86400)]
    pub jwt_expires_in_seconds: i64,

    #[clap(long, env)]
    pub admin_email: String,

    #[clap(long, env)]
    pub admin_password: String,

    #[clap(long, env, default_value_t = 10)]
    pub password_hash_cost: u32,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value_t = true, action = clap::ArgAction::Set)]
    pub run_migrations: bool,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
