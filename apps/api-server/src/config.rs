//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `MONGODB_URI` selects the document database; when it is absent the
    /// server runs on the in-memory repository instead.
    pub fn from_env() -> Self {
        let database = env::var("MONGODB_URI").ok().map(|url| DatabaseConfig {
            url,
            database: env::var("MONGODB_DATABASE").ok(),
            max_pool_size: env::var("DB_MAX_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_pool_size: env::var("DB_MIN_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
        }
    }
}
