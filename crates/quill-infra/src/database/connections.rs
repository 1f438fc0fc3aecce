#[cfg(feature = "mongodb")]
use std::time::Duration;

#[cfg(feature = "mongodb")]
use mongodb::{Client, Database, bson::doc, options::ClientOptions};

#[cfg(feature = "mongodb")]
use quill_core::error::RepoError;

/// Database name used when neither the config nor the URL names one.
pub const DEFAULT_DATABASE: &str = "quill";

/// Configuration for the document database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string, e.g. `mongodb://localhost:27017/blog-app`.
    pub url: String,
    /// Database name override. When `None`, the database named in the URL
    /// path is used, falling back to [`DEFAULT_DATABASE`].
    pub database: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
}

/// Handle to a connected document database.
#[cfg(feature = "mongodb")]
pub struct MongoDatabase {
    db: Database,
}

#[cfg(feature = "mongodb")]
impl MongoDatabase {
    /// Connect to the configured server and verify it is reachable.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepoError> {
        tracing::info!("Initializing database connection...");

        let mut options = ClientOptions::parse(&config.url)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);
        options.connect_timeout = Some(Duration::from_secs(10));
        options.server_selection_timeout = Some(Duration::from_secs(10));

        let client =
            Client::with_options(options).map_err(|e| RepoError::Connection(e.to_string()))?;

        let db = match &config.database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        // The client connects lazily; ping so an unreachable server
        // surfaces at startup rather than on the first request.
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!(
            database = %db.name(),
            "Database connected (pool: {})",
            config.max_pool_size
        );

        Ok(Self { db })
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }
}
