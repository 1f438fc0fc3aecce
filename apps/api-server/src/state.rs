//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::PostRepository;
use quill_infra::InMemoryPostRepository;
use quill_infra::database::DatabaseConfig;

#[cfg(feature = "mongodb")]
use quill_infra::{MongoDatabase, MongoPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    /// Which backend the state was built with, surfaced by /health.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with the appropriate repository.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "mongodb")]
        let (posts, storage): (Arc<dyn PostRepository>, &'static str) = {
            if let Some(config) = db_config {
                match MongoDatabase::connect(config).await {
                    Ok(db) => (Arc::new(MongoPostRepository::new(&db)), "mongodb"),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (Arc::new(InMemoryPostRepository::new()), "in-memory")
                    }
                }
            } else {
                tracing::warn!("MONGODB_URI not set. Running without database (in-memory mode).");
                (Arc::new(InMemoryPostRepository::new()), "in-memory")
            }
        };

        #[cfg(not(feature = "mongodb"))]
        let (posts, storage): (Arc<dyn PostRepository>, &'static str) = {
            let _ = db_config;
            tracing::info!("Running without mongodb feature - using in-memory repository");
            (Arc::new(InMemoryPostRepository::new()), "in-memory")
        };

        tracing::info!(storage, "Application state initialized");

        Self { posts, storage }
    }

    /// State backed by a fresh in-memory repository.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            storage: "in-memory",
        }
    }
}
