//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
///
/// Absence of a post is not an error at this layer; lookups return
/// `Option` and deletion is idempotent. These variants cover the store
/// itself failing.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}
