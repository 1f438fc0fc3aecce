//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the document-database repository and the in-memory
//! stand-in used when no database is configured.
//!
//! ## Feature Flags
//!
//! - `mongodb` (default) - MongoDB support via the official driver
//! - without default features the crate is in-memory only

pub mod database;

// Re-exports - In-Memory
pub use database::InMemoryPostRepository;

// Re-exports - MongoDB
#[cfg(feature = "mongodb")]
pub use database::{MongoDatabase, MongoPostRepository};
