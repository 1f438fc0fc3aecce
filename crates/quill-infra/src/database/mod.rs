//! Database connection management and repository adapters.

mod connections;
mod memory;

#[cfg(feature = "mongodb")]
mod mongo;

pub use connections::{DEFAULT_DATABASE, DatabaseConfig};
pub use memory::InMemoryPostRepository;

#[cfg(feature = "mongodb")]
pub use connections::MongoDatabase;

#[cfg(feature = "mongodb")]
pub use mongo::MongoPostRepository;
