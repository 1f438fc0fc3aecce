//! # Quill Core
//!
//! The domain layer of the Quill blog API.
//! This crate contains the post entity, write models, and the repository
//! port, with zero HTTP or driver dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
