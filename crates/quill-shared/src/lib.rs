//! # Quill Shared
//!
//! Wire types shared between the API server and its clients: request
//! DTOs, the serialized post representation, and the RFC 7807 error body.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
