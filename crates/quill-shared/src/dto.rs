//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Author fields as they appear on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorPayload {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

/// Request to create a post. Every field is required by the contract;
/// they are modeled as options so the handler can report exactly which
/// ones are missing instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author: Option<AuthorPayload>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Request to update a post. `id` must repeat the path id; the remaining
/// fields overwrite the stored values when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    pub author: Option<AuthorPayload>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A post as returned to clients. The author subdocument is flattened to
/// a single display string, e.g. `"Ada Lovelace"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
}
