use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Author of a blog post. Both name parts are required on every
/// persisted post; clients only ever see the flattened display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// The externally visible author string, e.g. `"Ada Lovelace"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// BlogPost entity - a stored post with its store-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: ObjectId,
    pub author: Author,
    pub title: String,
    pub content: String,
}

/// Input for inserting a post. The id is assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub author: Author,
    pub title: String,
    pub content: String,
}

/// Field-level overwrite for an existing post. An absent field leaves the
/// stored value untouched; a present `author` replaces both name parts.
#[derive(Debug, Clone, Default)]
pub struct BlogPostUpdate {
    pub author: Option<Author>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl BlogPostUpdate {
    /// True when no field is set and the update would overwrite nothing.
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.title.is_none() && self.content.is_none()
    }
}
