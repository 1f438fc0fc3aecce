//! MongoDB repository implementation.

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use serde::{Deserialize, Serialize};

use quill_core::domain::{Author, BlogPost, BlogPostUpdate, NewBlogPost};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::connections::MongoDatabase;

/// Name of the collection holding the posts.
const POSTS_COLLECTION: &str = "posts";

/// Author subdocument as stored in the collection.
#[derive(Debug, Serialize, Deserialize)]
struct AuthorDocument {
    #[serde(rename = "firstName")]
    first_name: String,
    #[serde(rename = "lastName")]
    last_name: String,
}

impl From<Author> for AuthorDocument {
    fn from(author: Author) -> Self {
        Self {
            first_name: author.first_name,
            last_name: author.last_name,
        }
    }
}

impl From<AuthorDocument> for Author {
    fn from(doc: AuthorDocument) -> Self {
        Self {
            first_name: doc.first_name,
            last_name: doc.last_name,
        }
    }
}

/// A post as stored in the collection.
#[derive(Debug, Serialize, Deserialize)]
struct PostDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    author: AuthorDocument,
    title: String,
    content: String,
}

impl From<PostDocument> for BlogPost {
    fn from(doc: PostDocument) -> Self {
        Self {
            id: doc.id,
            author: doc.author.into(),
            title: doc.title,
            content: doc.content,
        }
    }
}

/// Build the `$set` document for a field-level overwrite.
fn set_document(update: BlogPostUpdate) -> Document {
    let mut set = Document::new();
    if let Some(author) = update.author {
        set.insert(
            "author",
            doc! {
                "firstName": author.first_name,
                "lastName": author.last_name,
            },
        );
    }
    if let Some(title) = update.title {
        set.insert("title", title);
    }
    if let Some(content) = update.content {
        set.insert("content", content);
    }
    set
}

/// MongoDB-backed post repository.
pub struct MongoPostRepository {
    posts: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(db: &MongoDatabase) -> Self {
        Self {
            posts: db.database().collection(POSTS_COLLECTION),
        }
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let mut cursor = self
            .posts
            .find(doc! {})
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut posts = Vec::new();
        while cursor
            .advance()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
        {
            let document: PostDocument = cursor
                .deserialize_current()
                .map_err(|e| RepoError::Query(e.to_string()))?;
            posts.push(document.into());
        }

        Ok(posts)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BlogPost>, RepoError> {
        let document = self
            .posts
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(document.map(Into::into))
    }

    async fn insert(&self, new_post: NewBlogPost) -> Result<BlogPost, RepoError> {
        let document = PostDocument {
            id: ObjectId::new(),
            author: new_post.author.into(),
            title: new_post.title,
            content: new_post.content,
        };

        self.posts
            .insert_one(&document)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        tracing::debug!(post_id = %document.id, "Inserted post");

        Ok(document.into())
    }

    async fn update(
        &self,
        id: ObjectId,
        update: BlogPostUpdate,
    ) -> Result<Option<BlogPost>, RepoError> {
        if update.is_empty() {
            // The server rejects an empty $set; an update carrying no
            // fields reduces to an existence check.
            return self.find_by_id(id).await;
        }

        let updated = self
            .posts
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set_document(update) })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(updated.map(Into::into))
    }

    async fn delete(&self, id: ObjectId) -> Result<(), RepoError> {
        self.posts
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_document_carries_only_provided_fields() {
        let update = BlogPostUpdate {
            author: None,
            title: Some("New title".to_string()),
            content: None,
        };

        let set = set_document(update);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("title").unwrap(), "New title");
    }

    #[test]
    fn set_document_replaces_author_as_a_subdocument() {
        let update = BlogPostUpdate {
            author: Some(Author::new("foo", "bar")),
            title: None,
            content: None,
        };

        let set = set_document(update);
        let author = set.get_document("author").unwrap();
        assert_eq!(author.get_str("firstName").unwrap(), "foo");
        assert_eq!(author.get_str("lastName").unwrap(), "bar");
    }
}
