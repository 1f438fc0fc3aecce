//! In-memory post repository - used as fallback when MongoDB is unavailable.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use quill_core::domain::{BlogPost, BlogPostUpdate, NewBlogPost};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

/// In-memory post store using a HashMap with an async RwLock.
///
/// This is the fallback implementation when no database is configured,
/// and the backend the endpoint tests run against. Posts are keyed by the
/// same id type the document store uses, so id handling behaves
/// identically across both.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<ObjectId, BlogPost>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.get(&id).cloned())
    }

    async fn insert(&self, new_post: NewBlogPost) -> Result<BlogPost, RepoError> {
        let post = BlogPost {
            id: ObjectId::new(),
            author: new_post.author,
            title: new_post.title,
            content: new_post.content,
        };

        let mut posts = self.posts.write().await;
        posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn update(
        &self,
        id: ObjectId,
        update: BlogPostUpdate,
    ) -> Result<Option<BlogPost>, RepoError> {
        let mut posts = self.posts.write().await;

        match posts.get_mut(&id) {
            Some(post) => {
                if let Some(author) = update.author {
                    post.author = author;
                }
                if let Some(title) = update.title {
                    post.title = title;
                }
                if let Some(content) = update.content {
                    post.content = content;
                }
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        posts.remove(&id);
        Ok(())
    }
}
