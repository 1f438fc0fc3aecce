use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::domain::{BlogPost, BlogPostUpdate, NewBlogPost};
use crate::error::RepoError;

/// Post repository - the storage operations behind the `/posts` resource.
///
/// Ids are assigned by the implementation at insertion time and never
/// change afterwards. `update` and `delete` take a parsed id; callers are
/// responsible for rejecting or ignoring identifiers the store cannot
/// represent.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts currently stored, in no guaranteed order.
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Find a post by its unique id.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BlogPost>, RepoError>;

    /// Persist a new post and return it with its assigned id.
    async fn insert(&self, new_post: NewBlogPost) -> Result<BlogPost, RepoError>;

    /// Overwrite the fields carried by `update` on the post with this id.
    /// Returns the updated post, or `None` when no such post exists. An
    /// empty update degenerates to an existence check.
    async fn update(
        &self,
        id: ObjectId,
        update: BlogPostUpdate,
    ) -> Result<Option<BlogPost>, RepoError>;

    /// Remove the post with this id. Removing an absent post is not an
    /// error; the operation is idempotent.
    async fn delete(&self, id: ObjectId) -> Result<(), RepoError>;
}
