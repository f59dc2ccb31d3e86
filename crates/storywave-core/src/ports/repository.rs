use async_trait::async_trait;

use crate::domain::{Page, PageRequest, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository. Users are looked up by their string id.
pub trait UserRepository: BaseRepository<User, String> {}

/// Post repository.
///
/// Listings are ordered by post id.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_all_paged(&self, request: PageRequest) -> Result<Page<Post>, RepoError>;

    /// Posts whose title contains `keyword`. Matching rules belong to the store.
    async fn find_by_title_containing(&self, keyword: &str) -> Result<Vec<Post>, RepoError>;

    /// The post collection of one user.
    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Post>, RepoError>;
}
