use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, BlogQuery, CareerApplication, ContactSubmission, JobType, Page};
use crate::error::RepoError;

/// Generic repository trait defining the operations every table supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique index violations surface as
    /// [`RepoError::Constraint`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, [`RepoError::NotFound`] if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;

    /// Number of stored entities.
    async fn count(&self) -> Result<u64, RepoError>;
}

/// Blog post repository.
#[async_trait]
pub trait BlogPostRepository: BaseRepository<BlogPost, Uuid> {
    /// Case-insensitive exact slug match.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError>;

    /// Overwrite the stored row with the same id. A slug taken by another
    /// row surfaces as [`RepoError::Constraint`].
    async fn update(&self, post: BlogPost) -> Result<BlogPost, RepoError>;

    /// Matching posts, newest first, with the total match count.
    async fn list(&self, query: &BlogQuery) -> Result<Page<BlogPost>, RepoError>;

    async fn count_by_published(&self, published: bool) -> Result<u64, RepoError>;
}

/// Contact submission repository.
#[async_trait]
pub trait ContactRepository: BaseRepository<ContactSubmission, Uuid> {
    /// All submissions, newest first.
    async fn list_recent(&self) -> Result<Vec<ContactSubmission>, RepoError>;
}

/// Career application repository.
#[async_trait]
pub trait ApplicationRepository: BaseRepository<CareerApplication, Uuid> {
    /// Applications newest first, optionally restricted to one job type.
    async fn list_recent(
        &self,
        job_type: Option<JobType>,
    ) -> Result<Vec<CareerApplication>, RepoError>;
}
