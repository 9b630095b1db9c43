//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Writes take an async write lock over the whole table, so the unique slug
//! check and the write happen atomically and the first writer wins.
//! Data is lost on process restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{
    BlogPost, BlogQuery, CareerApplication, ContactSubmission, JobType, Page,
};
use quill_core::error::RepoError;
use quill_core::ports::{
    ApplicationRepository, BaseRepository, BlogPostRepository, ContactRepository,
};

/// A row the in-memory table can store.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    /// Value that must be unique across rows, compared case-insensitively.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl Record for BlogPost {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn unique_key(&self) -> Option<&str> {
        Some(self.slug.as_str())
    }
}

impl Record for ContactSubmission {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for CareerApplication {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// In-memory table kept in insertion order.
pub struct InMemoryRepository<T> {
    rows: RwLock<Vec<T>>,
}

pub type InMemoryBlogPostRepository = InMemoryRepository<BlogPost>;
pub type InMemoryContactRepository = InMemoryRepository<ContactSubmission>;
pub type InMemoryApplicationRepository = InMemoryRepository<CareerApplication>;

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Rows matching `filter`, newest first. Rows created in the same
    /// instant keep reverse insertion order.
    async fn newest_first(&self, filter: impl Fn(&T) -> bool) -> Vec<T> {
        let rows = self.rows.read().await;
        let mut matching: Vec<T> = rows.iter().rev().filter(|r| filter(r)).cloned().collect();
        matching.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        matching
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn collides<T: Record>(rows: &[T], candidate: &T) -> bool {
    let Some(key) = candidate.unique_key() else {
        return false;
    };
    rows.iter().any(|row| {
        row.id() != candidate.id()
            && row
                .unique_key()
                .is_some_and(|existing| existing.eq_ignore_ascii_case(key))
    })
}

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.id() == entity.id()) {
            return Err(RepoError::Constraint("duplicate primary key".to_string()));
        }
        if collides(&rows, &entity) {
            return Err(RepoError::Constraint("duplicate unique key".to_string()));
        }
        rows.push(entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.rows.read().await.len() as u64)
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryBlogPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|p| p.slug.to_lowercase() == slug.to_lowercase())
            .cloned())
    }

    async fn update(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        let mut rows = self.rows.write().await;
        if !rows.iter().any(|p| p.id == post.id) {
            return Err(RepoError::NotFound);
        }
        if collides(&rows, &post) {
            return Err(RepoError::Constraint("duplicate unique key".to_string()));
        }
        if let Some(slot) = rows.iter_mut().find(|p| p.id == post.id) {
            *slot = post.clone();
        }
        Ok(post)
    }

    async fn list(&self, query: &BlogQuery) -> Result<Page<BlogPost>, RepoError> {
        let matching = self
            .newest_first(|p| query.published.is_none_or(|published| p.published == published))
            .await;
        let total = matching.len() as u64;

        let items = match query.page {
            Some(page) => matching
                .into_iter()
                .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
                .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
                .collect(),
            None => matching,
        };

        Ok(Page { items, total })
    }

    async fn count_by_published(&self, published: bool) -> Result<u64, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|p| p.published == published).count() as u64)
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list_recent(&self) -> Result<Vec<ContactSubmission>, RepoError> {
        Ok(self.newest_first(|_| true).await)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn list_recent(
        &self,
        job_type: Option<JobType>,
    ) -> Result<Vec<CareerApplication>, RepoError> {
        Ok(self
            .newest_first(|a| job_type.is_none_or(|wanted| a.job_type == Some(wanted)))
            .await)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use quill_core::domain::{NewBlogPost, PageRequest};

    use super::*;

    fn post(slug: &str, published: bool, created_at: DateTime<Utc>) -> BlogPost {
        let mut post = NewBlogPost {
            title: Some(slug.to_uppercase()),
            slug: Some(slug.to_string()),
            published: Some(published),
            ..Default::default()
        }
        .into_post(created_at)
        .unwrap();
        post.updated_at = created_at;
        post
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_slug() {
        let repo = InMemoryBlogPostRepository::new();
        let now = Utc::now();

        repo.insert(post("taken", false, now)).await.unwrap();
        let err = repo.insert(post("taken", true, now)).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_rejects_rename_onto_other_row() {
        let repo = InMemoryBlogPostRepository::new();
        let now = Utc::now();
        repo.insert(post("first", false, now)).await.unwrap();
        let mut second = repo.insert(post("second", false, now)).await.unwrap();

        second.slug = "first".to_string();
        let err = repo.update(second).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let repo = InMemoryBlogPostRepository::new();

        let err = repo.update(post("ghost", false, Utc::now())).await.unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn update_of_missing_row_with_taken_slug_is_not_found() {
        let repo = InMemoryBlogPostRepository::new();
        repo.insert(post("taken", false, Utc::now())).await.unwrap();

        let err = repo.update(post("taken", false, Utc::now())).await.unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let repo = InMemoryBlogPostRepository::new();
        repo.insert(post("only", true, Utc::now())).await.unwrap();

        let query = BlogQuery {
            published: None,
            page: Some(PageRequest::new(u64::MAX, 100)),
        };
        let page = repo.list(&query).await.unwrap();

        assert_eq!(page.total, 1);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn slug_lookup_ignores_case() {
        let repo = InMemoryBlogPostRepository::new();
        repo.insert(post("mixed-case", true, Utc::now())).await.unwrap();

        let found = repo.find_by_slug("Mixed-CASE").await.unwrap();

        assert_eq!(found.map(|p| p.slug), Some("mixed-case".to_string()));
    }

    #[tokio::test]
    async fn list_pages_newest_first() {
        let repo = InMemoryBlogPostRepository::new();
        let start = Utc::now();
        for i in 0..8 {
            let created = start + TimeDelta::minutes(i);
            repo.insert(post(&format!("post-{i}"), i % 4 != 0, created))
                .await
                .unwrap();
        }

        let query = BlogQuery {
            published: Some(true),
            page: Some(PageRequest::new(1, 4)),
        };
        let page = repo.list(&query).await.unwrap();

        assert_eq!(page.total, 6);
        let slugs: Vec<_> = page.items.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["post-7", "post-6", "post-5", "post-3"]);

        let second = repo
            .list(&BlogQuery {
                published: Some(true),
                page: Some(PageRequest::new(2, 4)),
            })
            .await
            .unwrap();
        assert_eq!(second.items.len(), 2);
    }

    #[tokio::test]
    async fn delete_is_not_idempotent() {
        let repo = InMemoryContactRepository::new();
        let contact = ContactSubmission {
            id: Uuid::new_v4(),
            name: Some("Ada".to_string()),
            email: None,
            subject: None,
            message: None,
            created_at: Utc::now(),
        };
        repo.insert(contact.clone()).await.unwrap();

        repo.delete(contact.id).await.unwrap();
        assert!(matches!(
            repo.delete(contact.id).await.unwrap_err(),
            RepoError::NotFound
        ));
    }
}
