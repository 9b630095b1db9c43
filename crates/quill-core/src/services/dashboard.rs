use std::sync::Arc;

use crate::domain::DashboardStats;
use crate::error::DomainError;
use crate::ports::{ApplicationRepository, BaseRepository, BlogPostRepository, ContactRepository};

/// Aggregate counts for the admin dashboard.
pub struct DashboardService {
    posts: Arc<dyn BlogPostRepository>,
    contacts: Arc<dyn ContactRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl DashboardService {
    pub fn new(
        posts: Arc<dyn BlogPostRepository>,
        contacts: Arc<dyn ContactRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            posts,
            contacts,
            applications,
        }
    }

    pub async fn stats(&self) -> Result<DashboardStats, DomainError> {
        Ok(DashboardStats {
            total_blogs: self.posts.count().await?,
            published_blogs: self.posts.count_by_published(true).await?,
            draft_blogs: self.posts.count_by_published(false).await?,
            total_applications: self.applications.count().await?,
            total_contacts: self.contacts.count().await?,
        })
    }
}
