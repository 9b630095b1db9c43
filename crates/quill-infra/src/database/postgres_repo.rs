//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use quill_core::domain::{
    BlogPost, BlogQuery, CareerApplication, ContactSubmission, JobType, Page,
};
use quill_core::error::RepoError;
use quill_core::ports::{ApplicationRepository, BlogPostRepository, ContactRepository};

use super::entity::blog_post::{self, Entity as BlogPostEntity};
use super::entity::career_application::{self, Entity as CareerApplicationEntity};
use super::entity::contact_submission::{self, Entity as ContactSubmissionEntity};
use super::postgres_base::{PostgresBaseRepository, query_error, write_error};

/// PostgreSQL blog post repository.
pub type PostgresBlogPostRepository = PostgresBaseRepository<BlogPostEntity>;

/// PostgreSQL contact submission repository.
pub type PostgresContactRepository = PostgresBaseRepository<ContactSubmissionEntity>;

/// PostgreSQL career application repository.
pub type PostgresApplicationRepository = PostgresBaseRepository<CareerApplicationEntity>;

#[async_trait]
impl BlogPostRepository for PostgresBlogPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError> {
        tracing::debug!(slug, "Finding blog post by slug");

        let lowered_slug = Func::lower(Expr::col(blog_post::Column::Slug));
        let result = BlogPostEntity::find()
            .filter(Expr::expr(lowered_slug).eq(slug.to_lowercase()))
            .order_by_asc(blog_post::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn update(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        let active_model: blog_post::ActiveModel = post.into();
        let model = active_model.update(&self.db).await.map_err(write_error)?;

        Ok(model.into())
    }

    async fn list(&self, query: &BlogQuery) -> Result<Page<BlogPost>, RepoError> {
        let mut select = BlogPostEntity::find().order_by_desc(blog_post::Column::CreatedAt);
        if let Some(published) = query.published {
            select = select.filter(blog_post::Column::Published.eq(published));
        }

        let total = select.clone().count(&self.db).await.map_err(query_error)?;

        if let Some(page) = query.page {
            select = select.offset(page.offset()).limit(page.limit());
        }
        let models = select.all(&self.db).await.map_err(query_error)?;

        Ok(Page {
            items: models.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn count_by_published(&self, published: bool) -> Result<u64, RepoError> {
        BlogPostEntity::find()
            .filter(blog_post::Column::Published.eq(published))
            .count(&self.db)
            .await
            .map_err(query_error)
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn list_recent(&self) -> Result<Vec<ContactSubmission>, RepoError> {
        let result = ContactSubmissionEntity::find()
            .order_by_desc(contact_submission::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn list_recent(
        &self,
        job_type: Option<JobType>,
    ) -> Result<Vec<CareerApplication>, RepoError> {
        let mut select = CareerApplicationEntity::find()
            .order_by_desc(career_application::Column::CreatedAt);
        if let Some(job_type) = job_type {
            select = select.filter(career_application::Column::JobType.eq(job_type.as_str()));
        }

        let result = select.all(&self.db).await.map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
