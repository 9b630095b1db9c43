use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{BlogKey, BlogPost, BlogPostPatch, BlogQuery, NewBlogPost, Page, seo};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, BlogPostRepository};

const ENTITY: &str = "Blog post";

/// Which posts a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Anonymous callers: published posts only.
    Public,
    /// Authorized admins: drafts included.
    All,
}

/// CRUD and publish state over blog posts.
pub struct ContentService {
    posts: Arc<dyn BlogPostRepository>,
}

impl ContentService {
    pub fn new(posts: Arc<dyn BlogPostRepository>) -> Self {
        Self { posts }
    }

    /// List posts newest first. Public callers only ever see published posts.
    pub async fn list(
        &self,
        mut query: BlogQuery,
        visibility: Visibility,
    ) -> Result<Page<BlogPost>, DomainError> {
        if visibility == Visibility::Public {
            query.published = Some(true);
        }
        Ok(self.posts.list(&query).await?)
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        visibility: Visibility,
    ) -> Result<BlogPost, DomainError> {
        let post = self.posts.find_by_id(id).await?;
        visible(post, visibility).ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    /// Case-insensitive slug lookup.
    pub async fn get_by_slug(
        &self,
        slug: &str,
        visibility: Visibility,
    ) -> Result<BlogPost, DomainError> {
        let post = self.posts.find_by_slug(slug).await?;
        visible(post, visibility).ok_or_else(|| DomainError::not_found(ENTITY, slug))
    }

    /// Create a post, deriving the slug from the title when it is omitted.
    pub async fn create(&self, payload: NewBlogPost) -> Result<BlogPost, DomainError> {
        let post = payload.with_derived_slug().into_post(Utc::now())?;
        let slug = post.slug.clone();

        let created = self
            .posts
            .insert(post)
            .await
            .map_err(|e| write_error(e, &slug))?;

        tracing::info!(post_id = %created.id, slug = %created.slug, "Blog post created");
        Ok(created)
    }

    /// True partial update: only fields present in `patch` change.
    pub async fn update(
        &self,
        key: &BlogKey,
        patch: BlogPostPatch,
    ) -> Result<BlogPost, DomainError> {
        patch.check()?;
        let mut post = self.resolve(key).await?;

        let renamed = patch.new_slug().is_some_and(|slug| slug != post.slug);
        post.apply(patch, Utc::now());

        let updated = self.save(post).await?;
        if renamed {
            tracing::info!(post_id = %updated.id, slug = %updated.slug, "Blog post renamed");
        } else {
            tracing::debug!(post_id = %updated.id, "Blog post updated");
        }
        Ok(updated)
    }

    /// Permanently delete a post.
    pub async fn delete(&self, key: &BlogKey) -> Result<(), DomainError> {
        let post = self.resolve(key).await?;
        self.posts.delete(post.id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found(ENTITY, key),
            other => other.into(),
        })?;

        tracing::info!(post_id = %post.id, slug = %post.slug, "Blog post deleted");
        Ok(())
    }

    /// Flip between draft and published.
    pub async fn toggle_publish(&self, key: &BlogKey) -> Result<BlogPost, DomainError> {
        let mut post = self.resolve(key).await?;
        post.set_published(!post.published, Utc::now());

        let updated = self.save(post).await?;
        tracing::info!(
            post_id = %updated.id,
            published = updated.published,
            "Blog post publish state toggled"
        );
        Ok(updated)
    }

    /// Fill empty SEO and social fields from the post content.
    pub async fn autofill_seo(&self, key: &BlogKey) -> Result<BlogPost, DomainError> {
        let mut post = self.resolve(key).await?;
        if !seo::autofill(&mut post) {
            return Ok(post);
        }
        post.updated_at = Utc::now();
        self.save(post).await
    }

    /// Look a post up by id, falling back to slug for UUID-shaped slugs.
    async fn resolve(&self, key: &BlogKey) -> Result<BlogPost, DomainError> {
        let found = match key {
            BlogKey::Id(id) => match self.posts.find_by_id(*id).await? {
                Some(post) => Some(post),
                None => self.posts.find_by_slug(&id.to_string()).await?,
            },
            BlogKey::Slug(slug) => self.posts.find_by_slug(slug).await?,
        };
        found.ok_or_else(|| DomainError::not_found(ENTITY, key))
    }

    async fn save(&self, post: BlogPost) -> Result<BlogPost, DomainError> {
        let id = post.id;
        let slug = post.slug.clone();
        self.posts.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found(ENTITY, id),
            other => write_error(other, &slug),
        })
    }
}

fn visible(post: Option<BlogPost>, visibility: Visibility) -> Option<BlogPost> {
    post.filter(|p| visibility == Visibility::All || p.published)
}

fn write_error(err: RepoError, slug: &str) -> DomainError {
    match err {
        RepoError::Constraint(_) => {
            DomainError::Conflict(format!("A blog post with slug '{slug}' already exists"))
        }
        other => other.into(),
    }
}
