//! Storage for blog posts and leads.

mod connections;
pub mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

use std::sync::Arc;

use quill_core::ports::{ApplicationRepository, BlogPostRepository, ContactRepository};

pub use connections::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use connections::connect;
pub use memory::{
    InMemoryApplicationRepository, InMemoryBlogPostRepository, InMemoryContactRepository,
};

#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresApplicationRepository, PostgresBlogPostRepository, PostgresContactRepository,
};

/// The repositories the services are built from, backed by one store.
#[derive(Clone)]
pub struct Repositories {
    pub posts: Arc<dyn BlogPostRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
}

impl Repositories {
    /// Fresh, empty in-memory tables.
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryBlogPostRepository::new()),
            contacts: Arc::new(InMemoryContactRepository::new()),
            applications: Arc::new(InMemoryApplicationRepository::new()),
        }
    }

    /// Repositories sharing one PostgreSQL connection pool.
    #[cfg(feature = "postgres")]
    pub fn postgres(db: sea_orm::DbConn) -> Self {
        Self {
            posts: Arc::new(PostgresBlogPostRepository::new(db.clone())),
            contacts: Arc::new(PostgresContactRepository::new(db.clone())),
            applications: Arc::new(PostgresApplicationRepository::new(db)),
        }
    }
}

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
