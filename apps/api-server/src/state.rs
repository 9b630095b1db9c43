//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{AccessGate, RateLimiter};
use quill_core::services::{ContentService, DashboardService, SubmissionService};
use quill_infra::{JwtAccessGate, Repositories};

use crate::config::AppConfig;

/// Startup failures after configuration has loaded.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Database unavailable: {0}")]
    Database(String),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
    pub submissions: Arc<SubmissionService>,
    pub dashboard: Arc<DashboardService>,
    pub gate: Arc<dyn AccessGate>,
    /// `None` disables rate limiting.
    pub rate_limiter: Option<Arc<dyn RateLimiter>>,
    /// Rate limit on the forwarded client address rather than the peer.
    pub trust_proxy_headers: bool,
    pub blog_page_size: u64,
    /// `postgres` or `memory`, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Wire services over `repositories`.
    pub fn from_parts(
        repositories: Repositories,
        gate: Arc<dyn AccessGate>,
        rate_limiter: Option<Arc<dyn RateLimiter>>,
        blog_page_size: u64,
        storage: &'static str,
    ) -> Self {
        let Repositories {
            posts,
            contacts,
            applications,
        } = repositories;

        Self {
            content: Arc::new(ContentService::new(posts.clone())),
            submissions: Arc::new(SubmissionService::new(
                contacts.clone(),
                applications.clone(),
            )),
            dashboard: Arc::new(DashboardService::new(posts, contacts, applications)),
            gate,
            rate_limiter,
            trust_proxy_headers: false,
            blog_page_size,
            storage,
        }
    }

    /// Build the application state from configuration.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let (repositories, storage) = repositories(config).await?;
        let gate: Arc<dyn AccessGate> = Arc::new(JwtAccessGate::new(config.jwt.clone()));

        if config.jwt.admin_role.is_none() {
            tracing::warn!("ADMIN_ROLE not set. Any valid token is treated as an admin.");
        }

        let mut state = Self::from_parts(
            repositories,
            gate,
            rate_limiter(config),
            config.blog_page_size,
            storage,
        );
        state.trust_proxy_headers = config.trust_proxy_headers;
        tracing::info!(
            storage,
            trust_proxy_headers = state.trust_proxy_headers,
            "Application state initialized"
        );

        Ok(state)
    }
}

#[cfg(feature = "postgres")]
async fn repositories(config: &AppConfig) -> Result<(Repositories, &'static str), StartupError> {
    use migration::{Migrator, MigratorTrait};

    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Ok((Repositories::in_memory(), "memory"));
    };

    let db = quill_infra::database::connect(db_config)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    tracing::info!("Database migrations applied");

    Ok((Repositories::postgres(db), "postgres"))
}

#[cfg(not(feature = "postgres"))]
async fn repositories(config: &AppConfig) -> Result<(Repositories, &'static str), StartupError> {
    if config.database.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
    }
    tracing::info!("Running without postgres feature - using in-memory repositories");
    Ok((Repositories::in_memory(), "memory"))
}

#[cfg(feature = "rate-limit")]
fn rate_limiter(config: &AppConfig) -> Option<Arc<dyn RateLimiter>> {
    use quill_infra::{InMemoryRateLimiter, RateLimitConfig};

    Some(Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
        max_requests: config.rate_limit_max_requests,
        window: config.rate_limit_window,
    })))
}

#[cfg(not(feature = "rate-limit"))]
fn rate_limiter(_config: &AppConfig) -> Option<Arc<dyn RateLimiter>> {
    None
}
