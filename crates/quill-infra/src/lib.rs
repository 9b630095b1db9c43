//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory repositories only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT access gate
//! - `rate-limit` - Rate limiting via governor

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use database::{DatabaseConfig, Repositories};

#[cfg(feature = "auth")]
pub use auth::{JwtAccessGate, JwtConfig};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
