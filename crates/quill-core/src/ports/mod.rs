//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod rate_limit;
mod repository;

pub use auth::{AccessGate, AuthError, Principal};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{
    ApplicationRepository, BaseRepository, BlogPostRepository, ContactRepository,
};
