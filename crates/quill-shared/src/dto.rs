//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/blogs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogListParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Admin-only filter; anonymous callers always see published posts.
    pub published: Option<bool>,
    /// Comma separated field names, e.g. `id,title,slug`.
    pub fields: Option<String>,
}

/// Query string of `GET /api/careers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerListParams {
    pub job_type: Option<String>,
}

/// Liveness payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
}

/// `{}` payload returned by deletes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Empty {}
