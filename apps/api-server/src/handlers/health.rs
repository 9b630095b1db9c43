//! Health check endpoint.

use actix_web::{HttpResponse, web};
use quill_shared::ApiResponse;
use quill_shared::dto::HealthResponse;

use crate::state::AppState;

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.storage.to_string(),
    };

    HttpResponse::Ok().json(ApiResponse::ok(response))
}
