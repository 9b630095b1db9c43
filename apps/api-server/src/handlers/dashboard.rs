//! Admin dashboard handlers.

use actix_web::{HttpResponse, web};
use quill_shared::ApiResponse;

use crate::middleware::auth::Admin;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/stats
pub async fn stats(state: web::Data<AppState>, _admin: Admin) -> AppResult<HttpResponse> {
    let stats = state.dashboard.stats().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}
