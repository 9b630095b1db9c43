//! Contact and careers form handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::FieldErrors;
use quill_core::domain::{JobType, NewCareerApplication, NewContactSubmission};
use quill_shared::ApiResponse;
use quill_shared::dto::{CareerListParams, Empty};

use crate::middleware::auth::Admin;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/contacts
pub async fn submit_contact(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> AppResult<HttpResponse> {
    let payload = NewContactSubmission::from_json(body.into_inner())?;
    let contact = state.submissions.submit_contact(payload).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(contact)))
}

/// GET /api/contacts
pub async fn list_contacts(
    state: web::Data<AppState>,
    _admin: Admin,
) -> AppResult<HttpResponse> {
    let contacts = state.submissions.list_contacts().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(contacts)))
}

/// GET /api/contacts/{id}
pub async fn get_contact(
    state: web::Data<AppState>,
    _admin: Admin,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let contact = state.submissions.get_contact(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(contact)))
}

/// DELETE /api/contacts/{id}
pub async fn delete_contact(
    state: web::Data<AppState>,
    _admin: Admin,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.submissions.delete_contact(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(Empty {})))
}

/// POST /api/careers
pub async fn submit_application(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> AppResult<HttpResponse> {
    let payload = NewCareerApplication::from_json(body.into_inner())?;
    let application = state.submissions.submit_application(payload).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(application)))
}

/// GET /api/careers
pub async fn list_applications(
    state: web::Data<AppState>,
    _admin: Admin,
    params: web::Query<CareerListParams>,
) -> AppResult<HttpResponse> {
    let job_type = match params.into_inner().job_type {
        Some(raw) => Some(raw.parse::<JobType>().map_err(|err| {
            tracing::debug!(error = %err, "Rejected job type filter");
            let mut fields = FieldErrors::new();
            fields.add("job_type", "job_type");
            AppError::Validation(fields)
        })?),
        None => None,
    };

    let applications = state.submissions.list_applications(job_type).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(applications)))
}

/// GET /api/careers/{id}
pub async fn get_application(
    state: web::Data<AppState>,
    _admin: Admin,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let application = state.submissions.get_application(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(application)))
}

/// DELETE /api/careers/{id}
pub async fn delete_application(
    state: web::Data<AppState>,
    _admin: Admin,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.submissions.delete_application(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(Empty {})))
}
