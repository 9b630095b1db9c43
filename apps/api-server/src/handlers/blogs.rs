//! Blog post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{
    BlogKey, BlogPostPatch, BlogQuery, FieldSelection, NewBlogPost, PageRequest,
};
use quill_core::services::Visibility;
use quill_shared::ApiResponse;
use quill_shared::dto::{BlogListParams, Empty};

use crate::middleware::auth::{Admin, MaybeAdmin};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Header carrying the number of posts matching a listing, across all pages.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// GET /api/blogs
pub async fn list(
    state: web::Data<AppState>,
    caller: MaybeAdmin,
    params: web::Query<BlogListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let selection = params
        .fields
        .as_deref()
        .map(FieldSelection::parse)
        .transpose()?;

    let visibility = caller.visibility();
    let query = BlogQuery {
        published: match visibility {
            Visibility::All => params.published,
            Visibility::Public => None,
        },
        page: Some(PageRequest::new(
            params.page.unwrap_or(1),
            params.per_page.unwrap_or(state.blog_page_size),
        )),
    };

    let page = state.content.list(query, visibility).await?;

    let mut response = HttpResponse::Ok();
    response.insert_header((TOTAL_COUNT_HEADER, page.total.to_string()));

    Ok(match selection {
        Some(selection) => {
            let items: Vec<serde_json::Value> =
                page.items.iter().map(|post| selection.project(post)).collect();
            response.json(ApiResponse::ok(items))
        }
        None => response.json(ApiResponse::ok(page.items)),
    })
}

/// GET /api/blogs/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    caller: MaybeAdmin,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .content
        .get_by_id(path.into_inner(), caller.visibility())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// GET /api/blogs/slug/{slug}
pub async fn get_by_slug(
    state: web::Data<AppState>,
    caller: MaybeAdmin,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .content
        .get_by_slug(&path.into_inner(), caller.visibility())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/blogs
pub async fn create(
    state: web::Data<AppState>,
    admin: Admin,
    body: web::Json<serde_json::Value>,
) -> AppResult<HttpResponse> {
    let payload = NewBlogPost::from_json(body.into_inner())?;
    let post = state.content.create(payload).await?;
    tracing::debug!(subject = %admin.0.subject, post_id = %post.id, "Created via API");

    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// PUT /api/blogs/{key}
pub async fn update(
    state: web::Data<AppState>,
    _admin: Admin,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> AppResult<HttpResponse> {
    let patch = BlogPostPatch::from_json(body.into_inner())?;
    let key = BlogKey::parse(&path.into_inner());
    let post = state.content.update(&key, patch).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/blogs/{key}
pub async fn delete(
    state: web::Data<AppState>,
    _admin: Admin,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let key = BlogKey::parse(&path.into_inner());
    state.content.delete(&key).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(Empty {})))
}

/// POST /api/blogs/{key}/toggle-publish
pub async fn toggle_publish(
    state: web::Data<AppState>,
    _admin: Admin,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let key = BlogKey::parse(&path.into_inner());
    let post = state.content.toggle_publish(&key).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/blogs/{key}/seo/autofill
pub async fn autofill_seo(
    state: web::Data<AppState>,
    _admin: Admin,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let key = BlogKey::parse(&path.into_inner());
    let post = state.content.autofill_seo(&key).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}
