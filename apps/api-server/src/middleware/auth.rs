//! Access gate extractors.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use quill_core::ports::{AuthError, Principal};
use quill_core::services::Visibility;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// An authorized admin.
///
/// Use this in handlers to require a valid admin token:
/// ```ignore
/// async fn protected_route(_admin: Admin) -> impl Responder {
///     "only admins get here"
/// }
/// ```
/// Rejection happens before the handler body runs, so a denied request
/// never reaches the store.
#[derive(Debug, Clone)]
pub struct Admin(pub Principal);

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?;
    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

fn authorize(req: &HttpRequest) -> Result<Principal, AppError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        return Err(AppError::Internal("AppState not found in app data".to_string()));
    };
    let token = bearer_token(req)?;
    Ok(state.gate.authorize(token)?)
}

impl FromRequest for Admin {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = authorize(req).map(Admin);
        if let Err(err) = &result {
            tracing::debug!(path = %req.path(), error = %err, "Access denied");
        }
        ready(result)
    }
}

/// Optional admin - anonymous callers and rejected tokens both read as
/// `None`.
pub struct MaybeAdmin(pub Option<Principal>);

impl MaybeAdmin {
    pub fn visibility(&self) -> Visibility {
        match self.0 {
            Some(_) => Visibility::All,
            None => Visibility::Public,
        }
    }
}

impl FromRequest for MaybeAdmin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeAdmin(authorize(req).ok())))
    }
}
