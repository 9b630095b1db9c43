//! Rate limiting middleware.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use futures::future::LocalBoxFuture;
use quill_shared::ApiResponse;

use crate::state::AppState;

/// Rate limiting middleware factory.
///
/// Requests are keyed by client IP and checked against the limiter held in
/// [`AppState`]; without one every request passes. The IP is the socket
/// peer unless the state trusts proxy headers.
pub struct RateLimit;

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let state = req.app_data::<web::Data<AppState>>();
        let limiter = state.and_then(|state| state.rate_limiter.clone());
        let trust_proxy_headers = state.is_some_and(|state| state.trust_proxy_headers);

        let key = client_key(&req, trust_proxy_headers);

        Box::pin(async move {
            if let Some(limiter) = limiter {
                match limiter.check(&key).await {
                    Ok(result) if !result.allowed => {
                        tracing::warn!(%key, path = %req.path(), "Rate limit exceeded");

                        let retry_after = result.reset_after.as_secs().max(1);
                        let response = HttpResponse::TooManyRequests()
                            .insert_header(("Retry-After", retry_after.to_string()))
                            .json(ApiResponse::error(format!(
                                "Too many requests. Try again in {retry_after} seconds."
                            )));

                        return Ok(req.into_response(response).map_into_right_body());
                    }
                    Ok(_) => {}
                    Err(err) => tracing::error!(error = %err, "Rate limiter error, failing open"),
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn client_key(req: &ServiceRequest, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        if let Some(forwarded) = req.connection_info().realip_remote_addr() {
            return forwarded.to_string();
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
