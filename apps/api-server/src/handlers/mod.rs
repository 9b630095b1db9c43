//! HTTP handlers and route configuration.

mod blogs;
mod dashboard;
mod health;
mod leads;


use actix_web::{guard, web};

use crate::middleware::error::{json_error, path_error, query_error};
use crate::middleware::rate_limit::RateLimit;

pub use blogs::TOTAL_COUNT_HEADER;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Blog posts
                .service(
                    web::resource("/blogs")
                        .route(web::get().to(blogs::list))
                        .route(web::post().to(blogs::create)),
                )
                .route("/blogs/slug/{slug}", web::get().to(blogs::get_by_slug))
                .route(
                    "/blogs/{key}/toggle-publish",
                    web::post().to(blogs::toggle_publish),
                )
                .route(
                    "/blogs/{key}/seo/autofill",
                    web::post().to(blogs::autofill_seo),
                )
                .service(
                    web::resource("/blogs/{key}")
                        .route(web::get().to(blogs::get_by_id))
                        .route(web::put().to(blogs::update))
                        .route(web::delete().to(blogs::delete)),
                )
                // Leads - public submission is rate limited
                .service(
                    web::resource("/contacts")
                        .guard(guard::Post())
                        .wrap(RateLimit)
                        .to(leads::submit_contact),
                )
                .route("/contacts", web::get().to(leads::list_contacts))
                .service(
                    web::resource("/contacts/{id}")
                        .route(web::get().to(leads::get_contact))
                        .route(web::delete().to(leads::delete_contact)),
                )
                .service(
                    web::resource("/careers")
                        .guard(guard::Post())
                        .wrap(RateLimit)
                        .to(leads::submit_application),
                )
                .route("/careers", web::get().to(leads::list_applications))
                .service(
                    web::resource("/careers/{id}")
                        .route(web::get().to(leads::get_application))
                        .route(web::delete().to(leads::delete_application)),
                )
                // Admin dashboard
                .route("/stats", web::get().to(dashboard::stats)),
        );
}
