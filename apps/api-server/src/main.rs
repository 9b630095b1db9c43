//! # Quill API Server
//!
//! The Actix-web HTTP server behind the marketing site: blog content,
//! contact and careers forms, and the admin dashboard.

use std::io;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            return Err(io::Error::other(err));
        }
    };

    telemetry::init_telemetry(config.json_logs);

    tracing::info!(
        host = %config.host,
        port = config.port,
        production = config.production,
        "Starting Quill API Server"
    );

    let state = AppState::new(&config).await.map_err(|err| {
        tracing::error!(error = %err, "Failed to build application state");
        io::Error::other(err)
    })?;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
