#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the `SecureCheck` dashboard.
//!
//! Exposes the dashboard operations as a JSON API under `/api`. Every
//! request that needs stop data fetches a fresh snapshot, so the server
//! holds no data between requests.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use securecheck_analytics::Dashboard;
use securecheck_database::{DataAccess, DatabaseConfig};

/// Shared application state.
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

/// Address the HTTP server listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindAddress {
    pub host: String,
    pub port: u16,
}

impl Default for BindAddress {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl BindAddress {
    /// Reads `BIND_ADDR` and `PORT`, falling back to `127.0.0.1:8080`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("BIND_ADDR").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/stops", web::get().to(handlers::stops))
            .route("/reports", web::get().to(handlers::reports))
            .route("/reports/run", web::post().to(handlers::run_report))
            .route("/charts", web::get().to(handlers::charts))
            .route("/stop-durations", web::get().to(handlers::stop_durations))
            .route("/predict", web::post().to(handlers::predict)),
    );
}

/// Starts the API server on the address from the environment.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: DatabaseConfig) -> std::io::Result<()> {
    serve(config, BindAddress::from_env()).await
}

/// Starts the API server on `bind`.
///
/// The store is not contacted here. A store that is down shows up as
/// empty responses, not as a startup failure. This is a regular async
/// function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn serve(config: DatabaseConfig, bind: BindAddress) -> std::io::Result<()> {
    let _ = pretty_env_logger::try_init_custom_env("RUST_LOG");

    log::info!("Using database {}", config.describe());
    let state = web::Data::new(AppState {
        dashboard: Arc::new(Dashboard::new(DataAccess::from_config(config))),
    });

    log::info!("Starting server on {}:{}", bind.host, bind.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind.host, bind.port))?
    .run()
    .await
}
