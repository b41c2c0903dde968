#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the theft map application.
//!
//! Serves the REST API for submitting incident reports and reading
//! aggregated statistics, plus the static frontend bundle. Reports are
//! kept in a flat JSON file (see [`theft_map_store::json_file`]).

mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use theft_map_store::RecordStore;
use theft_map_store::json_file::JsonFileStore;

/// Shared application state.
pub struct AppState {
    /// Record store used for both intake and statistics.
    pub store: Arc<dyn RecordStore>,
}

/// Server settings, normally read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`, default `127.0.0.1`).
    pub bind_addr: String,
    /// Port to bind (`PORT`, default `8080`).
    pub port: u16,
    /// Directory holding `denuncias.json` (`DATA_DIR`, default `data`).
    pub data_dir: PathBuf,
    /// Frontend bundle served at `/` (`STATIC_DIR`, default `app/dist`).
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from environment variables, falling back
    /// to defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "app/dist".to_string());

        Self {
            bind_addr,
            port,
            data_dir: theft_map_store::paths::data_dir(),
            static_dir: PathBuf::from(static_dir),
        }
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/categories", web::get().to(handlers::categories))
            .route("/incidents", web::get().to(handlers::list_incidents))
            .route("/incidents", web::post().to(handlers::create_incident))
            .route("/incidents/stats", web::get().to(handlers::stats)),
    );
}

/// Starts the theft map API server.
///
/// Opens the flat-file record store and starts the Actix-Web HTTP
/// server. The caller is responsible for initializing logging and
/// providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!("Opening record store in {}", config.data_dir.display());
    let store = JsonFileStore::new(&config.data_dir);

    let state = web::Data::new(AppState {
        store: Arc::new(store),
    });

    let ServerConfig {
        bind_addr,
        port,
        static_dir,
        ..
    } = config;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve frontend static files (production)
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
