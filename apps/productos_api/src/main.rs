// productos_api/src/main.rs

use productos_api::config::{AppConfig, StorageBackend};
use productos_api::db::{InMemoryProductoRepository, PgProductoRepository, SharedProductoRepository};
use productos_api::state::AppState;
use productos_api::telemetry::init_tracing;
use productos_api::web::configure_app_routes;

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Tracing depends on LOG_FORMAT, so configuration errors go straight to stderr.
  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;
  init_tracing(app_config.log_format);

  tracing::info!("Starting productos API server...");

  let repository: SharedProductoRepository = match app_config.storage_backend {
    StorageBackend::Postgres => {
      let database_url = app_config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres storage backend")?;
      let repo = PgProductoRepository::connect(database_url, app_config.database_max_connections)
        .await
        .context("Failed to connect to the database")?;
      tracing::info!("Successfully connected to the database.");
      Arc::new(repo)
    }
    StorageBackend::Memory => {
      tracing::warn!("Using in-memory storage; data will not survive a restart.");
      Arc::new(InMemoryProductoRepository::new())
    }
  };

  let app_state = AppState::new(repository).context("Failed to register request handlers")?;
  tracing::info!(handlers = app_state.dispatcher.len(), "Request handlers registered.");

  let server_address = app_config.server_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await?;

  Ok(())
}
