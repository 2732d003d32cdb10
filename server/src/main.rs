// stockroom/server/src/main.rs

mod config;
mod db;
mod errors;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::db::PostgresCatalogStore;
use crate::services::CloudinaryBlobStore;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use stockroom::{AttachmentPipeline, CatalogService, UploadPhase};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
  tracing::error!(error = %err, "{}", context);
  std::io::Error::new(std::io::ErrorKind::Other, format!("{context}: {err}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting catalog server...");

  let app_config = AppConfig::from_env()
    .map(Arc::new)
    .map_err(|e| startup_error("Failed to load application configuration.", e))?;

  let db_pool = db::connect(&app_config)
    .await
    .map_err(|e| startup_error("Failed to connect to the database.", e))?;
  db::ensure_schema(&db_pool)
    .await
    .map_err(|e| startup_error("Failed to prepare the database schema.", e))?;

  // External clients are built once here and handed down explicitly.
  let blob_store = CloudinaryBlobStore::new(app_config.cloudinary.clone())
    .map_err(|e| startup_error("Failed to build the Cloudinary client.", e))?;
  let mut attachments = AttachmentPipeline::new(Arc::new(blob_store));
  attachments.on_phase(|phase| {
    if let UploadPhase::Aborted { index, slot } = phase {
      tracing::warn!(index, %slot, "Image upload run aborted.");
    }
  });

  let catalog = CatalogService::new(Arc::new(PostgresCatalogStore::new(db_pool)), attachments);
  let app_state = AppState {
    catalog: Arc::new(catalog),
    config: app_config.clone(),
  };

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
