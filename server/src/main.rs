// server/src/main.rs

use anyhow::Context;
use actix_web::{web as actix_data, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use user_orders::{InMemoryUserRepository, PgUserRepository, UserRepository};
use user_orders_server::config::{AppConfig, StorageKind};
use user_orders_server::state::AppState;
use user_orders_server::web::configure_app_routes;

fn init_tracing(log_json: bool) {
  // RUST_LOG overrides the default level
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE);

  if log_json {
    builder.json().init();
  } else {
    builder.init();
  }
}

async fn build_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn UserRepository>> {
  match config.storage {
    StorageKind::Postgres => {
      let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for postgres storage")?;
      let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to the database")?;
      tracing::info!("Successfully connected to the database.");
      Ok(Arc::new(PgUserRepository::new(pool)))
    }
    StorageKind::Memory => {
      tracing::warn!("Using in-memory storage; data is lost on shutdown.");
      Ok(Arc::new(InMemoryUserRepository::new()))
    }
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;
  init_tracing(app_config.log_json);

  tracing::info!(storage = ?app_config.storage, "Starting user/order API server...");

  let app_state = AppState::new(build_repository(&app_config).await?);

  let server_address = app_config.bind_address();
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
  .await
  .context("HTTP server terminated with an error")
}
