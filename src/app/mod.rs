//! Application setup and runtime.

use crate::{
  db::{self, EmailStore},
  http,
  service::EmailService,
  smtp::{MailTransport, OfflineMailer, SmtpMailer},
};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tracing::info;

pub mod config;

pub use config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
  pub emails: EmailService,
}

/// Pick the transport for this process: SMTP when a host is configured, offline otherwise.
pub fn build_transport(
  config: &AppConfig,
) -> Result<Arc<dyn MailTransport>, crate::error::TransportError> {
  match &config.smtp {
    Some(settings) => Ok(Arc::new(SmtpMailer::new(settings)?)),
    None => {
      info!("no SMTP host configured, running in offline mode");
      Ok(Arc::new(OfflineMailer))
    }
  }
}

/// Load configuration, prepare the database and serve the REST API.
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  dotenvy::dotenv().ok();
  crate::util::init_tracing();

  let config = AppConfig::from_env()?;

  let db_url = db::ensure_sqlite_path(&config.database_url);
  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;
  db::run_migrations(&pool).await?;

  let store = EmailStore::new(pool);
  if config.seed_demo {
    db::seed_demo_data(&store).await?;
  }

  let transport = build_transport(&config)?;
  let emails = EmailService::new(
    store,
    transport,
    config.from_address.clone(),
    config.on_send_failure,
  );
  let app = http::build_router(AppState { emails }, &config.cors_origin)?;

  info!(from = %config.from_address, policy = ?config.on_send_failure, "email service ready");
  info!("REST API:             http://{}/api/emails", config.addr);
  info!("CORS origin:          {}", config.cors_origin);

  let listener = tokio::net::TcpListener::bind(config.addr).await?;
  axum::serve(listener, app).await?;
  Ok(())
}
