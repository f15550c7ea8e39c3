//! SAT practice question backend.
//!
//! Important env variables:
//!   PORT / BIND_ADDR         : listen address (default 0.0.0.0:5000)
//!   OPENAI_API_KEY           : required per request; absence is a 500, not a startup failure
//!   OPENAI_BASE_URL          : default "https://api.openai.com/v1"
//!   OPENAI_MODEL             : default "gpt-4.1-mini"
//!   OPENAI_MAX_OUTPUT_TOKENS : default 500
//!   OPENAI_TEMPERATURE       : default 0.4
//!   OPENAI_TIMEOUT_SECS      : default 60
//!   STATIC_DIR               : default "./static"
//!   ENABLE_DEBUG_ENDPOINT    : mounts GET /api/debug when truthy
//!   PROMPT_CONFIG_PATH       : optional TOML prompt override
//!   LOG_LEVEL / LOG_FORMAT   : tracing filter, "pretty" (default) or "json"

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use satprep_backend::{build_router, telemetry, AppState, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let settings = Settings::from_env();
  info!(target: "satprep_backend", ?settings, "Settings loaded");
  let addr = settings.socket_addr();

  let state = Arc::new(AppState::new(settings)?);
  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "satprep_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "satprep_backend", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      warn!(target: "satprep_backend", error = %e, "Failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        warn!(target: "satprep_backend", error = %e, "Failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
  info!(target: "satprep_backend", "Shutdown signal received");
}
