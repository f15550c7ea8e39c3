//! Log setup for the service.
//!
//! Targets worth filtering on:
//! - `satprep_backend`: startup, settings, rejected/failed requests, generated questions
//! - `upstream`: OpenAI call latency, token usage and response shape
//! - `tower_http`: per-request spans from the trace layer
//!
//! LOG_LEVEL overrides the filter (e.g. "warn,upstream=debug"); LOG_FORMAT=json
//! switches to JSON lines.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,satprep_backend=debug,upstream=debug,tower_http=info,axum=info";

pub fn init_tracing() {
  let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_file(true)
    .with_line_number(true);

  match std::env::var("LOG_FORMAT").as_deref() {
    Ok("json") => builder.json().init(),
    _ => builder.init(),
  }
}
