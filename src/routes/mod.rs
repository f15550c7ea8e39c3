//! Router assembly: API endpoints, preflight, static files, CORS decoration and HTTP tracing.

use std::sync::Arc;

use axum::{
  middleware,
  routing::{get, options, post},
  Router,
};
use tower_http::{
  services::ServeDir,
  trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod cors;
pub mod http;

/// Build the application router with:
/// - `POST /api/generate-question`
/// - `OPTIONS /api/*` preflight (204)
/// - `GET /api/debug` when enabled in settings
/// - static files from `settings.static_dir` (`/` serves `index.html`, unknown paths 404)
/// - CORS decoration on every response, static files included
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
  let static_service = ServeDir::new(&state.settings.static_dir).append_index_html_on_directories(true);

  let mut api = Router::new()
    .route("/api/generate-question", post(http::http_post_generate_question).options(http::http_preflight))
    // Non-OPTIONS requests under /api fall through to the static files (usually a 404).
    .route("/api/*rest", options(http::http_preflight).fallback_service(static_service.clone()));

  if state.settings.enable_debug_endpoint {
    api = api.route("/api/debug", get(http::http_get_debug).options(http::http_preflight));
  }

  api
    .with_state(state)
    .fallback_service(static_service)
    .layer(middleware::from_fn(cors::decorate))
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}
