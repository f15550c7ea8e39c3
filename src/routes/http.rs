//! HTTP endpoint handlers. Thin wrappers that forward to core logic and map
//! failures through `AppError`.

use std::sync::Arc;

use axum::{
  extract::{rejection::JsonRejection, State},
  http::StatusCode,
  Json,
};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::logic::generate_question;
use crate::protocol::{DebugOut, GenerateQuestionIn, TextOut};
use crate::state::AppState;
use crate::util::mask_secret;

#[instrument(level = "info", skip_all)]
pub async fn http_post_generate_question(
  State(state): State<Arc<AppState>>,
  body: Result<Json<GenerateQuestionIn>, JsonRejection>,
) -> Result<Json<TextOut>, AppError> {
  let Json(body) = body.map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e.body_text())))?;
  let out = generate_question(&state, &body).await?;
  Ok(Json(out))
}

/// Browser preflight: empty 204, CORS headers come from the middleware.
pub async fn http_preflight() -> StatusCode {
  StatusCode::NO_CONTENT
}

#[instrument(level = "info", skip_all)]
pub async fn http_get_debug(State(state): State<Arc<AppState>>) -> Json<DebugOut> {
  let out = match state.settings.api_key.as_deref() {
    Some(key) => {
      let (prefix, suffix) = mask_secret(key);
      DebugOut { has_key: true, prefix, suffix, length: key.chars().count() }
    }
    None => DebugOut { has_key: false, prefix: String::new(), suffix: String::new(), length: 0 },
  };
  info!(target: "satprep_backend", has_key = out.has_key, "Debug info served");
  Json(out)
}
