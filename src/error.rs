//! Request-level failures and their HTTP mapping.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::protocol::ErrorOut;

#[derive(Debug, Error)]
pub enum AppError {
  /// Missing, blank or disallowed input.
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  Config(String),

  /// Upstream answered with a non-2xx status; `body` is passed through raw.
  #[error("OpenAI HTTP {status}: {body}")]
  Upstream { status: reqwest::StatusCode, body: String },

  /// Network, timeout or body-read failure talking to the upstream.
  #[error("OpenAI request failed: {0}")]
  Transport(String),

  #[error("Could not extract text from model response: {0}")]
  Extraction(String),
}

impl AppError {
  pub fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Config(_)
      | AppError::Upstream { .. }
      | AppError::Transport(_)
      | AppError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<reqwest::Error> for AppError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_timeout() {
      AppError::Transport(format!("timed out: {e}"))
    } else {
      AppError::Transport(e.to_string())
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let status = self.status_code();
    let message = self.to_string();
    if status.is_client_error() {
      warn!(target: "satprep_backend", %status, error = %message, "Request rejected");
    } else {
      error!(target: "satprep_backend", %status, error = %message, "Request failed");
    }
    (status, Json(ErrorOut { error: message })).into_response()
  }
}
