//! Public protocol structs for the HTTP endpoints (serde ready).

use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate-question`. Every field is optional on the wire
/// so that absence is reported as a validation error naming the field.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuestionIn {
  #[serde(default)] pub section: Option<String>,
  #[serde(default)] pub topic: Option<String>,
  #[serde(default)] pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TextOut { pub text: String }

#[derive(Debug, Serialize)]
pub struct ErrorOut { pub error: String }

/// Key diagnostics for `GET /api/debug`. Never carries the full secret.
#[derive(Debug, Serialize)]
pub struct DebugOut {
  pub has_key: bool,
  pub prefix: String,
  pub suffix: String,
  pub length: usize,
}
