//! Minimal OpenAI Responses API client.
//!
//! One POST per call to `{base}/responses`, no retries. The reply comes back in
//! one of two shapes (a flat `output_text` convenience field, or structured
//! `output[].content[].text` fragments); `UpstreamOutput` classifies it and
//! refuses anything else.
//!
//! NOTE: We never log the API key and keep payload dumps short.

use std::time::Instant;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::Settings;
use crate::error::AppError;
use crate::util::trunc_for_log;

const USER_AGENT_VALUE: &str = concat!("satprep-backend/", env!("CARGO_PKG_VERSION"));
const PAYLOAD_DUMP_MAX: usize = 2_000;

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub endpoint: String,
  pub model: String,
  pub max_output_tokens: u32,
  pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ResponsesRequest<'a> {
  pub model: &'a str,
  pub input: &'a str,
  pub max_output_tokens: u32,
  pub temperature: f32,
}

impl OpenAI {
  /// Build the client from settings; the request timeout applies to the whole call.
  pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder().timeout(settings.timeout).build()?;
    Ok(Self {
      client,
      endpoint: settings.responses_url(),
      model: settings.model.clone(),
      max_output_tokens: settings.max_output_tokens,
      temperature: settings.temperature,
    })
  }

  /// Send `input` as the prompt and return the extracted answer text.
  #[instrument(level = "info", target = "upstream", skip(self, api_key, input), fields(model = %self.model, input_len = input.len()))]
  pub async fn complete(&self, api_key: &str, input: &str) -> Result<String, AppError> {
    let req = ResponsesRequest {
      model: &self.model,
      input,
      max_output_tokens: self.max_output_tokens,
      temperature: self.temperature,
    };

    let start = Instant::now();
    let res = self.client.post(&self.endpoint)
      .header(USER_AGENT, USER_AGENT_VALUE)
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", api_key))
      .json(&req).send().await?;

    let status = res.status();
    let body = res.text().await?;
    let elapsed = start.elapsed();

    if !status.is_success() {
      return Err(AppError::Upstream { status, body });
    }
    info!(target: "upstream", ?elapsed, %status, body_len = body.len(), "OpenAI response received");

    let value: Value = serde_json::from_str(&body).map_err(|e| {
      AppError::Extraction(format!("response is not JSON ({e}): {}", trunc_for_log(&body, PAYLOAD_DUMP_MAX)))
    })?;

    if let Some(usage) = value.get("usage") {
      let input_tokens = token_count(usage, "input_tokens");
      let output_tokens = token_count(usage, "output_tokens");
      let total_tokens = token_count(usage, "total_tokens");
      info!(target: "upstream", ?input_tokens, ?output_tokens, ?total_tokens, "OpenAI usage");
    }

    extract_response_text(value)
  }
}

fn token_count(usage: &Value, key: &str) -> Option<u64> {
  usage.get(key).and_then(Value::as_u64)
}

/// The answer-bearing part of a Responses API payload.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutput {
  /// Top-level `output_text`, non-blank. Returned unchanged.
  Flat(String),
  /// String `text` fields of `output[*].content[*]`, in order.
  Structured(Vec<String>),
  /// Neither shape yielded any text.
  Unrecognized(Value),
}

impl UpstreamOutput {
  pub fn classify(value: Value) -> Self {
    if let Some(text) = value.get("output_text").and_then(Value::as_str) {
      if !text.trim().is_empty() {
        return UpstreamOutput::Flat(text.to_string());
      }
    }

    if let Some(items) = value.get("output").and_then(Value::as_array) {
      let fragments: Vec<String> = items
        .iter()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
      if !fragments.join("\n").trim().is_empty() {
        return UpstreamOutput::Structured(fragments);
      }
    }

    UpstreamOutput::Unrecognized(value)
  }

  pub fn shape(&self) -> &'static str {
    match self {
      UpstreamOutput::Flat(_) => "flat",
      UpstreamOutput::Structured(_) => "structured",
      UpstreamOutput::Unrecognized(_) => "unrecognized",
    }
  }

  pub fn into_text(self) -> Result<String, AppError> {
    match self {
      UpstreamOutput::Flat(text) => Ok(text),
      UpstreamOutput::Structured(fragments) => Ok(fragments.join("\n").trim().to_string()),
      UpstreamOutput::Unrecognized(value) => Err(AppError::Extraction(format!(
        "unrecognized response shape: {}",
        trunc_for_log(&value.to_string(), PAYLOAD_DUMP_MAX)
      ))),
    }
  }
}

/// Extract the generated text from an upstream payload of either known shape.
pub fn extract_response_text(value: Value) -> Result<String, AppError> {
  let output = UpstreamOutput::classify(value);
  debug!(target: "upstream", shape = output.shape(), "Classified response shape");
  output.into_text()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn flat_text_is_returned_verbatim() {
    let text = extract_response_text(json!({ "output_text": "Q..." })).unwrap();
    assert_eq!(text, "Q...");

    let padded = extract_response_text(json!({ "output_text": "\nQuestion:\n  x \n" })).unwrap();
    assert_eq!(padded, "\nQuestion:\n  x \n");
  }

  #[test]
  fn structured_fragments_are_joined_with_newlines() {
    let v = json!({ "output": [{ "content": [{ "text": "part1" }, { "text": "part2" }] }] });
    assert_eq!(extract_response_text(v).unwrap(), "part1\npart2");
  }

  #[test]
  fn structured_walks_every_item_and_skips_non_text_parts() {
    let v = json!({
      "output": [
        { "type": "reasoning", "summary": [] },
        { "content": "not a list" },
        { "content": [{ "type": "output_text", "text": "  A " }, { "text": 42 }, "junk"] },
        { "content": [{ "type": "refusal" }, { "text": "B  " }] }
      ]
    });
    assert_eq!(extract_response_text(v).unwrap(), "A \nB");
  }

  #[test]
  fn blank_flat_field_falls_through_to_structured() {
    let v = json!({ "output_text": "   ", "output": [{ "content": [{ "text": "real" }] }] });
    assert_eq!(UpstreamOutput::classify(v.clone()), UpstreamOutput::Structured(vec!["real".into()]));
    assert_eq!(extract_response_text(v).unwrap(), "real");
  }

  #[test]
  fn unknown_shape_fails_loudly() {
    let err = extract_response_text(json!({ "foo": "bar" })).unwrap_err();
    assert!(matches!(err, AppError::Extraction(_)));
    assert!(err.to_string().contains("\"foo\""));
  }

  #[test]
  fn whitespace_only_fragments_are_unrecognized() {
    let v = json!({ "output_text": "", "output": [{ "content": [{ "text": " " }, { "text": "\n" }] }] });
    assert_eq!(UpstreamOutput::classify(v).shape(), "unrecognized");
  }

  async fn serve_reply(reply: Value) -> String {
    let app = axum::Router::new().route(
      "/v1/responses",
      axum::routing::post(move || {
        let reply = reply.clone();
        async move { axum::Json(reply) }
      }),
    );
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
  }

  #[tokio::test]
  async fn complete_reads_text_from_a_reply_with_usage() {
    let base = serve_reply(json!({
      "output": [{ "content": [{ "type": "output_text", "text": "Question:\nWhat is 2+2?" }] }],
      "usage": { "input_tokens": 120, "output_tokens": 48, "total_tokens": 168 }
    }))
    .await;
    let settings = Settings { openai_base_url: base, ..Settings::default() };
    let client = OpenAI::new(&settings).unwrap();

    let text = client.complete("sk-test", "prompt").await.unwrap();
    assert_eq!(text, "Question:\nWhat is 2+2?");
  }

  #[test]
  fn token_counts_tolerate_missing_or_odd_fields() {
    let usage = json!({ "input_tokens": 7, "output_tokens": "many" });
    assert_eq!(token_count(&usage, "input_tokens"), Some(7));
    assert_eq!(token_count(&usage, "output_tokens"), None);
    assert_eq!(token_count(&usage, "total_tokens"), None);
  }

  #[test]
  fn request_serializes_with_the_expected_fields() {
    let req = ResponsesRequest { model: "gpt-4.1-mini", input: "hi", max_output_tokens: 500, temperature: 0.5 };
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v, json!({ "model": "gpt-4.1-mini", "input": "hi", "max_output_tokens": 500, "temperature": 0.5 }));
  }
}
