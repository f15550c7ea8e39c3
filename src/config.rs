//! Process configuration: environment-backed `Settings` plus the optional TOML
//! prompt override.
//!
//! Settings are built once at startup and handed to `AppState`; nothing reads
//! the environment after that.

use std::{
  fmt,
  net::{IpAddr, Ipv4Addr, SocketAddr},
  path::{Path, PathBuf},
  time::Duration,
};

use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.4;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_STATIC_DIR: &str = "./static";

#[derive(Clone)]
pub struct Settings {
  pub bind_addr: IpAddr,
  pub port: u16,
  /// Checked per request; a missing key is not a startup failure.
  pub api_key: Option<String>,
  pub openai_base_url: String,
  pub model: String,
  pub max_output_tokens: u32,
  pub temperature: f32,
  pub timeout: Duration,
  pub static_dir: PathBuf,
  pub enable_debug_endpoint: bool,
  pub prompt_config_path: Option<PathBuf>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
      port: DEFAULT_PORT,
      api_key: None,
      openai_base_url: DEFAULT_BASE_URL.into(),
      model: DEFAULT_MODEL.into(),
      max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
      temperature: DEFAULT_TEMPERATURE,
      timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
      static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
      enable_debug_endpoint: false,
      prompt_config_path: None,
    }
  }
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for Settings {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Settings")
      .field("bind_addr", &self.bind_addr)
      .field("port", &self.port)
      .field("has_api_key", &self.api_key.is_some())
      .field("openai_base_url", &self.openai_base_url)
      .field("model", &self.model)
      .field("max_output_tokens", &self.max_output_tokens)
      .field("temperature", &self.temperature)
      .field("timeout", &self.timeout)
      .field("static_dir", &self.static_dir)
      .field("enable_debug_endpoint", &self.enable_debug_endpoint)
      .field("prompt_config_path", &self.prompt_config_path)
      .finish()
  }
}

impl Settings {
  pub fn from_env() -> Self {
    Self::from_vars(|key| std::env::var(key).ok())
  }

  /// Build settings from an arbitrary variable lookup. Unparseable values fall
  /// back to their defaults.
  pub fn from_vars<F>(var: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let d = Self::default();
    let non_blank = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    Self {
      bind_addr: non_blank("BIND_ADDR").and_then(|v| v.parse().ok()).unwrap_or(d.bind_addr),
      port: non_blank("PORT").and_then(|v| v.parse().ok()).unwrap_or(d.port),
      api_key: non_blank("OPENAI_API_KEY"),
      openai_base_url: non_blank("OPENAI_BASE_URL")
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or(d.openai_base_url),
      model: non_blank("OPENAI_MODEL").unwrap_or(d.model),
      max_output_tokens: non_blank("OPENAI_MAX_OUTPUT_TOKENS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(d.max_output_tokens),
      temperature: non_blank("OPENAI_TEMPERATURE")
        .and_then(|v| v.parse().ok())
        .unwrap_or(d.temperature),
      timeout: non_blank("OPENAI_TIMEOUT_SECS")
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(d.timeout),
      static_dir: non_blank("STATIC_DIR").map(PathBuf::from).unwrap_or(d.static_dir),
      enable_debug_endpoint: non_blank("ENABLE_DEBUG_ENDPOINT")
        .map(|v| parse_flag(&v))
        .unwrap_or(d.enable_debug_endpoint),
      prompt_config_path: non_blank("PROMPT_CONFIG_PATH").map(PathBuf::from),
    }
  }

  pub fn socket_addr(&self) -> SocketAddr {
    SocketAddr::new(self.bind_addr, self.port)
  }

  /// Full URL of the completion endpoint.
  pub fn responses_url(&self) -> String {
    format!("{}/responses", self.openai_base_url)
  }
}

fn parse_flag(v: &str) -> bool {
  matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

const DEFAULT_QUESTION_TEMPLATE: &str = r#"You are an SAT test writer. Create ONE original SAT-style question.

Section: {section}
Topic: {topic}
Difficulty: {difficulty}

STRICT REQUIREMENTS:
- SAT style and tone
- Exactly 4 answer choices labeled A., B., C., D.
- ALL math must be written in LaTeX
- Use $...$ for inline math and $$...$$ for displayed equations
- Do NOT use HTML
- Do NOT explain LaTeX formatting
- Do not include any extra headings or text outside the specified format

Output format (plain text only):

Question:
<question text>

Answer Choices:
A. ...
B. ...
C. ...
D. ...

Correct Answer:
<single letter A-D>

Explanation:
<step-by-step explanation with LaTeX>"#;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct PromptConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompt text sent upstream. `{section}`, `{topic}` and `{difficulty}` are
/// substituted per request.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub question_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self { question_template: DEFAULT_QUESTION_TEMPLATE.into() }
  }
}

/// Load prompts from a TOML file. Any IO/parse error is logged and the
/// built-in prompts are used instead.
pub fn load_prompts(path: Option<&Path>) -> Prompts {
  let Some(path) = path else { return Prompts::default() };
  let shown = path.display().to_string();
  match std::fs::read_to_string(path) {
    Ok(s) => match toml::from_str::<PromptConfig>(&s) {
      Ok(cfg) => {
        info!(target: "satprep_backend", path = %shown, "Loaded prompt config (TOML)");
        cfg.prompts
      }
      Err(e) => {
        error!(target: "satprep_backend", path = %shown, error = %e, "Failed to parse TOML prompt config");
        Prompts::default()
      }
    },
    Err(e) => {
      error!(target: "satprep_backend", path = %shown, error = %e, "Failed to read TOML prompt config");
      Prompts::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn settings_from(pairs: &[(&str, &str)]) -> Settings {
    let map: HashMap<String, String> =
      pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    Settings::from_vars(|k| map.get(k).cloned())
  }

  #[test]
  fn defaults_when_nothing_is_set() {
    let s = settings_from(&[]);
    assert_eq!(s.port, 5000);
    assert!(s.api_key.is_none());
    assert_eq!(s.model, "gpt-4.1-mini");
    assert_eq!(s.max_output_tokens, 500);
    assert_eq!(s.timeout, Duration::from_secs(60));
    assert_eq!(s.responses_url(), "https://api.openai.com/v1/responses");
    assert!(!s.enable_debug_endpoint);
  }

  #[test]
  fn blank_api_key_counts_as_missing() {
    let s = settings_from(&[("OPENAI_API_KEY", "   ")]);
    assert!(s.api_key.is_none());
  }

  #[test]
  fn overrides_are_applied_and_bad_numbers_fall_back() {
    let s = settings_from(&[
      ("PORT", "8081"),
      ("OPENAI_BASE_URL", "http://127.0.0.1:9999/v1/"),
      ("OPENAI_TEMPERATURE", "warm"),
      ("OPENAI_TIMEOUT_SECS", "5"),
      ("ENABLE_DEBUG_ENDPOINT", "TRUE"),
    ]);
    assert_eq!(s.port, 8081);
    assert_eq!(s.responses_url(), "http://127.0.0.1:9999/v1/responses");
    assert_eq!(s.temperature, DEFAULT_TEMPERATURE);
    assert_eq!(s.timeout, Duration::from_secs(5));
    assert!(s.enable_debug_endpoint);
  }

  #[test]
  fn debug_output_hides_the_key() {
    let s = settings_from(&[("OPENAI_API_KEY", "sk-very-secret-value")]);
    let shown = format!("{s:?}");
    assert!(!shown.contains("sk-very-secret-value"));
    assert!(shown.contains("has_api_key: true"));
  }

  #[test]
  fn prompt_file_overrides_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prompts.toml");
    std::fs::write(&path, "[prompts]\nquestion_template = \"Write {difficulty} {section} on {topic}\"\n").unwrap();
    let p = load_prompts(Some(path.as_path()));
    assert_eq!(p.question_template, "Write {difficulty} {section} on {topic}");
  }

  #[test]
  fn unreadable_prompt_file_uses_defaults() {
    let p = load_prompts(Some(Path::new("/definitely/not/here.toml")));
    assert!(p.question_template.starts_with("You are an SAT test writer."));
  }
}
