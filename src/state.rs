//! Application state: read-only settings, prompts and the upstream client.
//!
//! Built once at startup and shared by every request through `Arc`; there is
//! no mutable state across requests.

use tracing::{info, instrument, warn};

use crate::config::{load_prompts, Prompts, Settings};
use crate::openai::OpenAI;

#[derive(Clone)]
pub struct AppState {
  pub settings: Settings,
  pub prompts: Prompts,
  pub openai: OpenAI,
}

impl AppState {
  /// Load prompts (file override or built-in) and build the upstream client.
  #[instrument(level = "info", skip_all)]
  pub fn new(settings: Settings) -> Result<Self, reqwest::Error> {
    let prompts = load_prompts(settings.prompt_config_path.as_deref());
    Self::with_prompts(settings, prompts)
  }

  pub fn with_prompts(settings: Settings, prompts: Prompts) -> Result<Self, reqwest::Error> {
    let openai = OpenAI::new(&settings)?;
    info!(
      target: "satprep_backend",
      endpoint = %openai.endpoint,
      model = %openai.model,
      timeout = ?settings.timeout,
      "Upstream client ready"
    );
    if settings.api_key.is_none() {
      warn!(target: "satprep_backend", "OPENAI_API_KEY not set; question generation will fail until it is provided");
    }
    Ok(Self { settings, prompts, openai })
  }
}
