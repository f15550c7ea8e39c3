//! Question generation: validate, build the prompt, call upstream, extract.

use tracing::{info, instrument};

use crate::domain::QuestionRequest;
use crate::error::AppError;
use crate::protocol::{GenerateQuestionIn, TextOut};
use crate::state::AppState;
use crate::util::fill_template;

pub fn build_prompt(template: &str, req: &QuestionRequest) -> String {
  fill_template(
    template,
    &[
      ("section", req.section.as_str()),
      ("topic", &req.topic),
      ("difficulty", req.difficulty.as_str()),
    ],
  )
  .trim()
  .to_string()
}

/// Validation runs before anything touches the network.
#[instrument(level = "info", skip_all)]
pub async fn generate_question(state: &AppState, raw: &GenerateQuestionIn) -> Result<TextOut, AppError> {
  let req = QuestionRequest::validate(raw)?;

  let api_key = state
    .settings
    .api_key
    .as_deref()
    .ok_or_else(|| AppError::Config("Missing OPENAI_API_KEY".into()))?;

  let prompt = build_prompt(&state.prompts.question_template, &req);
  let text = state.openai.complete(api_key, &prompt).await?;

  info!(
    target: "satprep_backend",
    section = %req.section,
    difficulty = %req.difficulty,
    topic_len = req.topic.len(),
    text_len = text.len(),
    "Question generated"
  );
  Ok(TextOut { text })
}
