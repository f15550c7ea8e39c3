//! Domain models: SAT sections, difficulty levels and the validated question request.

use std::fmt;

use crate::error::AppError;
use crate::protocol::GenerateQuestionIn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
  ReadingAndWriting,
  Math,
}

impl Section {
  pub const ALL: [Section; 2] = [Section::ReadingAndWriting, Section::Math];

  pub fn as_str(self) -> &'static str {
    match self {
      Section::ReadingAndWriting => "Reading and Writing",
      Section::Math => "Math",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|v| v.as_str() == s)
  }
}

impl fmt::Display for Section {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

  pub fn as_str(self) -> &'static str {
    match self {
      Difficulty::Easy => "Easy",
      Difficulty::Medium => "Medium",
      Difficulty::Hard => "Hard",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|v| v.as_str() == s)
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// A request that passed validation. `topic` is trimmed free text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRequest {
  pub section: Section,
  pub topic: String,
  pub difficulty: Difficulty,
}

impl QuestionRequest {
  /// Trim and check the raw body. Missing fields are reported first (in
  /// section, topic, difficulty order), then disallowed enum values.
  pub fn validate(raw: &GenerateQuestionIn) -> Result<Self, AppError> {
    let section = required("section", raw.section.as_deref())?;
    let topic = required("topic", raw.topic.as_deref())?;
    let difficulty = required("difficulty", raw.difficulty.as_deref())?;

    let section = Section::parse(section)
      .ok_or_else(|| invalid("section", section, &Section::ALL.map(Section::as_str)))?;
    let difficulty = Difficulty::parse(difficulty)
      .ok_or_else(|| invalid("difficulty", difficulty, &Difficulty::ALL.map(Difficulty::as_str)))?;

    Ok(Self { section, topic: topic.to_string(), difficulty })
  }
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
  match value.map(str::trim) {
    Some(v) if !v.is_empty() => Ok(v),
    _ => Err(AppError::Validation(format!("Missing field: {field}"))),
  }
}

fn invalid(field: &str, value: &str, allowed: &[&str]) -> AppError {
  AppError::Validation(format!("Invalid {field}: '{value}' (expected one of: {})", allowed.join(", ")))
}
