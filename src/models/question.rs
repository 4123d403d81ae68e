// src/models/question.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;

/// Longest option text, in characters. Submitted answers are capped at the same length.
pub const MAX_OPTION_LEN: usize = 500;

/// Difficulty band. Both a question attribute and the session's adaptation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QuestionError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Violations of the question invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("unknown difficulty label '{0}'")]
    UnknownDifficulty(String),

    #[error("question options must be distinct and non-empty")]
    InvalidOptions,

    #[error("question options are limited to {} characters", MAX_OPTION_LEN)]
    OptionTooLong,

    #[error("correct option '{0}' is not one of the options")]
    CorrectOptionMissing(String),

    #[error("point value must be positive, got {0}")]
    InvalidPoints(i64),
}

/// A multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub prompt: String,
    pub options: [String; 4],
    /// The correct option's value. Matching is by value, never by position.
    pub correct_option: String,
    pub difficulty: Difficulty,
    pub points: u32,
}

impl Question {
    /// Builds a question, enforcing that the options are distinct and the
    /// correct option matches exactly one of them.
    pub fn new(
        id: i64,
        quiz_id: i64,
        prompt: impl Into<String>,
        options: [String; 4],
        correct_option: impl Into<String>,
        difficulty: Difficulty,
        points: i64,
    ) -> Result<Self, QuestionError> {
        let correct_option = correct_option.into();

        if options.iter().any(|o| o.is_empty()) {
            return Err(QuestionError::InvalidOptions);
        }
        if options.iter().any(|o| o.chars().count() > MAX_OPTION_LEN) {
            return Err(QuestionError::OptionTooLong);
        }
        for (i, a) in options.iter().enumerate() {
            if options[i + 1..].contains(a) {
                return Err(QuestionError::InvalidOptions);
            }
        }
        if !options.contains(&correct_option) {
            return Err(QuestionError::CorrectOptionMissing(correct_option));
        }
        let points = u32::try_from(points)
            .ok()
            .filter(|p| *p > 0)
            .ok_or(QuestionError::InvalidPoints(points))?;

        Ok(Self {
            id,
            quiz_id,
            prompt: prompt.into(),
            options,
            correct_option,
            difficulty,
            points,
        })
    }

    pub fn is_correct(&self, submitted: &str) -> bool {
        self.correct_option == submitted
    }
}

/// Represents a row of the 'questions' table.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub quiz_id: i64,
    pub prompt: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: String,
    pub difficulty: String,
    pub points: i64,
}

impl TryFrom<QuestionRow> for Question {
    type Error = QuestionError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let difficulty = row.difficulty.parse()?;
        Question::new(
            row.id,
            row.quiz_id,
            row.prompt,
            [row.option_a, row.option_b, row.option_c, row.option_d],
            row.correct_option,
            difficulty,
            row.points,
        )
    }
}

/// A question as shown to the test-taker: options in presentation order,
/// correct answer withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PresentedQuestion {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    pub difficulty: Difficulty,
    pub marks: u32,
}
