// src/models/session.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{question::Difficulty, result::QuizResult};

/// One answered question as kept in the session ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub selected: String,
    pub correct_option: String,
    pub is_correct: bool,
    pub points: u32,
    pub difficulty: Difficulty,
}

/// Mutable state of one quiz attempt.
///
/// The session is a plain value: every engine call takes it explicitly and the
/// surrounding service round-trips it through a `SessionStore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub taker_id: i64,
    pub quiz_id: i64,
    pub current_difficulty: Difficulty,
    /// Answered question ids in answer order. Never contains duplicates.
    pub answered: Vec<i64>,
    pub ledger: BTreeMap<i64, AnswerRecord>,
    pub started_at: DateTime<Utc>,
    /// Result computed by the first submit attempt, kept so a failed sink
    /// write can be retried with the exact same record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalized: Option<QuizResult>,
    /// Id assigned by the result sink. Set only when the session outlives a
    /// successful store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_id: Option<i64>,
}

impl Session {
    pub fn start(taker_id: i64, quiz_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            taker_id,
            quiz_id,
            current_difficulty: Difficulty::Medium,
            answered: Vec::new(),
            ledger: BTreeMap::new(),
            started_at: now,
            finalized: None,
            result_id: None,
        }
    }

    pub fn has_answered(&self, question_id: i64) -> bool {
        self.ledger.contains_key(&question_id)
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.is_some()
    }
}

/// DTO for starting a quiz attempt.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartQuizRequest {
    #[validate(range(min = 1, message = "taker_id must be a positive id"))]
    pub taker_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StartQuizResponse {
    pub token: Uuid,
    pub quiz_id: i64,
    pub total_questions: i64,
    pub time_limit_minutes: i64,
    pub difficulty: Difficulty,
}

/// DTO for submitting one answer. Both fields are optional on the wire so that
/// missing values surface as `InvalidInput` rather than a deserialization error.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitAnswerRequest {
    #[serde(default)]
    pub question_id: Option<i64>,
    #[serde(default)]
    // Same bound as `MAX_OPTION_LEN`.
    #[validate(length(max = 500))]
    pub answer: Option<String>,
}

/// Body of the next-question endpoint. `question` is absent once the pool is exhausted.
#[derive(Debug, Serialize, ToSchema)]
pub struct NextQuestionResponse {
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionSlot>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionSlot {
    #[serde(flatten)]
    pub question: crate::models::question::PresentedQuestion,
    /// 1-based position of this question in the attempt.
    pub number: usize,
    pub total: i64,
}
