// src/models/quiz.rs

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    /// Advisory time limit shown to the test-taker. Not enforced by the engine.
    pub time_limit_minutes: i64,
}

/// Quiz listing entry with its question pool size.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    pub time_limit_minutes: i64,
    pub question_count: i64,
}
