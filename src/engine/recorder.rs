// src/engine/recorder.rs

use serde::Serialize;
use utoipa::ToSchema;

use super::{EngineError, difficulty::next_difficulty};
use crate::{
    models::{
        question::Difficulty,
        session::{AnswerRecord, Session},
    },
    repository::QuestionRepository,
};

/// What the test-taker learns after answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: String,
    pub new_difficulty: Difficulty,
}

/// Grades one answer and folds it into the session.
///
/// Correctness is decided against the stored question, never against anything
/// the client sends. On error the session is left untouched.
pub async fn record_answer(
    repo: &dyn QuestionRepository,
    session: &mut Session,
    question_id: Option<i64>,
    submitted: Option<&str>,
) -> Result<AnswerOutcome, EngineError> {
    if session.is_finalized() {
        return Err(EngineError::InvalidInput(
            "session has already been submitted".to_string(),
        ));
    }

    let question_id = question_id
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            EngineError::InvalidInput("missing or malformed question_id".to_string())
        })?;
    let submitted = submitted
        .filter(|answer| !answer.is_empty())
        .ok_or_else(|| EngineError::InvalidInput("missing answer".to_string()))?;

    let question = repo
        .get_question(question_id)
        .await?
        .filter(|q| q.quiz_id == session.quiz_id)
        .ok_or(EngineError::QuestionNotFound(question_id))?;

    if session.has_answered(question_id) {
        return Err(EngineError::DuplicateAnswer(question_id));
    }

    let is_correct = question.is_correct(submitted);

    session.answered.push(question_id);
    session.ledger.insert(
        question_id,
        AnswerRecord {
            selected: submitted.to_string(),
            correct_option: question.correct_option.clone(),
            is_correct,
            points: question.points,
            difficulty: question.difficulty,
        },
    );

    let previous = session.current_difficulty;
    session.current_difficulty = next_difficulty(previous, is_correct);

    tracing::debug!(
        "Quiz {} question {} answered ({}), difficulty {} -> {}",
        session.quiz_id,
        question_id,
        if is_correct { "correct" } else { "wrong" },
        previous,
        session.current_difficulty
    );

    Ok(AnswerOutcome {
        correct: is_correct,
        correct_answer: question.correct_option,
        new_difficulty: session.current_difficulty,
    })
}
