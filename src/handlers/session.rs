// src/handlers/session.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    engine::{self, AnswerOutcome, EngineError, Selection},
    error::AppError,
    models::{
        result::SubmitQuizResponse,
        session::{NextQuestionResponse, QuestionSlot, Session, SubmitAnswerRequest},
    },
    state::AppState,
};

async fn load_session(state: &AppState, token: Uuid) -> Result<Session, AppError> {
    state
        .sessions
        .load(token)
        .await?
        .ok_or(AppError::NotFound("No active quiz session".to_string()))
}

/// Serves the next adaptive question, or `done` once the pool is exhausted.
#[utoipa::path(
    post,
    path = "/api/sessions/{token}/next",
    params(("token" = Uuid, Path, description = "Session token")),
    responses(
        (status = 200, description = "Next question or done marker", body = NextQuestionResponse),
        (status = 404, description = "Unknown or expired session"),
    ),
    tag = "session"
)]
pub async fn next_question(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = load_session(&state, token).await?;

    if session.is_finalized() {
        return Ok(Json(NextQuestionResponse {
            done: true,
            question: None,
        }));
    }

    let selection = engine::select_next(
        state.questions.as_ref(),
        session.quiz_id,
        session.current_difficulty,
        &session.answered,
    )
    .await?;

    let response = match selection {
        Selection::Done => NextQuestionResponse {
            done: true,
            question: None,
        },
        Selection::Next(question) => {
            let total = state
                .questions
                .count_questions(session.quiz_id, None)
                .await?;
            NextQuestionResponse {
                done: false,
                question: Some(QuestionSlot {
                    question,
                    number: session.answered.len() + 1,
                    total,
                }),
            }
        }
    };

    Ok(Json(response))
}

/// Grades an answer, updates the ledger and adapts the difficulty.
#[utoipa::path(
    post,
    path = "/api/sessions/{token}/answer",
    params(("token" = Uuid, Path, description = "Session token")),
    request_body = SubmitAnswerRequest,
    responses(
        (status = 200, description = "Answer recorded", body = AnswerOutcome),
        (status = 400, description = "Missing question id or answer"),
        (status = 404, description = "Unknown session or question"),
        (status = 409, description = "Question already answered"),
    ),
    tag = "session"
)]
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let mut session = load_session(&state, token).await?;

    let outcome = engine::record_answer(
        state.questions.as_ref(),
        &mut session,
        req.question_id,
        req.answer.as_deref(),
    )
    .await?;

    state.sessions.save(token, &session).await?;

    Ok(Json(outcome))
}

/// Finalizes the attempt, stores the result and clears the session.
///
/// The computed result is kept in the session until the sink accepts it, so a
/// submit retried after a storage failure stores the very same record. A
/// result is stored at most once per session.
#[utoipa::path(
    post,
    path = "/api/sessions/{token}/submit",
    params(("token" = Uuid, Path, description = "Session token")),
    responses(
        (status = 200, description = "Result stored", body = SubmitQuizResponse),
        (status = 404, description = "Unknown or expired session"),
        (status = 503, description = "Result storage unavailable, retry"),
    ),
    tag = "session"
)]
pub async fn submit_quiz(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = load_session(&state, token).await?;

    let result = match session.finalized.clone() {
        Some(result) => result,
        None => {
            let result = engine::finalize(&session, Utc::now());
            session.finalized = Some(result.clone());
            state.sessions.save(token, &session).await?;
            result
        }
    };

    let result_id = match session.result_id {
        Some(id) => id,
        None => state
            .results
            .store(&result)
            .await
            .map_err(EngineError::from)?,
    };

    // A session that survives here must remember its stored id, or the next
    // submit would store the result a second time.
    if let Err(e) = state.sessions.remove(token).await {
        tracing::warn!("Failed to clear submitted session {}: {:?}", token, e);
        session.result_id = Some(result_id);
        state.sessions.save(token, &session).await?;
    }

    tracing::info!(
        "Taker {} finished quiz {}: {}/{} ({:.1}%) in {}s, result {}",
        result.taker_id,
        result.quiz_id,
        result.score,
        result.total,
        result.percentage,
        result.time_taken,
        result_id
    );

    Ok(Json(SubmitQuizResponse { result_id, result }))
}
