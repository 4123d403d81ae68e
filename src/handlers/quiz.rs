// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        quiz::{Quiz, QuizSummary},
        session::{Session, StartQuizRequest, StartQuizResponse},
    },
    state::AppState,
};

/// Lists all quizzes with the size of their question pool.
#[utoipa::path(
    get,
    path = "/api/quizzes",
    responses((status = 200, description = "Available quizzes", body = [QuizSummary])),
    tag = "quiz"
)]
pub async fn list_quizzes(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let quizzes = sqlx::query_as::<_, QuizSummary>(
        r#"
        SELECT
            q.id,
            q.title,
            q.time_limit_minutes,
            COUNT(qu.id) AS question_count
        FROM quizzes q
        LEFT JOIN questions qu ON qu.quiz_id = q.id
        GROUP BY q.id
        ORDER BY q.id DESC
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quizzes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(quizzes))
}

/// Starts an adaptive attempt.
///
/// * Rejects unknown quizzes and quizzes without questions.
/// * Creates a fresh session at medium difficulty and returns its token.
#[utoipa::path(
    post,
    path = "/api/quizzes/{quiz_id}/start",
    params(("quiz_id" = i64, Path, description = "Quiz to attempt")),
    request_body = StartQuizRequest,
    responses(
        (status = 201, description = "Session created", body = StartQuizResponse),
        (status = 400, description = "Invalid taker id or empty quiz"),
        (status = 404, description = "Quiz not found"),
    ),
    tag = "quiz"
)]
pub async fn start_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Json(req): Json<StartQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let quiz = sqlx::query_as::<_, Quiz>(
        "SELECT id, title, time_limit_minutes FROM quizzes WHERE id = ?",
    )
    .bind(quiz_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let total_questions = state.questions.count_questions(quiz.id, None).await?;
    if total_questions == 0 {
        return Err(AppError::BadRequest(
            "This quiz has no questions yet".to_string(),
        ));
    }

    let session = Session::start(req.taker_id, quiz.id, Utc::now());
    let token = state.sessions.create(&session).await?;

    tracing::info!(
        "Taker {} started quiz {} ({} questions)",
        req.taker_id,
        quiz.id,
        total_questions
    );

    Ok((
        StatusCode::CREATED,
        Json(StartQuizResponse {
            token,
            quiz_id: quiz.id,
            total_questions,
            time_limit_minutes: quiz.time_limit_minutes,
            difficulty: session.current_difficulty,
        }),
    ))
}
