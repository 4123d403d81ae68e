// src/docs.rs

use axum::{Json, response::IntoResponse};
use utoipa::OpenApi;

use crate::handlers::{quiz, result, session};

#[derive(OpenApi)]
#[openapi(
    info(title = "Adaptive Quiz Engine", description = "Adaptive question delivery and scoring"),
    paths(
        quiz::list_quizzes,
        quiz::start_quiz,
        session::next_question,
        session::submit_answer,
        session::submit_quiz,
        result::get_result,
        result::list_taker_results,
    ),
    tags(
        (name = "quiz", description = "Quiz catalog and attempt start"),
        (name = "session", description = "Adaptive question loop"),
        (name = "result", description = "Stored results"),
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
